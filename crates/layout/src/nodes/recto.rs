use folio_traits::{
    BreakRequest, Canvas, DeferredEdit, Flowable, Indexing, OnPlaced, PlacementContext,
};
use std::cell::Cell;
use std::rc::Rc;

/// A page break that makes the following content start on an odd page.
///
/// Whether a blank padding page is needed is only known once the break has
/// been placed, so the decision is fed back through a deferred edit and the
/// item stays unsatisfied until a pass needs no correction.
#[derive(Debug, Default)]
pub struct RectoBreak {
    pad: Rc<Cell<bool>>,
    changed: Cell<bool>,
}

impl RectoBreak {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the break currently emits a blank padding page.
    pub fn is_padded(&self) -> bool {
        self.pad.get()
    }
}

impl Flowable for RectoBreak {
    fn wrap(&self, _avail_width: f32) -> f32 {
        0.0
    }

    fn draw(&self, _canvas: &mut dyn Canvas, _x: f32, _y: f32, _width: f32) {}

    fn page_break(&self) -> Option<BreakRequest> {
        Some(BreakRequest {
            blank_pages: usize::from(self.pad.get()),
        })
    }

    fn as_indexing(&self) -> Option<&dyn Indexing> {
        Some(self)
    }

    fn as_placement_hook(&self) -> Option<&dyn OnPlaced> {
        Some(self)
    }
}

impl Indexing for RectoBreak {
    fn is_satisfied(&self) -> bool {
        !self.changed.get()
    }

    fn reset(&self) {
        self.pad.set(false);
        self.changed.set(false);
    }

    fn before_build(&self) {
        self.changed.set(false);
    }
}

impl OnPlaced for RectoBreak {
    fn on_placed(&self, doc: &mut PlacementContext<'_, '_>) {
        let padded = self.pad.get();
        // The page the content would start on without padding.
        let natural = doc.current_page() - usize::from(padded);
        let wanted = natural % 2 == 0;
        if wanted != padded {
            self.changed.set(true);
            let pad = Rc::clone(&self.pad);
            doc.defer(DeferredEdit::new("recto-padding", move || pad.set(wanted)));
        }
    }
}
