use crate::canvas::Canvas;
use crate::context::PlacementContext;
use crate::notify::Notification;
use std::collections::HashSet;
use std::fmt::Debug;
use std::rc::Rc;

/// Stories are lists of shared flowables. A pass lays out a throwaway copy of
/// the list, so the story itself is never consumed.
pub type FlowableRef = Rc<dyn Flowable>;

/// Asks the engine to start a new page before placing the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreakRequest {
    /// Additional empty pages to emit after the break.
    pub blank_pages: usize,
}

/// A piece of content the layout engine can measure, split and draw.
pub trait Flowable: Debug {
    /// Height needed when laid out at `avail_width`.
    fn wrap(&self, avail_width: f32) -> f32;

    /// Splits the item so that the first part fits into `avail_height`.
    /// `None` means the item cannot be split there.
    fn split(&self, _avail_width: f32, _avail_height: f32) -> Option<(FlowableRef, FlowableRef)> {
        None
    }

    /// Draws the item with its top-left corner at (`x`, `y`).
    fn draw(&self, canvas: &mut dyn Canvas, x: f32, y: f32, width: f32);

    /// Page break semantics, if this item is a break rather than content.
    fn page_break(&self) -> Option<BreakRequest> {
        None
    }

    /// Items nested inside this one, for capability discovery.
    fn children(&self) -> &[FlowableRef] {
        &[]
    }

    /// The indexing capability, if the item depends on post-layout data.
    fn as_indexing(&self) -> Option<&dyn Indexing> {
        None
    }

    /// The placement hook, if the item wants to know where it landed.
    fn as_placement_hook(&self) -> Option<&dyn OnPlaced> {
        None
    }

    fn is_indexing(&self) -> bool {
        self.as_indexing().is_some()
    }
}

/// Content whose data is only known after layout and must be resolved across
/// passes.
pub trait Indexing {
    /// Whether the item's data stopped changing between the last two passes.
    fn is_satisfied(&self) -> bool;

    /// Runs once per build, before the first pass; forgets whatever a
    /// previous build left behind.
    fn reset(&self) {}

    /// Runs before every pass; drops per-pass accumulations.
    fn before_build(&self) {}

    /// Runs after every pass, once all placements are done.
    fn after_build(&self) {}

    /// Receives notifications raised by other items during the pass.
    fn notify(&self, _note: &Notification) {}
}

/// Content that registers itself once the engine has placed it on a page.
pub trait OnPlaced {
    fn on_placed(&self, doc: &mut PlacementContext<'_, '_>);
}

/// Every indexing item in `story`, depth first, in document order.
///
/// An item shared between several places in the story is listed once, at
/// its first occurrence.
pub fn collect_indexing(story: &[FlowableRef]) -> Vec<FlowableRef> {
    fn walk(items: &[FlowableRef], seen: &mut HashSet<*const ()>, out: &mut Vec<FlowableRef>) {
        for item in items {
            if item.is_indexing() && seen.insert(Rc::as_ptr(item) as *const ()) {
                out.push(Rc::clone(item));
            }
            walk(item.children(), seen, out);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(story, &mut seen, &mut out);
    out
}
