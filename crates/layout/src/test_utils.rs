use crate::config::PageGeometry;
use folio_traits::{Canvas, Flowable, OnPlaced, PlacementContext};
use folio_types::Edges;
use std::cell::RefCell;

/// A 100pt x 100pt frame with no margins or padding.
pub fn small_geometry() -> PageGeometry {
    PageGeometry {
        width: 100.0,
        height: 100.0,
        margin: Edges::default(),
        padding: Edges::default(),
        footer: None,
        footer_font_size: 9.0,
    }
}

/// A fixed-height, unsplittable item that records every page it lands on.
#[derive(Debug)]
pub struct Probe {
    height: f32,
    pages: RefCell<Vec<usize>>,
}

impl Probe {
    pub fn new(height: f32) -> Self {
        Self {
            height,
            pages: RefCell::new(Vec::new()),
        }
    }

    pub fn pages(&self) -> Vec<usize> {
        self.pages.borrow().clone()
    }
}

impl Flowable for Probe {
    fn wrap(&self, _avail_width: f32) -> f32 {
        self.height
    }

    fn draw(&self, canvas: &mut dyn Canvas, x: f32, y: f32, _width: f32) {
        canvas.draw_rule(x, y, 1.0, 1.0);
    }

    fn as_placement_hook(&self) -> Option<&dyn OnPlaced> {
        Some(self)
    }
}

impl OnPlaced for Probe {
    fn on_placed(&self, doc: &mut PlacementContext<'_, '_>) {
        self.pages.borrow_mut().push(doc.current_page());
    }
}
