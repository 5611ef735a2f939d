// crates/layout/src/nodes/page_break.rs

use folio_traits::{BreakRequest, Canvas, Flowable};

/// Forces the following content onto a new page. A break at the very top of
/// an empty page is consumed without emitting a blank page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageBreak;

impl Flowable for PageBreak {
    fn wrap(&self, _avail_width: f32) -> f32 {
        0.0
    }

    fn draw(&self, _canvas: &mut dyn Canvas, _x: f32, _y: f32, _width: f32) {}

    fn page_break(&self) -> Option<BreakRequest> {
        Some(BreakRequest::default())
    }
}
