use folio_traits::{Canvas, Flowable};

/// Fixed vertical space.
#[derive(Debug, Clone, Copy)]
pub struct Spacer {
    height: f32,
}

impl Spacer {
    pub fn new(height: f32) -> Self {
        Self { height }
    }
}

impl Flowable for Spacer {
    fn wrap(&self, _avail_width: f32) -> f32 {
        self.height
    }

    fn draw(&self, _canvas: &mut dyn Canvas, _x: f32, _y: f32, _width: f32) {}
}
