use folio_traits::{Canvas, Flowable};

/// A horizontal line spanning a fraction of the frame width.
#[derive(Debug, Clone)]
pub struct HorizontalRule {
    width_fraction: f32,
    thickness: f32,
    space_before: f32,
    space_after: f32,
}

impl HorizontalRule {
    pub fn new(width_fraction: f32, thickness: f32) -> Self {
        Self {
            width_fraction: width_fraction.clamp(0.0, 1.0),
            thickness,
            space_before: 0.0,
            space_after: 0.0,
        }
    }

    pub fn with_spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }
}

impl Flowable for HorizontalRule {
    fn wrap(&self, _avail_width: f32) -> f32 {
        self.space_before + self.thickness + self.space_after
    }

    fn draw(&self, canvas: &mut dyn Canvas, x: f32, y: f32, width: f32) {
        canvas.draw_rule(x, y + self.space_before, width * self.width_fraction, self.thickness);
    }
}
