// crates/layout/src/nodes/paragraph.rs

use crate::text::{line_height, wrap_lines};
use folio_traits::{Canvas, Flowable, FlowableRef};
use std::rc::Rc;

/// Font size and vertical spacing of a run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            space_before: 0.0,
            space_after: 6.0,
            left_indent: 0.0,
        }
    }
}

impl TextStyle {
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub fn with_left_indent(mut self, indent: f32) -> Self {
        self.left_indent = indent;
        self
    }

    pub fn line_height(&self) -> f32 {
        line_height(self.font_size)
    }
}

/// Lines that have already been broken, plus the style to draw them with.
///
/// This is what a [`Paragraph`] turns into once it knows its width, and what
/// the two halves of a split are made of.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    lines: Vec<String>,
    style: TextStyle,
}

impl TextBlock {
    pub fn new(lines: Vec<String>, style: TextStyle) -> Self {
        Self { lines, style }
    }

    /// Breaks `text` for a frame of `width` points.
    pub fn layout(text: &str, width: f32, style: &TextStyle) -> Self {
        let lines = wrap_lines(text, width - style.left_indent, style.font_size);
        Self::new(lines, style.clone())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn height(&self) -> f32 {
        self.style.space_before + self.lines.len() as f32 * self.style.line_height() + self.style.space_after
    }

    /// Splits between lines so that the first part fits in `avail_height`.
    ///
    /// At least one line must fit and at least one must move on, otherwise
    /// there is nothing useful to split.
    pub fn split_at_height(&self, avail_height: f32) -> Option<(TextBlock, TextBlock)> {
        let usable = avail_height - self.style.space_before;
        if usable <= 0.0 {
            return None;
        }
        let fitting = ((usable + 0.001) / self.style.line_height()).floor() as usize;
        if fitting == 0 || fitting >= self.lines.len() {
            return None;
        }

        let head = TextBlock::new(
            self.lines[..fitting].to_vec(),
            TextStyle {
                space_after: 0.0,
                ..self.style.clone()
            },
        );
        let tail = TextBlock::new(
            self.lines[fitting..].to_vec(),
            TextStyle {
                space_before: 0.0,
                ..self.style.clone()
            },
        );
        Some((head, tail))
    }

    pub fn draw_lines(&self, canvas: &mut dyn Canvas, x: f32, y: f32) {
        let mut line_y = y + self.style.space_before;
        for line in &self.lines {
            canvas.draw_text(x + self.style.left_indent, line_y, self.style.font_size, line);
            line_y += self.style.line_height();
        }
    }
}

impl Flowable for TextBlock {
    fn wrap(&self, _avail_width: f32) -> f32 {
        self.height()
    }

    fn split(&self, _avail_width: f32, avail_height: f32) -> Option<(FlowableRef, FlowableRef)> {
        let (head, tail) = self.split_at_height(avail_height)?;
        Some((Rc::new(head), Rc::new(tail)))
    }

    fn draw(&self, canvas: &mut dyn Canvas, x: f32, y: f32, _width: f32) {
        self.draw_lines(canvas, x, y);
    }
}

/// Plain body text.
#[derive(Debug, Clone)]
pub struct Paragraph {
    text: String,
    style: TextStyle,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn block(&self, width: f32) -> TextBlock {
        TextBlock::layout(&self.text, width, &self.style)
    }
}

impl Flowable for Paragraph {
    fn wrap(&self, avail_width: f32) -> f32 {
        self.block(avail_width).height()
    }

    fn split(&self, avail_width: f32, avail_height: f32) -> Option<(FlowableRef, FlowableRef)> {
        self.block(avail_width).split(avail_width, avail_height)
    }

    fn draw(&self, canvas: &mut dyn Canvas, x: f32, y: f32, width: f32) {
        self.block(width).draw_lines(canvas, x, y);
    }
}
