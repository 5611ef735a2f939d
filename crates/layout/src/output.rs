//! Output types from the layout engine.
//!
//! A [`LaidOutDocument`] is the drawable page stream of one pass: every page
//! with its positioned drawing operations and named destinations.

use crate::config::PageGeometry;
use folio_traits::Canvas;
use folio_types::BookmarkId;

/// One positioned drawing operation. Coordinates are top-left based.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font_size: f32,
        text: String,
    },
    Rule {
        x: f32,
        y: f32,
        width: f32,
        thickness: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub ops: Vec<DrawOp>,
    /// Named destinations declared on this page, with their `y` position.
    pub anchors: Vec<(BookmarkId, f32)>,
}

impl Page {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ops: Vec::new(),
            anchors: Vec::new(),
        }
    }

    /// All text drawn on the page, one line per text operation.
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Rule { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Canvas for Page {
    fn draw_text(&mut self, x: f32, y: f32, font_size: f32, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text {
            x,
            y,
            font_size,
            text: text.to_string(),
        });
    }

    fn draw_rule(&mut self, x: f32, y: f32, width: f32, thickness: f32) {
        self.ops.push(DrawOp::Rule {
            x,
            y,
            width,
            thickness,
        });
    }

    fn add_anchor(&mut self, id: &BookmarkId, y: f32) {
        self.anchors.push((id.clone(), y));
    }
}

/// The pages produced by one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The page a named destination lives on, if it was declared.
    pub fn anchor_page(&self, id: &BookmarkId) -> Option<usize> {
        self.pages
            .iter()
            .find(|page| page.anchors.iter().any(|(anchor, _)| anchor == id))
            .map(|page| page.number)
    }
}
