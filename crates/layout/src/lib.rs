//! A reference [`LayoutEngine`](folio_traits::LayoutEngine) and the stock
//! flowables it understands.
//!
//! Text is measured with fixed metrics (every glyph is half an em wide, lines
//! are 1.2 em tall), which keeps pagination deterministic without any font
//! machinery.

pub mod config;
pub mod engine;
pub mod nodes;
pub mod output;
pub mod text;

pub use self::config::{POINTS_PER_CM, PageGeometry};
pub use self::engine::FlowLayoutEngine;
pub use self::nodes::{
    Group, HorizontalRule, PageBreak, Paragraph, RectoBreak, Spacer, TableOfContents, TextBlock,
    TextStyle, signature,
};
pub use self::output::{DrawOp, LaidOutDocument, Page};

pub use folio_traits::LayoutError;

#[cfg(test)]
mod test_utils;
