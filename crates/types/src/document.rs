use crate::ids::{BookmarkId, OutlineKey};
use serde::Serialize;

/// An entry in the table of contents, emitted when a heading is placed.
///
/// Entries are appended in placement order and never mutated afterwards; the
/// ordered sequence of one pass is the table of contents for that pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TocEntry {
    /// Hierarchy depth, 0 for top-level sections.
    pub level: usize,
    /// The plain text of the heading, including its number label if any.
    pub text: String,
    /// 1-based page number the heading landed on.
    pub page: usize,
    /// Anchor the entry should link to.
    pub bookmark: BookmarkId,
}

impl TocEntry {
    pub fn new(level: usize, text: impl Into<String>, page: usize, bookmark: BookmarkId) -> Self {
        Self {
            level,
            text: text.into(),
            page,
            bookmark,
        }
    }
}

/// A navigable node of the document outline (PDF bookmarks panel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    pub title: String,
    pub key: OutlineKey,
    pub level: usize,
}
