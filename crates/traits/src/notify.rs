use folio_types::{OutlineEntry, OutlineKey, TocEntry};

/// A message emitted while content is being placed.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A heading asks to appear in the table of contents.
    TocEntry(TocEntry),
    /// Marks the current page as the target of `key`.
    Bookmark { key: OutlineKey, page: usize },
    /// Adds a node to the document outline, pointing at a previous bookmark.
    Outline(OutlineEntry),
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::TocEntry(_) => "TOCEntry",
            Notification::Bookmark { .. } => "Bookmark",
            Notification::Outline(_) => "Outline",
        }
    }
}

/// Receives notifications during a pass.
pub trait NotificationSink {
    fn notify(&mut self, note: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, note: Notification) {
        self.push(note);
    }
}
