//! What a pass publishes through the notification sink.

use folio_traits::{FlowableRef, Notification, NotificationSink};
use folio_types::{OutlineEntry, OutlineKey, TocEntry};
use std::collections::HashMap;

/// Table of contents, outline and bookmarks recorded during one pass.
///
/// The controller clears it before every pass, so after a build it holds the
/// records of the final pass only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentRecord {
    toc: Vec<TocEntry>,
    outline: Vec<OutlineEntry>,
    bookmarks: HashMap<OutlineKey, usize>,
}

impl DocumentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toc_entries(&self) -> &[TocEntry] {
        &self.toc
    }

    pub fn outline(&self) -> &[OutlineEntry] {
        &self.outline
    }

    pub fn bookmarks(&self) -> &HashMap<OutlineKey, usize> {
        &self.bookmarks
    }

    /// The page an outline key was bookmarked on.
    pub fn bookmark_page(&self, key: &OutlineKey) -> Option<usize> {
        self.bookmarks.get(key).copied()
    }

    pub fn clear(&mut self) {
        self.toc.clear();
        self.outline.clear();
        self.bookmarks.clear();
    }

    fn record(&mut self, note: &Notification) {
        match note {
            Notification::TocEntry(entry) => self.toc.push(entry.clone()),
            Notification::Bookmark { key, page } => {
                self.bookmarks.insert(key.clone(), *page);
            }
            Notification::Outline(entry) => self.outline.push(entry.clone()),
        }
    }
}

/// The sink handed to the layout engine for one pass: records every
/// notification, then forwards it to the story's indexing items.
pub(crate) struct PassSink<'a> {
    record: &'a mut DocumentRecord,
    listeners: &'a [FlowableRef],
}

impl<'a> PassSink<'a> {
    pub(crate) fn new(record: &'a mut DocumentRecord, listeners: &'a [FlowableRef]) -> Self {
        Self { record, listeners }
    }
}

impl NotificationSink for PassSink<'_> {
    fn notify(&mut self, note: Notification) {
        log::trace!("Notification {}: {:?}", note.kind(), note);
        self.record.record(&note);
        for listener in self.listeners {
            if let Some(indexing) = listener.as_indexing() {
                indexing.notify(&note);
            }
        }
    }
}
