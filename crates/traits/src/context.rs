use crate::edits::{DeferredEdit, EditQueue};
use crate::notify::{Notification, NotificationSink};
use folio_types::{OutlineEntry, OutlineKey};

/// Per-pass state handed to the layout engine by the build controller.
pub struct PassContext<'a> {
    pass: usize,
    total_pages: Option<usize>,
    sink: &'a mut dyn NotificationSink,
    edits: &'a mut EditQueue,
}

impl<'a> PassContext<'a> {
    pub fn new(
        pass: usize,
        total_pages: Option<usize>,
        sink: &'a mut dyn NotificationSink,
        edits: &'a mut EditQueue,
    ) -> Self {
        Self {
            pass,
            total_pages,
            sink,
            edits,
        }
    }

    /// 1-based number of the running pass.
    pub fn pass(&self) -> usize {
        self.pass
    }

    /// The total page count, once the build has fixed it.
    pub fn total_pages(&self) -> Option<usize> {
        self.total_pages
    }

    pub fn notify(&mut self, note: Notification) {
        self.sink.notify(note);
    }

    /// Queues an edit to run after this pass.
    pub fn defer(&mut self, edit: DeferredEdit) {
        self.edits.push(edit);
    }

    /// A view for the item being placed on `page` (1-based).
    pub fn placement(&mut self, page: usize) -> PlacementContext<'_, 'a> {
        PlacementContext { page, pass: self }
    }
}

/// What an [`OnPlaced`](crate::OnPlaced) hook sees: the page it landed on plus
/// the channels it may publish to.
pub struct PlacementContext<'p, 'a> {
    page: usize,
    pass: &'p mut PassContext<'a>,
}

impl PlacementContext<'_, '_> {
    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> Option<usize> {
        self.pass.total_pages()
    }

    pub fn pass(&self) -> usize {
        self.pass.pass()
    }

    pub fn notify(&mut self, note: Notification) {
        self.pass.notify(note);
    }

    /// Makes the current page the target of `key`.
    pub fn bookmark_page(&mut self, key: OutlineKey) {
        let page = self.page;
        self.pass.notify(Notification::Bookmark { key, page });
    }

    /// Registers an outline node at depth `level` pointing at bookmark `key`.
    pub fn add_outline_entry(&mut self, title: impl Into<String>, key: OutlineKey, level: usize) {
        self.pass.notify(Notification::Outline(OutlineEntry {
            title: title.into(),
            key,
            level,
        }));
    }

    pub fn defer(&mut self, edit: DeferredEdit) {
        self.pass.defer(edit);
    }
}
