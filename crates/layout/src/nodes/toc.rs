// crates/layout/src/nodes/toc.rs

use crate::text::{line_height, text_width};
use folio_traits::{Canvas, Flowable, FlowableRef, Indexing, Notification};
use folio_types::TocEntry;
use std::cell::RefCell;
use std::rc::Rc;

const TITLE_SCALE: f32 = 1.4;
const TITLE_GAP: f32 = 6.0;

#[derive(Debug, Clone, PartialEq)]
enum TocRow {
    Title(String),
    Entry(TocEntry),
    Placeholder,
}

/// A table of contents fed by the `TOCEntry` notifications of a pass.
///
/// It draws the entries collected during the *previous* pass and is satisfied
/// once a pass collects exactly the entries it drew.
#[derive(Debug)]
pub struct TableOfContents {
    title: Option<String>,
    font_size: f32,
    level_indent: f32,
    entries: RefCell<Vec<TocEntry>>,
    last_entries: RefCell<Vec<TocEntry>>,
}

impl Default for TableOfContents {
    fn default() -> Self {
        Self {
            title: Some("Contents".to_string()),
            font_size: 10.0,
            level_indent: 15.0,
            entries: RefCell::new(Vec::new()),
            last_entries: RefCell::new(Vec::new()),
        }
    }
}

impl TableOfContents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// The entries drawn in the current pass.
    pub fn entries(&self) -> Vec<TocEntry> {
        self.last_entries.borrow().clone()
    }

    fn rows(&self) -> TocRows {
        let mut rows = Vec::new();
        if let Some(title) = &self.title {
            rows.push(TocRow::Title(title.clone()));
        }
        let last = self.last_entries.borrow();
        if last.is_empty() {
            rows.push(TocRow::Placeholder);
        } else {
            rows.extend(last.iter().cloned().map(TocRow::Entry));
        }
        TocRows {
            rows,
            font_size: self.font_size,
            level_indent: self.level_indent,
        }
    }
}

impl Flowable for TableOfContents {
    fn wrap(&self, avail_width: f32) -> f32 {
        self.rows().wrap(avail_width)
    }

    fn split(&self, avail_width: f32, avail_height: f32) -> Option<(FlowableRef, FlowableRef)> {
        self.rows().split(avail_width, avail_height)
    }

    fn draw(&self, canvas: &mut dyn Canvas, x: f32, y: f32, width: f32) {
        self.rows().draw(canvas, x, y, width);
    }

    fn as_indexing(&self) -> Option<&dyn Indexing> {
        Some(self)
    }
}

impl Indexing for TableOfContents {
    fn is_satisfied(&self) -> bool {
        *self.entries.borrow() == *self.last_entries.borrow()
    }

    fn reset(&self) {
        self.entries.borrow_mut().clear();
        self.last_entries.borrow_mut().clear();
    }

    fn before_build(&self) {
        let collected = std::mem::take(&mut *self.entries.borrow_mut());
        *self.last_entries.borrow_mut() = collected;
    }

    fn notify(&self, note: &Notification) {
        if let Notification::TocEntry(entry) = note {
            self.entries.borrow_mut().push(entry.clone());
        }
    }
}

/// The drawable rows of a table of contents; also the pieces it splits into.
#[derive(Debug, Clone)]
struct TocRows {
    rows: Vec<TocRow>,
    font_size: f32,
    level_indent: f32,
}

impl TocRows {
    fn row_height(&self, row: &TocRow) -> f32 {
        match row {
            TocRow::Title(_) => line_height(self.font_size * TITLE_SCALE) + TITLE_GAP,
            TocRow::Entry(_) | TocRow::Placeholder => line_height(self.font_size),
        }
    }

    fn draw_entry(&self, canvas: &mut dyn Canvas, entry: &TocEntry, x: f32, y: f32, width: f32) {
        let size = self.font_size;
        let text_x = x + entry.level as f32 * self.level_indent;
        canvas.draw_text(text_x, y, size, &entry.text);

        let page = entry.page.to_string();
        let page_x = x + width - text_width(&page, size);
        canvas.draw_text(page_x, y, size, &page);

        let glyph = text_width(".", size);
        let leader_start = text_x + text_width(&entry.text, size) + glyph;
        let leader_room = page_x - glyph - leader_start;
        if glyph > 0.0 && leader_room > glyph {
            let dots = (leader_room / glyph).floor() as usize;
            canvas.draw_text(leader_start, y, size, &".".repeat(dots));
        }
    }
}

impl Flowable for TocRows {
    fn wrap(&self, _avail_width: f32) -> f32 {
        self.rows.iter().map(|row| self.row_height(row)).sum()
    }

    fn split(&self, _avail_width: f32, avail_height: f32) -> Option<(FlowableRef, FlowableRef)> {
        let mut used = 0.0;
        let mut fitting = 0;
        for row in &self.rows {
            let h = self.row_height(row);
            if used + h > avail_height + 0.001 {
                break;
            }
            used += h;
            fitting += 1;
        }
        if fitting == 0 || fitting >= self.rows.len() {
            return None;
        }
        let part = |rows: &[TocRow]| -> FlowableRef {
            Rc::new(TocRows {
                rows: rows.to_vec(),
                font_size: self.font_size,
                level_indent: self.level_indent,
            })
        };
        Some((part(&self.rows[..fitting]), part(&self.rows[fitting..])))
    }

    fn draw(&self, canvas: &mut dyn Canvas, x: f32, y: f32, width: f32) {
        let mut row_y = y;
        for row in &self.rows {
            match row {
                TocRow::Title(title) => {
                    canvas.draw_text(x, row_y, self.font_size * TITLE_SCALE, title);
                }
                TocRow::Entry(entry) => self.draw_entry(canvas, entry, x, row_y, width),
                TocRow::Placeholder => {
                    canvas.draw_text(x, row_y, self.font_size, "Placeholder for table of contents");
                }
            }
            row_y += self.row_height(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Page;
    use folio_types::BookmarkId;

    fn entry(level: usize, text: &str, page: usize) -> TocEntry {
        TocEntry::new(level, text, page, BookmarkId::new(text))
    }

    #[test]
    fn unsatisfied_until_two_passes_agree() {
        let toc = TableOfContents::new();
        toc.before_build();
        toc.notify(&Notification::TocEntry(entry(0, "1 Intro", 1)));
        toc.after_build();
        assert!(!toc.is_satisfied());

        toc.before_build();
        toc.notify(&Notification::TocEntry(entry(0, "1 Intro", 1)));
        assert!(toc.is_satisfied());
        assert_eq!(toc.entries(), vec![entry(0, "1 Intro", 1)]);
    }

    #[test]
    fn page_change_breaks_satisfaction() {
        let toc = TableOfContents::new();
        toc.notify(&Notification::TocEntry(entry(0, "1 Intro", 1)));
        toc.before_build();
        toc.notify(&Notification::TocEntry(entry(0, "1 Intro", 2)));
        assert!(!toc.is_satisfied());
    }

    #[test]
    fn ignores_other_notifications() {
        let toc = TableOfContents::new();
        toc.notify(&Notification::Bookmark {
            key: "k".into(),
            page: 1,
        });
        assert!(toc.is_satisfied());
    }

    #[test]
    fn height_grows_with_entries() {
        let toc = TableOfContents::new().with_title(None);
        let empty = toc.wrap(400.0);
        toc.notify(&Notification::TocEntry(entry(0, "1 A", 1)));
        toc.notify(&Notification::TocEntry(entry(1, "1.1 B", 1)));
        toc.before_build();
        assert!(toc.wrap(400.0) > empty);
        assert!((toc.wrap(400.0) - 24.0).abs() < 0.001);
    }

    #[test]
    fn draws_text_leader_and_page_number() {
        let toc = TableOfContents::new().with_title(None);
        toc.notify(&Notification::TocEntry(entry(1, "1.1 Background", 3)));
        toc.before_build();

        let mut page = Page::new(1);
        toc.draw(&mut page, 0.0, 0.0, 300.0);
        let text = page.text();
        assert!(text.contains("1.1 Background"));
        assert!(text.contains("..."));
        assert!(text.lines().any(|line| line == "3"));
    }

    #[test]
    fn splits_by_rows() {
        let toc = TableOfContents::new().with_title(None);
        for i in 0..10 {
            toc.notify(&Notification::TocEntry(entry(0, &format!("{i} Part"), i + 1)));
        }
        toc.before_build();
        let (head, tail) = toc.split(300.0, 50.0).unwrap();
        assert!((head.wrap(300.0) - 48.0).abs() < 0.001);
        assert!((tail.wrap(300.0) - 72.0).abs() < 0.001);
        assert!(!head.is_indexing());
    }

    #[test]
    fn zero_font_size_draws_without_leaders() {
        let toc = TableOfContents::new().with_title(None).with_font_size(0.0);
        toc.notify(&Notification::TocEntry(entry(0, "1 Intro", 4)));
        toc.before_build();

        let mut page = Page::new(1);
        toc.draw(&mut page, 0.0, 0.0, 100.0);
        assert!(page.text().contains("1 Intro"));
        assert!(!page.text().contains('.'));
    }
}
