//! Numbered section headings.
//!
//! A heading takes its label from the build's [`CounterChain`] when it is
//! constructed, and registers a table-of-contents entry and an outline node
//! every time the engine places it.

use folio_layout::{TextBlock, TextStyle};
use folio_numbering::{CounterChain, MAX_DEPTH, NumberingError, NumberingTemplate};
use folio_traits::{Canvas, Flowable, Indexing, Notification, OnPlaced, PlacementContext};
use folio_types::{BookmarkId, CounterName, OutlineKey, TocEntry};
use sha2::{Digest, Sha256};
use std::cell::Cell;

fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Font size and spacing used for a heading when none is given.
pub fn default_heading_style(level: usize) -> TextStyle {
    let size = 18.0 - 2.0 * level as f32;
    TextStyle::default()
        .with_font_size(size.max(10.0))
        .with_spacing(12.0, 6.0)
}

/// How a [`Heading`] numbers and registers itself.
#[derive(Debug, Clone)]
pub struct HeadingOptions {
    pub numbered: bool,
    pub toc: bool,
    pub outline: bool,
    pub style: Option<TextStyle>,
    /// Counters to number with instead of the `h0`..`hN` hierarchy. They must
    /// already be chained, one per level.
    pub template: Option<NumberingTemplate>,
}

impl Default for HeadingOptions {
    fn default() -> Self {
        Self {
            numbered: true,
            toc: true,
            outline: true,
            style: None,
            template: None,
        }
    }
}

impl HeadingOptions {
    pub fn unnumbered(mut self) -> Self {
        self.numbered = false;
        self
    }

    pub fn without_toc(mut self) -> Self {
        self.toc = false;
        self
    }

    pub fn without_outline(mut self) -> Self {
        self.outline = false;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_template(mut self, template: NumberingTemplate) -> Self {
        self.template = Some(template);
        self
    }
}

#[derive(Debug)]
pub struct Heading {
    /// Rendered text, label included.
    text: String,
    label: Option<String>,
    level: usize,
    bookmark: BookmarkId,
    toc: bool,
    outline: bool,
    style: TextStyle,
    page: Cell<Option<usize>>,
    previous_page: Cell<Option<usize>>,
}

impl Heading {
    pub fn new(
        text: impl Into<String>,
        level: usize,
        counters: &mut CounterChain,
        options: HeadingOptions,
    ) -> Result<Self, NumberingError> {
        let text = text.into();
        if level >= MAX_DEPTH {
            return Err(NumberingError::InvalidConfiguration(format!(
                "heading '{}' is at level {}, the deepest supported level is {}",
                text,
                level,
                MAX_DEPTH - 1
            )));
        }
        let label = if options.numbered {
            let template = match options.template {
                Some(template) if template.depth() != level + 1 => {
                    return Err(NumberingError::InvalidConfiguration(format!(
                        "heading '{}' at level {} needs {} counters, the template has {}",
                        text,
                        level,
                        level + 1,
                        template.depth()
                    )));
                }
                Some(template) => template,
                None => {
                    let template = NumberingTemplate::for_heading(level);
                    counters.ensure_hierarchy(&template)?;
                    template
                }
            };
            Some(counters.render(&template)?)
        } else {
            None
        };

        let text = match &label {
            Some(label) => format!("{label} {text}"),
            None => text,
        };
        let bookmark = Self::bookmark_for(&text, counters);
        log::trace!("Heading '{}' at level {} -> bookmark {}", text, level, bookmark);

        Ok(Self {
            style: options.style.unwrap_or_else(|| default_heading_style(level)),
            text,
            label,
            level,
            bookmark,
            toc: options.toc,
            outline: options.outline,
            page: Cell::new(None),
            previous_page: Cell::new(None),
        })
    }

    /// A numbered heading registered in both the table of contents and the
    /// outline.
    pub fn numbered(
        text: impl Into<String>,
        level: usize,
        counters: &mut CounterChain,
    ) -> Result<Self, NumberingError> {
        Self::new(text, level, counters, HeadingOptions::default())
    }

    /// The first heading with a given text gets the digest of that text; later
    /// ones with the same text get the digest salted with their occurrence.
    fn bookmark_for(text: &str, counters: &mut CounterChain) -> BookmarkId {
        let digest = sha256_hex(text);
        let occurrence = counters.next(&CounterName::new(format!("bookmark:{digest}")));
        if occurrence <= 1 {
            BookmarkId::from(digest)
        } else {
            BookmarkId::from(sha256_hex(&format!("{digest}#{occurrence}")))
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn bookmark(&self) -> &BookmarkId {
        &self.bookmark
    }

    /// The page this heading landed on in the most recent pass.
    pub fn page(&self) -> Option<usize> {
        self.page.get()
    }

    fn block(&self, width: f32) -> TextBlock {
        TextBlock::layout(&self.text, width, &self.style)
    }
}

impl Flowable for Heading {
    fn wrap(&self, avail_width: f32) -> f32 {
        self.block(avail_width).height()
    }

    fn draw(&self, canvas: &mut dyn Canvas, x: f32, y: f32, width: f32) {
        canvas.add_anchor(&self.bookmark, y);
        self.block(width).draw_lines(canvas, x, y);
    }

    fn as_indexing(&self) -> Option<&dyn Indexing> {
        Some(self)
    }

    fn as_placement_hook(&self) -> Option<&dyn OnPlaced> {
        Some(self)
    }
}

impl Indexing for Heading {
    fn is_satisfied(&self) -> bool {
        self.page.get() == self.previous_page.get()
    }

    fn reset(&self) {
        self.page.set(None);
        self.previous_page.set(None);
    }

    fn before_build(&self) {
        self.previous_page.set(self.page.take());
    }
}

impl OnPlaced for Heading {
    fn on_placed(&self, doc: &mut PlacementContext<'_, '_>) {
        let page = doc.current_page();
        self.page.set(Some(page));

        if self.toc {
            doc.notify(Notification::TocEntry(TocEntry::new(
                self.level,
                self.text.clone(),
                page,
                self.bookmark.clone(),
            )));
        }
        if self.outline {
            let key = OutlineKey::from(sha256_hex(&format!("{}{}", self.bookmark, page)));
            doc.bookmark_page(key.clone());
            doc.add_outline_entry(self.text.clone(), key, self.level);
        }
    }
}
