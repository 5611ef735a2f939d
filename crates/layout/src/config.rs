use folio_types::{Edges, Rect};
use serde::{Deserialize, Serialize};

pub const POINTS_PER_CM: f32 = 72.0 / 2.54;

/// Page size, margins and padding, in points.
///
/// Content is laid out inside the *frame*: the page minus its margins minus
/// its padding. The footer, if any, is drawn inside the bottom margin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: Edges,
    pub padding: Edges,
    /// Footer template. `{page}` is replaced by the page number, `{total}` by
    /// the total page count once it is known (`?` before that).
    pub footer: Option<String>,
    pub footer_font_size: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // A4
        Self {
            width: 595.2756,
            height: 841.8898,
            margin: Edges::new(
                3.0 * POINTS_PER_CM,
                2.5 * POINTS_PER_CM,
                2.5 * POINTS_PER_CM,
                2.5 * POINTS_PER_CM,
            ),
            padding: Edges::uniform(6.0),
            footer: None,
            footer_font_size: 9.0,
        }
    }
}

impl PageGeometry {
    pub fn with_footer(mut self, template: impl Into<String>) -> Self {
        self.footer = Some(template.into());
        self
    }

    pub fn frame(&self) -> Rect {
        Rect::new(
            self.margin.left + self.padding.left,
            self.margin.top + self.padding.top,
            self.width - self.margin.horizontal() - self.padding.horizontal(),
            self.height - self.margin.vertical() - self.padding.vertical(),
        )
    }

    pub fn footer_text(&self, page: usize, total_pages: Option<usize>) -> Option<String> {
        let template = self.footer.as_ref()?;
        let total = total_pages.map_or_else(|| "?".to_string(), |t| t.to_string());
        Some(
            template
                .replace("{page}", &page.to_string())
                .replace("{total}", &total),
        )
    }
}
