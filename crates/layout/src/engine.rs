use crate::config::PageGeometry;
use crate::output::{LaidOutDocument, Page};
use folio_traits::{Canvas, FlowableRef, LayoutEngine, LayoutError, PassContext};
use std::collections::VecDeque;

const EPSILON: f32 = 0.001;

/// Single-frame page layout: items are stacked top to bottom and flow onto a
/// new page when the frame is full, splitting the item if it allows it.
#[derive(Debug, Clone)]
pub struct FlowLayoutEngine {
    geometry: PageGeometry,
    last: Option<LaidOutDocument>,
}

impl FlowLayoutEngine {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            last: None,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// The pages of the most recent pass, if any.
    pub fn last_pass(&self) -> Option<&LaidOutDocument> {
        self.last.as_ref()
    }

    fn draw_footers(&self, pages: &mut [Page], total_pages: Option<usize>) {
        let frame = self.geometry.frame();
        let size = self.geometry.footer_font_size;
        let y = self.geometry.height - self.geometry.margin.bottom + (self.geometry.margin.bottom - size) / 2.0;
        for page in pages {
            if let Some(text) = self.geometry.footer_text(page.number, total_pages) {
                page.draw_text(frame.x, y, size, &text);
            }
        }
    }
}

impl Default for FlowLayoutEngine {
    fn default() -> Self {
        Self::new(PageGeometry::default())
    }
}

/// Page bookkeeping of one pass.
struct Cursor {
    pages: Vec<Page>,
    y: f32,
    has_content: bool,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::new(1)],
            y: 0.0,
            has_content: false,
        }
    }

    fn page_number(&self) -> usize {
        self.pages.len()
    }

    fn page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        log::debug!("Starting page {}.", number);
        self.pages.push(Page::new(number));
        self.y = 0.0;
        self.has_content = false;
    }
}

fn fire_hook(item: &FlowableRef, page: usize, ctx: &mut PassContext<'_>) {
    if let Some(hook) = item.as_placement_hook() {
        hook.on_placed(&mut ctx.placement(page));
    }
}

impl LayoutEngine for FlowLayoutEngine {
    type Output = LaidOutDocument;

    fn place(&mut self, story: Vec<FlowableRef>, ctx: &mut PassContext<'_>) -> Result<usize, LayoutError> {
        let frame = self.geometry.frame();
        if frame.width <= 0.0 || frame.height <= 0.0 {
            return Err(LayoutError::Generic(format!(
                "page frame is empty ({:.2} x {:.2}); margins and padding exceed the page size",
                frame.width, frame.height
            )));
        }

        let mut queue: VecDeque<FlowableRef> = story.into();
        let mut cursor = Cursor::new();

        while let Some(item) = queue.pop_front() {
            if let Some(request) = item.page_break() {
                if cursor.has_content {
                    cursor.new_page();
                }
                for _ in 0..request.blank_pages {
                    cursor.new_page();
                }
                fire_hook(&item, cursor.page_number(), ctx);
                continue;
            }

            let height = item.wrap(frame.width);
            let available = frame.height - cursor.y;
            if height <= available + EPSILON {
                log::trace!("Placing {:?} on page {} at y={:.2}.", item, cursor.page_number(), cursor.y);
                let y = frame.y + cursor.y;
                item.draw(cursor.page(), frame.x, y, frame.width);
                cursor.y += height;
                cursor.has_content = true;
                fire_hook(&item, cursor.page_number(), ctx);
                continue;
            }

            if let Some((head, tail)) = item.split(frame.width, available) {
                queue.push_front(tail);
                queue.push_front(head);
                continue;
            }

            if cursor.has_content {
                cursor.new_page();
                queue.push_front(item);
                continue;
            }

            return Err(LayoutError::ElementTooLarge(height, frame.height));
        }

        self.draw_footers(&mut cursor.pages, ctx.total_pages());
        let page_count = cursor.pages.len();
        self.last = Some(LaidOutDocument {
            geometry: self.geometry.clone(),
            pages: cursor.pages,
        });
        Ok(page_count)
    }

    fn finish(&mut self) -> Result<LaidOutDocument, LayoutError> {
        self.last.take().ok_or(LayoutError::NothingPlaced)
    }
}
