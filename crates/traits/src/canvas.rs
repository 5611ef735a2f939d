use folio_types::BookmarkId;

/// Drawing primitives a flowable may use. Coordinates are in points with the
/// origin at the top-left corner of the page and `y` growing downwards.
pub trait Canvas {
    /// Draws one line of text whose top edge is at `y`.
    fn draw_text(&mut self, x: f32, y: f32, font_size: f32, text: &str);

    /// Draws a horizontal rule starting at (`x`, `y`).
    fn draw_rule(&mut self, x: f32, y: f32, width: f32, thickness: f32);

    /// Declares a named destination at `y` on the current page.
    fn add_anchor(&mut self, id: &BookmarkId, y: f32);
}
