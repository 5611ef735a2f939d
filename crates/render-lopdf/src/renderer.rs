use crate::error::RenderError;
use crate::outline::{build_outlines, to_win_ansi};
use folio_layout::{DrawOp, LaidOutDocument, Page};
use folio_types::{OutlineEntry, OutlineKey};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::HashMap;
use std::io::Write;

/// Baseline offset of a line box, as a fraction of the font size.
const BASELINE_RATIO: f32 = 0.8;

/// Writes a [`LaidOutDocument`] as a PDF.
#[derive(Debug, Clone, Default)]
pub struct LopdfRenderer {
    title: Option<String>,
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `Title` entry of the document information dictionary.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn render(
        &self,
        laid_out: &LaidOutDocument,
        outline: &[OutlineEntry],
        bookmarks: &HashMap<OutlineKey, usize>,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buffer = Vec::new();
        self.write(laid_out, outline, bookmarks, &mut buffer)?;
        Ok(buffer)
    }

    pub fn write<W: Write>(
        &self,
        laid_out: &LaidOutDocument,
        outline: &[OutlineEntry],
        bookmarks: &HashMap<OutlineKey, usize>,
        writer: &mut W,
    ) -> Result<(), RenderError> {
        let mut doc = self.build(laid_out, outline, bookmarks)?;
        doc.save_to(writer)?;
        Ok(())
    }

    fn build(
        &self,
        laid_out: &LaidOutDocument,
        outline: &[OutlineEntry],
        bookmarks: &HashMap<OutlineKey, usize>,
    ) -> Result<Document, RenderError> {
        if laid_out.pages.is_empty() {
            return Err(RenderError::Other("document has no pages".to_string()));
        }
        let page_width = laid_out.geometry.width;
        let page_height = laid_out.geometry.height;

        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut page_ids: Vec<ObjectId> = Vec::with_capacity(laid_out.pages.len());
        let mut dests = Dictionary::new();
        for page in &laid_out.pages {
            let content = page_content(page, page_height);
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            for (anchor, y) in &page.anchors {
                let dest: Vec<Object> = vec![
                    Object::Reference(page_id),
                    "XYZ".into(),
                    Object::Null,
                    (page_height - y).into(),
                    Object::Null,
                ];
                dests.set(anchor.as_str().to_string(), dest);
            }
            page_ids.push(page_id);
        }
        log::debug!("Wrote {} page(s) and {} named destination(s).", page_ids.len(), dests.len());

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
        doc.objects.insert(
            pages_id,
            dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }
            .into(),
        );

        let mut catalog = dictionary! { "Type" => "Catalog", "Pages" => pages_id };
        if !dests.is_empty() {
            let dests_id = doc.add_object(dests);
            catalog.set("Dests", dests_id);
        }
        if let Some(outline_id) = build_outlines(&mut doc, outline, bookmarks, &page_ids, page_height) {
            catalog.set("Outlines", outline_id);
            catalog.set("PageMode", "UseOutlines");
        }
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = &self.title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
                "Producer" => Object::string_literal("folio"),
            });
            doc.trailer.set("Info", info_id);
        }

        Ok(doc)
    }
}

fn page_content(page: &Page, page_height: f32) -> Content {
    let mut operations = Vec::with_capacity(page.ops.len() * 5);
    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, font_size, text } => {
                let baseline_y = y + font_size * BASELINE_RATIO;
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), (*font_size).into()]));
                operations.push(Operation::new("Td", vec![(*x).into(), (page_height - baseline_y).into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule { x, y, width, thickness } => {
                operations.push(Operation::new(
                    "re",
                    vec![
                        (*x).into(),
                        (page_height - y - thickness).into(),
                        (*width).into(),
                        (*thickness).into(),
                    ],
                ));
                operations.push(Operation::new("f", vec![]));
            }
        }
    }
    Content { operations }
}
