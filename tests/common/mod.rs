use folio::layout::{FlowLayoutEngine, PageGeometry};
use folio::traits::{Canvas, Flowable, FlowableRef, Indexing};
use folio::{BuildConfig, DocTemplate, Heading};
use lopdf::{Document as LopdfDocument, Object};
use std::rc::Rc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A controller over the stock engine with default A4 geometry.
pub fn a4_template() -> DocTemplate<FlowLayoutEngine> {
    DocTemplate::from_config(&BuildConfig::default())
}

pub fn template_with(page: PageGeometry) -> DocTemplate<FlowLayoutEngine> {
    DocTemplate::from_config(&BuildConfig::default().with_page(page))
}

/// Numbered headings for `(text, level)` pairs, in order.
pub fn sections(
    doc: &mut DocTemplate<FlowLayoutEngine>,
    specs: &[(&str, usize)],
) -> Result<Vec<Rc<Heading>>, folio::BuildError> {
    specs
        .iter()
        .map(|(text, level)| Ok(Rc::new(Heading::numbered(*text, *level, doc.counters_mut())?)))
        .collect()
}

/// An indexing item that never settles.
#[derive(Debug, Default)]
pub struct Restless;

impl Flowable for Restless {
    fn wrap(&self, _avail_width: f32) -> f32 {
        0.0
    }

    fn draw(&self, _canvas: &mut dyn Canvas, _x: f32, _y: f32, _width: f32) {}

    fn as_indexing(&self) -> Option<&dyn Indexing> {
        Some(self)
    }
}

impl Indexing for Restless {
    fn is_satisfied(&self) -> bool {
        false
    }
}

pub fn as_story<T: Flowable + 'static>(items: &[Rc<T>]) -> Vec<FlowableRef> {
    items.iter().map(|item| Rc::clone(item) as FlowableRef).collect()
}

/// Wrapper around a generated PDF with helper methods
pub struct PdfCheck {
    pub doc: LopdfDocument,
}

impl PdfCheck {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            doc: LopdfDocument::load_mem(bytes)?,
        })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Raw content stream of a 1-based page, lossily decoded.
    pub fn page_content(&self, page: u32) -> Result<String, Box<dyn std::error::Error>> {
        let pages = self.doc.get_pages();
        let id = pages.get(&page).ok_or("no such page")?;
        Ok(String::from_utf8_lossy(&self.doc.get_page_content(*id)?).into_owned())
    }

    /// `Count` of the outline root: the number of top-level outline items.
    pub fn outline_count(&self) -> Result<i64, Box<dyn std::error::Error>> {
        let id = self.doc.catalog()?.get(b"Outlines")?.as_reference()?;
        Ok(self.doc.get_object(id)?.as_dict()?.get(b"Count")?.as_i64()?)
    }

    pub fn named_destination_count(&self) -> Result<usize, Box<dyn std::error::Error>> {
        let dests = match self.doc.catalog()?.get(b"Dests")? {
            Object::Reference(id) => self.doc.get_object(*id)?.as_dict()?,
            other => other.as_dict()?,
        };
        Ok(dests.len())
    }
}
