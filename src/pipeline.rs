use crate::config::BuildConfig;
use crate::error::BuildError;
use crate::template::DocTemplate;
use folio_numbering::CounterChain;
use folio_render_lopdf::LopdfRenderer;
use folio_traits::FlowableRef;
use folio_types::TocEntry;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// The result of a successful [`PdfPipeline`] run.
#[derive(Debug, Clone)]
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub passes: usize,
    pub pages: usize,
    pub toc: Vec<TocEntry>,
}

/// Builds a story with the stock layout engine and writes it as a PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfPipeline {
    config: BuildConfig,
    title: Option<String>,
}

impl PdfPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Runs the build. `compose` creates the story; headings must be numbered
    /// with the counter chain it is handed.
    pub fn generate<F>(&self, compose: F) -> Result<GeneratedPdf, BuildError>
    where
        F: FnOnce(&mut CounterChain) -> Result<Vec<FlowableRef>, BuildError>,
    {
        self.config.validate()?;
        let mut doc = DocTemplate::from_config(&self.config);
        let story = compose(doc.counters_mut())?;
        let passes = doc.build(&story)?;

        let laid_out = doc
            .take_output()
            .ok_or_else(|| BuildError::Config("build finished without output".to_string()))?;
        let mut renderer = LopdfRenderer::new();
        if let Some(title) = &self.title {
            renderer = renderer.with_title(title.clone());
        }
        let bytes = renderer.render(&laid_out, doc.outline(), doc.record().bookmarks())?;

        Ok(GeneratedPdf {
            bytes,
            passes,
            pages: laid_out.page_count(),
            toc: doc.toc_entries().to_vec(),
        })
    }

    pub fn generate_to_file<F>(&self, path: impl AsRef<Path>, compose: F) -> Result<GeneratedPdf, BuildError>
    where
        F: FnOnce(&mut CounterChain) -> Result<Vec<FlowableRef>, BuildError>,
    {
        let pdf = self.generate(compose)?;
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        std::io::Write::write_all(&mut writer, &pdf.bytes)?;
        std::io::Write::flush(&mut writer)?;
        log::info!("Wrote {} ({} pages).", path.as_ref().display(), pdf.pages);
        Ok(pdf)
    }
}
