use crate::error::BuildError;
use folio_layout::PageGeometry;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_PASSES: usize = 10;

/// Settings of one build: the pass ceiling and the page geometry handed to
/// the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub max_passes: usize,
    pub page: PageGeometry,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            page: PageGeometry::default(),
        }
    }
}

impl BuildConfig {
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        let config: BuildConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn with_page(mut self, page: PageGeometry) -> Self {
        self.page = page;
        self
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.max_passes == 0 {
            return Err(BuildError::Config("max_passes must be at least 1".to_string()));
        }
        let frame = self.page.frame();
        if frame.width <= 0.0 || frame.height <= 0.0 {
            return Err(BuildError::Config(format!(
                "page frame is empty: {:.2}pt x {:.2}pt after margins and padding",
                frame.width, frame.height
            )));
        }
        Ok(())
    }
}
