//! Stories described as JSON, for the command line.
//!
//! ```json
//! {
//!   "title": "Report",
//!   "toc": true,
//!   "blocks": [
//!     { "heading": { "text": "Intro" } },
//!     { "paragraph": "Some text." },
//!     { "page_break": true },
//!     { "signature": { "name": "A. Author", "location": "Oslo", "date": "2024-01-01" } }
//!   ]
//! }
//! ```

use crate::error::BuildError;
use crate::heading::{Heading, HeadingOptions};
use folio_layout::{PageBreak, Paragraph, RectoBreak, Spacer, TableOfContents, TextStyle, signature};
use folio_numbering::CounterChain;
use folio_traits::FlowableRef;
use serde::Deserialize;
use std::rc::Rc;

const TITLE_FONT_SIZE: f32 = 20.0;

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeadingBlock {
    pub text: String,
    #[serde(default)]
    pub level: usize,
    #[serde(default = "yes")]
    pub numbered: bool,
    #[serde(default = "yes")]
    pub toc: bool,
    #[serde(default = "yes")]
    pub outline: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignatureBlock {
    pub name: String,
    pub location: String,
    pub date: String,
    #[serde(default)]
    pub qualification: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Heading(HeadingBlock),
    Paragraph(String),
    /// `true` breaks the page, `false` is ignored.
    PageBreak(bool),
    /// Starts the following content on an odd page.
    RectoBreak(bool),
    Spacer(f32),
    Signature(SignatureBlock),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorySource {
    #[serde(default)]
    pub title: Option<String>,
    /// Put a table of contents, followed by a page break, before the blocks.
    #[serde(default)]
    pub toc: bool,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl StorySource {
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Turns the blocks into flowables, numbering headings with `counters`.
    pub fn into_story(self, counters: &mut CounterChain) -> Result<Vec<FlowableRef>, BuildError> {
        let mut story: Vec<FlowableRef> = Vec::with_capacity(self.blocks.len() + 3);
        if let Some(title) = &self.title {
            let style = TextStyle::default().with_font_size(TITLE_FONT_SIZE).with_spacing(0.0, 18.0);
            story.push(Rc::new(Paragraph::new(title.clone()).with_style(style)));
        }
        if self.toc {
            story.push(Rc::new(TableOfContents::new()));
            story.push(Rc::new(PageBreak));
        }

        for block in self.blocks {
            match block {
                Block::Heading(h) => {
                    let options = HeadingOptions {
                        numbered: h.numbered,
                        toc: h.toc,
                        outline: h.outline,
                        ..HeadingOptions::default()
                    };
                    story.push(Rc::new(Heading::new(h.text, h.level, counters, options)?));
                }
                Block::Paragraph(text) => story.push(Rc::new(Paragraph::new(text))),
                Block::PageBreak(true) => story.push(Rc::new(PageBreak)),
                Block::RectoBreak(true) => story.push(Rc::new(RectoBreak::new())),
                Block::PageBreak(false) | Block::RectoBreak(false) => {}
                Block::Spacer(height) => story.push(Rc::new(Spacer::new(height))),
                Block::Signature(s) => story.push(Rc::new(signature(
                    &s.name,
                    &s.location,
                    &s.date,
                    s.qualification.as_deref(),
                    TextStyle::default(),
                ))),
            }
        }
        log::debug!("Loaded story with {} item(s).", story.len());
        Ok(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_block_kind() {
        let source = StorySource::from_json(
            r#"{
                "title": "Report",
                "toc": true,
                "blocks": [
                    {"heading": {"text": "Intro"}},
                    {"heading": {"text": "Detail", "level": 1, "outline": false}},
                    {"paragraph": "Body"},
                    {"page_break": true},
                    {"recto_break": true},
                    {"spacer": 12.0},
                    {"signature": {"name": "N", "location": "L", "date": "D"}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(source.blocks.len(), 7);
        assert!(matches!(&source.blocks[1], Block::Heading(h) if h.level == 1 && !h.outline && h.toc));

        let mut counters = CounterChain::new();
        let story = source.into_story(&mut counters).unwrap();
        // title + toc + break + seven blocks
        assert_eq!(story.len(), 10);
        assert!(story[1].is_indexing());
    }

    #[test]
    fn disabled_breaks_are_skipped() {
        let source = StorySource::from_json(r#"{"blocks": [{"page_break": false}, {"paragraph": "x"}]}"#).unwrap();
        let story = source.into_story(&mut CounterChain::new()).unwrap();
        assert_eq!(story.len(), 1);
    }

    #[test]
    fn absurd_heading_level_is_rejected() {
        let source = StorySource::from_json(r#"{"blocks": [{"heading": {"text": "x", "level": 100000}}]}"#).unwrap();
        let err = source.into_story(&mut CounterChain::new()).unwrap_err();
        assert!(matches!(err, BuildError::Numbering(_)));
    }

    #[test]
    fn unknown_block_is_an_error() {
        let err = StorySource::from_json(r#"{"blocks": [{"image": "x.png"}]}"#).unwrap_err();
        assert!(matches!(err, BuildError::Json(_)));
    }
}
