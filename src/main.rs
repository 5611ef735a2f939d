use clap::Parser;
use folio::{BuildConfig, BuildError, PdfPipeline, StorySource};
use std::path::PathBuf;

/// Builds a PDF from a JSON story, re-running layout until page references settle.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
struct Args {
    /// Path to the JSON story.
    story: PathBuf,

    /// Where to write the PDF.
    output: PathBuf,

    /// Optional JSON build configuration (page geometry, pass ceiling).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the pass ceiling.
    #[arg(long)]
    max_passes: Option<usize>,
}

fn main() -> Result<(), BuildError> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BuildConfig::from_file(path)?,
        None => BuildConfig::default(),
    };
    if let Some(max_passes) = args.max_passes {
        config = config.with_max_passes(max_passes);
    }

    println!("Loading story from {}", args.story.display());
    let source = StorySource::from_json(&std::fs::read_to_string(&args.story)?)?;

    let mut pipeline = PdfPipeline::new().with_config(config);
    if let Some(title) = &source.title {
        pipeline = pipeline.with_title(title.clone());
    }

    let pdf = pipeline.generate_to_file(&args.output, |counters| source.into_story(counters))?;
    println!(
        "Successfully generated {} ({} pages, {} passes)",
        args.output.display(),
        pdf.pages,
        pdf.passes
    );
    Ok(())
}
