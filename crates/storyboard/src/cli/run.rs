//! Storyboard generation command handler.

use crate::cli::output::print_storyboard;
use crate::cli::{Cli, OutputFormat};
use std::path::{Path, PathBuf};
use storyboard::{
    Credentials, FileSystemStorage, HuggingFaceDriver, ImageBatch, ImageRenderer, ModelsError,
    ModelsErrorKind, PipelineOptions, RateLimiter, StabilityDriver, Storyboard, StoryboardConfig,
    StoryboardPipeline, StoryboardResult, assemble, build_image_requests, validate_arguments,
    write_overview,
};
use tracing::{info, instrument, warn};

/// Run the full storyboard flow for one prompt.
///
/// Configuration and credentials are loaded once here and handed to the
/// drivers; nothing below this point reads the environment.
#[instrument(skip_all, fields(frames = cli.frames, skip_images = cli.skip_images, html = cli.html))]
pub async fn run_storyboard(cli: &Cli) -> StoryboardResult<()> {
    validate_arguments(&cli.prompt, cli.frames)?;

    let config = StoryboardConfig::load()?;
    let credentials = Credentials::from_env()?;

    if cli.format == OutputFormat::Human {
        println!("Processing prompt: {}", cli.prompt);
        println!("Generating {} frame descriptions...", cli.frames);
    }

    let driver = HuggingFaceDriver::new(credentials.hf_api_token(), &config.llm)?;
    let options = PipelineOptions::builder()
        .refinement_policy(cli.refinement)
        .build()
        .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;
    let pipeline = StoryboardPipeline::with_options(driver, options);

    let storyboard = pipeline.process_prompt(&cli.prompt, cli.frames).await?;

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.dir));

    let batch = if cli.skip_images {
        None
    } else {
        render_images(cli, &config, &credentials, &storyboard, &output_dir).await?
    };

    let assembled = batch
        .as_ref()
        .map(|batch| assemble(&storyboard, &batch.image_paths()));

    print_storyboard(cli.format, &storyboard, batch.as_ref(), assembled.as_ref())?;

    if cli.html {
        let assembled = assembled.unwrap_or_else(|| assemble(&storyboard, &[]));
        write_overview(&output_dir, &assembled).await?;
    }

    if let Some(batch) = batch.as_ref().filter(|b| b.is_partial()) {
        warn!(
            failed = batch.failures().len(),
            total = batch.len(),
            "Some frames have no image"
        );
    }

    info!("Done");
    Ok(())
}

/// Render every frame, or return `None` when image generation is unavailable.
async fn render_images(
    cli: &Cli,
    config: &StoryboardConfig,
    credentials: &Credentials,
    storyboard: &Storyboard,
    output_dir: &Path,
) -> StoryboardResult<Option<ImageBatch>> {
    let Some(api_key) = credentials.stability_api_key() else {
        warn!("STABILITY_API_KEY is not set, skipping image generation");
        return Ok(None);
    };

    let style = cli.style.as_deref().unwrap_or(&config.images.style);
    let negative = cli.negative.as_deref().unwrap_or(&config.images.negative);
    let requests = build_image_requests(storyboard, Some(style), Some(negative));

    let driver = StabilityDriver::new(
        api_key,
        credentials.organization_id().map(str::to_string),
        &config.images,
    )?;
    let store = FileSystemStorage::new(output_dir)?;
    let limiter = RateLimiter::new(&config.images.rate_limit);

    info!(count = requests.len(), dir = %output_dir.display(), "Generating images");
    let batch = ImageRenderer::new(driver, store, limiter)
        .render_all(requests)
        .await;

    Ok(Some(batch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use storyboard::StoryboardErrorKind;

    #[tokio::test]
    async fn test_arguments_checked_before_configuration() {
        let zero = Cli::try_parse_from(["storyboard", "-f", "0", "A flower"]).unwrap();
        let err = run_storyboard(&zero).await.unwrap_err();
        assert!(matches!(err.kind(), StoryboardErrorKind::InvalidArgument(_)));

        let blank = Cli::try_parse_from(["storyboard", "   "]).unwrap();
        let err = run_storyboard(&blank).await.unwrap_err();
        assert!(matches!(err.kind(), StoryboardErrorKind::InvalidArgument(_)));
    }
}
