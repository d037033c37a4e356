//! CLI argument definitions.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use storyboard::RefinementPolicy;

/// Storyboard - generate a visual storyboard from a text prompt
#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Generate a visual storyboard from a text prompt", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The text prompt to convert
    pub prompt: String,

    /// The number of frames to generate
    #[arg(short, long, default_value_t = 5)]
    pub frames: u32,

    /// Style prompt added to every image generation (defaults to the configured style)
    #[arg(short, long)]
    pub style: Option<String>,

    /// Negative prompt for things to avoid in images (defaults to the configured one)
    #[arg(short, long)]
    pub negative: Option<String>,

    /// Skip image generation and only create frame descriptions
    #[arg(long)]
    pub skip_images: bool,

    /// Create an HTML overview file next to the images
    #[arg(long)]
    pub html: bool,

    /// Directory for images and the HTML overview (defaults to the configured one)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// What to do when the refinement pass does not restate every frame
    #[arg(long, default_value = "keep-initial")]
    pub refinement: RefinementPolicy,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for the storyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable frame listing
    Human,
    /// JSON output
    Json,
}
