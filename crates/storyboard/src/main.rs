//! Storyboard CLI binary.
//!
//! Converts a text prompt into a refined sequence of frame descriptions,
//! optionally renders each frame into an image and writes an HTML overview.

use clap::Parser;
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let cli = cli::Cli::parse();

    // A missing .env file is fine; real environment variables still apply
    dotenvy::dotenv().ok();

    storyboard::init_logging(cli.verbose);

    match cli::run_storyboard(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Storyboard generation failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
