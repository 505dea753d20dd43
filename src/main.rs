use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use rekognition_labels::{run, Config, RekognitionDetector};

fn main() -> Result<()> {
    let config = Config::new();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let request = config.request().context("Invalid request")?;
    let detector = RekognitionDetector::new(&config.client_settings())
        .with_context(|| format!("Failed to create client for region {}", config.region))?;

    let stdout = io::stdout();
    run(&detector, &request, &mut stdout.lock()).with_context(|| {
        format!(
            "Failed to detect labels for s3://{}/{}",
            request.bucket(),
            request.key()
        )
    })?;

    Ok(())
}
