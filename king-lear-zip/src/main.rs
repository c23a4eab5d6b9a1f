//! Writes the King Lear fixture archive to `out.zip`

use anyhow::{Context, Result};
use king_lear_zip::{FixtureConfig, build_fixture};

fn main() -> Result<()> {
    // Progress goes to stderr; RUST_LOG overrides the level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = FixtureConfig::default();
    let summary = build_fixture(&config)
        .with_context(|| format!("failed to generate {}", config.output_path.display()))?;

    log::info!(
        "wrote {} entries ({} bytes) to {}",
        summary.entries,
        summary.archive_size,
        summary.output_path.display()
    );

    Ok(())
}
