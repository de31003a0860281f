mod bootstrap;

use analytics_core::settings::Settings;
use analytics_runtime::pipeline::run_pipeline;
use anyhow::{Context, Result};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("call-analytics v{} starting", env!("CARGO_PKG_VERSION"));

    let config = settings.pipeline_config()?;
    tracing::debug!("Pipeline config: {:?}", config);

    let summary = run_pipeline(&config).context("pipeline run failed")?;

    tracing::info!(
        "Done in {:.3}s: {} users, {} call logs, {} analytics rows",
        summary.elapsed_seconds,
        summary.users.rows_accepted,
        summary.call_logs.rows_accepted,
        summary.analytics_rows,
    );

    if let Some(path) = &settings.summary_file {
        summary
            .save_to(path)
            .with_context(|| format!("failed to write run summary to {}", path.display()))?;
        tracing::info!("Run summary written to {}", path.display());
    }

    Ok(())
}
