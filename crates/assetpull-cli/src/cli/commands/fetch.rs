//! `assetpull fetch` – download every manifest entry (the default command).

use anyhow::{Context, Result};
use assetpull_core::config::AssetpullConfig;
use assetpull_core::fetch::CurlClient;
use assetpull_core::runner;
use std::future::Future;

use crate::cli::report;

/// Exit code after Ctrl+C (128 + SIGINT).
const EXIT_INTERRUPTED: i32 = 130;

/// Runs the batch on a blocking thread and returns its exit code.
///
/// Ctrl+C ends the run immediately; files already written are kept.
pub async fn run_fetch(cfg: AssetpullConfig) -> Result<i32> {
    run_fetch_until(cfg, ctrl_c()).await
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("could not listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Like [`run_fetch`], but stops as soon as `interrupted` resolves.
async fn run_fetch_until<I>(cfg: AssetpullConfig, interrupted: I) -> Result<i32>
where
    I: Future<Output = ()>,
{
    let assets_root = cfg.assets_root.clone();
    let batch = tokio::task::spawn_blocking(move || {
        let client = CurlClient::new(cfg.connect_timeout());
        runner::load_and_run(&cfg, client, report::print_event)
    });

    tokio::select! {
        // An interrupt that races completion wins.
        biased;
        _ = interrupted => {
            tracing::warn!("run interrupted by user");
            report::print_cancelled();
            Ok(EXIT_INTERRUPTED)
        }
        joined = batch => {
            let summary = joined.context("download task failed")??;
            report::print_summary(&summary, &assets_root);
            Ok(summary.exit_code())
        }
    }
}
