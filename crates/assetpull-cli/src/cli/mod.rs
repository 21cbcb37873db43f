//! CLI for assetpull.

mod commands;
mod report;

use anyhow::Result;
use assetpull_core::config::{self, AssetpullConfig, LayoutKind};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use commands::{run_fetch, run_plan};

/// Top-level CLI for the assetpull downloader.
#[derive(Debug, Parser)]
#[command(name = "assetpull")]
#[command(about = "Download design-export assets listed in a JSON manifest", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: ConfigArgs,

    /// Defaults to `fetch`.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// Config file selection and per-run overrides of its values.
#[derive(Debug, Default, Args)]
pub struct ConfigArgs {
    /// Config file to use instead of ~/.config/assetpull/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON manifest mapping filenames to URLs.
    #[arg(long, global = true, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Base directory the asset tree is written under.
    #[arg(long, global = true, value_name = "DIR")]
    pub assets_root: Option<PathBuf>,

    /// Per-request timeout in seconds (at least 1).
    #[arg(
        long,
        global = true,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Manifest shape to traverse.
    #[arg(long, global = true, value_enum)]
    pub layout: Option<LayoutArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    Auto,
    Flat,
    Modules,
}

impl From<LayoutArg> for LayoutKind {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Auto => LayoutKind::Auto,
            LayoutArg::Flat => LayoutKind::Flat,
            LayoutArg::Modules => LayoutKind::Modules,
        }
    }
}

impl ConfigArgs {
    /// Load the config file (explicit or XDG default) and apply overrides.
    pub fn load_config(&self) -> Result<AssetpullConfig> {
        let cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        let cfg = self.apply(cfg);
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply(&self, mut cfg: AssetpullConfig) -> AssetpullConfig {
        if let Some(path) = &self.manifest {
            cfg.manifest_path = path.clone();
            cfg.fallback_manifest_paths.clear();
        }
        if let Some(dir) = &self.assets_root {
            cfg.assets_root = dir.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.request_timeout_secs = secs;
        }
        if let Some(layout) = self.layout {
            cfg.layout = layout.into();
        }
        cfg
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Download every manifest entry into the assets tree.
    Fetch,

    /// Print where each manifest entry would be written, without downloading.
    Plan,
}

impl CliCommand {
    /// Returns the process exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();
        let cfg = cli.overrides.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command.unwrap_or(CliCommand::Fetch) {
            CliCommand::Fetch => run_fetch(cfg).await,
            CliCommand::Plan => run_plan(&cfg),
        }
    }
}

#[cfg(test)]
mod tests;
