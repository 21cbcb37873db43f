//! Batch runner: walks a [`Layout`] over a [`Manifest`], resolving and fetching
//! every leaf entry once, in order, and tallies the outcome.

use crate::config::{AssetpullConfig, LayoutKind};
use crate::fetch::{FetchError, Fetcher, HttpClient};
use crate::layout::{Layout, Section};
use crate::manifest::{LeafEntry, Manifest, ManifestError};
use crate::resolve::resolve_destination;
use std::path::{Path, PathBuf};

/// One file to download, derived from a leaf entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub filename: String,
    pub url: String,
    pub destination: PathBuf,
}

/// Counters for a finished (or in-progress) run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Bytes written by successful fetches.
    pub bytes: u64,
}

impl RunSummary {
    fn record(&mut self, outcome: &Result<u64, FetchError>) {
        self.total += 1;
        match outcome {
            Ok(n) => {
                self.succeeded += 1;
                self.bytes += n;
            }
            Err(_) => self.failed += 1,
        }
    }

    /// 0 if nothing failed, else 1.
    pub fn exit_code(&self) -> i32 {
        if self.failed == 0 {
            0
        } else {
            1
        }
    }
}

/// Progress notifications emitted during a run, in order.
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// Manifest loaded and layout chosen; nothing fetched yet.
    Started {
        manifest: &'a Manifest,
        layout: &'a Layout,
    },
    /// A section present in the manifest is about to be processed.
    SectionStarted(&'a Section),
    /// A leaf entry is about to be fetched.
    ItemStarted { filename: &'a str },
    /// A leaf entry finished. `task` is `None` when it could not be resolved.
    ItemFinished {
        filename: &'a str,
        task: Option<&'a DownloadTask>,
        outcome: &'a Result<u64, FetchError>,
    },
}

/// A leaf entry with its resolved task (or the reason it has none).
#[derive(Debug)]
pub struct PlannedItem {
    pub section: String,
    pub filename: String,
    pub task: Result<DownloadTask, FetchError>,
}

/// Turn a leaf entry into a task: resolve the destination, require a string URL.
pub fn build_task(
    assets_root: &Path,
    kind: LayoutKind,
    section: &Section,
    entry: &LeafEntry,
) -> Result<DownloadTask, FetchError> {
    let destination = resolve_destination(assets_root, kind, section, &entry.filename)?;
    let url = entry.url.clone().ok_or_else(|| FetchError::InvalidUrl {
        url: String::new(),
        reason: format!("value for {:?} is not a string", entry.filename),
    })?;
    Ok(DownloadTask {
        filename: entry.filename.clone(),
        url,
        destination,
    })
}

/// Resolve every leaf entry without touching the network.
pub fn plan(manifest: &Manifest, layout: &Layout, assets_root: &Path) -> Vec<PlannedItem> {
    let mut items = Vec::new();
    for section in &layout.sections {
        let Some(entries) = manifest.leaf_entries(&layout.key_path(section)) else {
            continue;
        };
        for entry in &entries {
            items.push(PlannedItem {
                section: section.label.clone(),
                filename: entry.filename.clone(),
                task: build_task(assets_root, layout.kind, section, entry),
            });
        }
    }
    items
}

/// Sequential resolve-then-fetch loop over a layout.
pub struct BatchRunner<C> {
    fetcher: Fetcher<C>,
    assets_root: PathBuf,
}

impl<C: HttpClient> BatchRunner<C> {
    pub fn new(fetcher: Fetcher<C>, assets_root: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            assets_root: assets_root.into(),
        }
    }

    /// Build a runner from config values around `client`.
    pub fn from_config(cfg: &AssetpullConfig, client: C) -> Self {
        Self::new(
            Fetcher::new(client, cfg.request_timeout()),
            cfg.assets_root.clone(),
        )
    }

    /// Attempt every leaf entry of every present section exactly once.
    ///
    /// Per-item failures are recorded and reported through `on_event`; they
    /// never stop the run.
    pub fn run<F>(&self, manifest: &Manifest, layout: &Layout, mut on_event: F) -> RunSummary
    where
        F: FnMut(RunEvent<'_>),
    {
        let mut summary = RunSummary::default();
        on_event(RunEvent::Started { manifest, layout });

        for section in &layout.sections {
            let Some(entries) = manifest.leaf_entries(&layout.key_path(section)) else {
                tracing::debug!(section = %section.label, "section not in manifest");
                continue;
            };
            on_event(RunEvent::SectionStarted(section));

            for entry in &entries {
                on_event(RunEvent::ItemStarted {
                    filename: &entry.filename,
                });
                let (task, outcome) =
                    match build_task(&self.assets_root, layout.kind, section, entry) {
                        Ok(t) => {
                            let outcome = self.fetcher.fetch(&t.url, &t.destination);
                            (Some(t), outcome)
                        }
                        Err(e) => (None, Err(e)),
                    };
                match (&task, &outcome) {
                    (Some(t), Ok(n)) => tracing::info!(
                        file = %t.filename,
                        dest = %t.destination.display(),
                        bytes = n,
                        "downloaded"
                    ),
                    (_, Err(e)) => {
                        tracing::warn!(file = %entry.filename, error = %e, "download failed")
                    }
                    (None, Ok(_)) => {}
                }
                summary.record(&outcome);
                on_event(RunEvent::ItemFinished {
                    filename: &entry.filename,
                    task: task.as_ref(),
                    outcome: &outcome,
                });
            }
        }

        tracing::info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "run finished"
        );
        summary
    }
}

/// Load the configured manifest, pick its layout and run the whole batch.
///
/// Manifest errors abort before any request is issued.
pub fn load_and_run<C, F>(
    cfg: &AssetpullConfig,
    client: C,
    on_event: F,
) -> Result<RunSummary, ManifestError>
where
    C: HttpClient,
    F: FnMut(RunEvent<'_>),
{
    let manifest_path = cfg.effective_manifest_path();
    let manifest = Manifest::load(manifest_path)?;
    let layout = Layout::for_manifest(cfg.layout, &manifest);
    tracing::info!(
        manifest = %manifest_path.display(),
        layout = ?layout.kind,
        sections = layout.sections.len(),
        "starting batch"
    );
    let runner = BatchRunner::from_config(cfg, client);
    Ok(runner.run(&manifest, &layout, on_event))
}
