//! `assetpull plan` – show resolved destinations without downloading.

use anyhow::Result;
use assetpull_core::config::AssetpullConfig;
use assetpull_core::layout::Layout;
use assetpull_core::manifest::Manifest;
use assetpull_core::runner::{self, PlannedItem};

/// Prints one line per leaf entry. Exit code 1 if any entry cannot be resolved.
pub fn run_plan(cfg: &AssetpullConfig) -> Result<i32> {
    let manifest = Manifest::load(cfg.effective_manifest_path())?;
    let layout = Layout::for_manifest(cfg.layout, &manifest);
    let items = runner::plan(&manifest, &layout, &cfg.assets_root);

    if items.is_empty() {
        println!("No assets listed in manifest.");
        return Ok(0);
    }

    let mut current_section: Option<&str> = None;
    for item in &items {
        if current_section != Some(item.section.as_str()) {
            println!("[{}]", item.section);
            current_section = Some(item.section.as_str());
        }
        println!("  {}", plan_line(item));
    }

    let unresolved = items.iter().filter(|i| i.task.is_err()).count();
    println!("{} entries, {} unresolved", items.len(), unresolved);
    Ok(if unresolved == 0 { 0 } else { 1 })
}

fn plan_line(item: &PlannedItem) -> String {
    match &item.task {
        Ok(task) => format!("{} -> {}", task.filename, task.destination.display()),
        Err(e) => format!("{} -> [FAIL] {}", item.filename, e),
    }
}
