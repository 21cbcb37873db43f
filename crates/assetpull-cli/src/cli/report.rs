//! Console progress lines. Human-readable only; not a stable format.

use assetpull_core::runner::{RunEvent, RunSummary};
use std::io::Write;
use std::path::Path;

const RULE_WIDTH: usize = 60;

fn rule(c: char) -> String {
    std::iter::repeat(c).take(RULE_WIDTH).collect()
}

/// Print one run event as it happens.
pub fn print_event(event: RunEvent<'_>) {
    match event {
        RunEvent::Started { manifest, .. } => {
            println!("{}", rule('='));
            println!("DOWNLOADING ASSETS");
            println!("{}", rule('='));
            println!("Generated: {}", manifest.generated_date().unwrap_or("Unknown"));
            if let Some(note) = manifest.note() {
                println!("Note: {}", note);
            }
            println!("{}", rule('='));
        }
        RunEvent::SectionStarted(section) => {
            println!();
            println!("[{}]", section.label.to_uppercase());
            println!("{}", rule('-'));
        }
        RunEvent::ItemStarted { filename } => {
            print!("  Downloading {}... ", filename);
            let _ = std::io::stdout().flush();
        }
        RunEvent::ItemFinished { task, outcome, .. } => match (task, outcome) {
            (Some(task), Ok(bytes)) => println!(
                "[OK] {} bytes -> {}",
                group_thousands(*bytes),
                task.destination.display()
            ),
            (_, Err(e)) => println!("[FAIL] {}", e),
            (None, Ok(_)) => println!("[OK]"),
        },
    }
}

/// Final tally after the batch.
pub fn print_summary(summary: &RunSummary, assets_root: &Path) {
    println!();
    println!("{}", rule('='));
    println!("DOWNLOAD SUMMARY");
    println!("{}", rule('='));
    println!("Total: {}", summary.total);
    println!("[OK] Downloaded: {}", summary.succeeded);
    println!("[FAIL] Failed: {}", summary.failed);
    println!("{}", rule('='));

    if summary.total == 0 {
        println!("\nNo assets listed in manifest.");
    } else if summary.failed == 0 {
        println!(
            "\n[OK] All assets downloaded ({} bytes) under {}",
            group_thousands(summary.bytes),
            assets_root.display()
        );
    } else {
        println!(
            "\n[WARNING] {} asset(s) failed to download. Check errors above.",
            summary.failed
        );
    }
}

pub fn print_cancelled() {
    println!("\n\n[CANCELLED] Download cancelled by user");
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
