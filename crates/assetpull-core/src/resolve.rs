//! Destination path resolution: static `(category, filename)` overrides with a
//! per-section default directory.
//!
//! Overrides belong to the multi-module export; the flat export writes every
//! file to its section directory.

use crate::config::LayoutKind;
use crate::fetch::FetchError;
use crate::layout::{rel_dir, Section};
use std::path::{Component, Path, PathBuf};

struct Override {
    category: &'static str,
    filename: &'static str,
    dir: &'static str,
}

/// Files that belong somewhere other than their section's directory.
const OVERRIDES: &[Override] = &[
    Override {
        category: "service_detail_screen",
        filename: "star_1.png",
        dir: "images",
    },
    Override {
        category: "common_icons",
        filename: "icon_back_arrow.png",
        dir: "images",
    },
    Override {
        category: "module3_add_location",
        filename: "map_farwaniyah.png",
        dir: "service_booking/maps",
    },
];

/// Override directory for `filename` within `category`, if any.
pub fn override_dir(kind: LayoutKind, category: &str, filename: &str) -> Option<&'static str> {
    if kind != LayoutKind::Modules {
        return None;
    }
    OVERRIDES
        .iter()
        .find(|o| o.category == category && o.filename == filename)
        .map(|o| o.dir)
}

/// Resolve where `filename` from `section` is written below `assets_root`.
///
/// Rejects filenames that are not a single plain path component so a manifest
/// cannot direct writes outside the assets root.
pub fn resolve_destination(
    assets_root: &Path,
    kind: LayoutKind,
    section: &Section,
    filename: &str,
) -> Result<PathBuf, FetchError> {
    check_filename(filename)?;
    let dir = override_dir(kind, section.category(), filename)
        .unwrap_or(section.dest_dir.as_str());
    Ok(assets_root.join(rel_dir(dir)).join(filename))
}

fn check_filename(filename: &str) -> Result<(), FetchError> {
    let invalid = || FetchError::InvalidFilename(filename.to_string());
    if filename.is_empty() || filename.contains(['/', '\\', '\0']) {
        return Err(invalid());
    }
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid()),
    }
}
