//! Whole-file writes with atomic finalize.
//!
//! The body is written to `<dest>.part`, synced, then renamed over the
//! destination, so a destination path holds either the previous file or the
//! complete new one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `icon.png` → `icon.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Write `data` to `final_path`, replacing any existing file.
///
/// On error the temp file is removed and `final_path` is left untouched.
/// Returns the path that failed alongside the error.
pub fn write_atomically(final_path: &Path, data: &[u8]) -> Result<(), (PathBuf, io::Error)> {
    let tp = temp_path(final_path);
    let written = File::create(&tp)
        .and_then(|mut f| {
            f.write_all(data)?;
            f.sync_all()
        })
        .map_err(|e| (tp.clone(), e));
    if let Err(e) = written {
        let _ = fs::remove_file(&tp);
        return Err(e);
    }
    fs::rename(&tp, final_path).map_err(|e| {
        let _ = fs::remove_file(&tp);
        (final_path.to_path_buf(), e)
    })
}
