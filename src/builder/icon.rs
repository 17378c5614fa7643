//! Icon discovery.

use std::path::{Path, PathBuf};

/// Extensions checked for `icon.<ext>`, highest priority first.
pub const ICON_EXTENSIONS: [&str; 5] = ["png", "ico", "jpg", "jpeg", "bmp"];

/// Returns the first `icon.<ext>` directly inside `source_dir`.
///
/// Only the top level is searched and names must match exactly. A missing
/// directory simply yields `None`; validating it is the caller's job.
pub fn find_icon(source_dir: &Path) -> Option<PathBuf> {
    ICON_EXTENSIONS
        .iter()
        .map(|ext| source_dir.join(format!("icon.{ext}")))
        .find(|candidate| candidate.is_file())
}
