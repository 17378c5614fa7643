//! Clean command implementation.
//!
//! Removes the whole `Builds/` directory under the output root, for every
//! source directory ever built there.

use crate::builder::{
    builds_dir,
    utils::fs::{remove_dir_all, resolve_path},
};
use crate::cli::{Args, RuntimeConfig};
use crate::error::{PackagerError, Result};

/// Execute clean command
pub(super) async fn execute_clean(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let output_root = resolve_path(&args.output_root)?;
    let dir = builds_dir(&output_root);
    config.verbose_println(&format!("Cleaning {}", dir.display()));

    match remove_dir_all(&dir).await {
        Ok(true) => {
            config.success_println(&format!("Removed {}", dir.display()));
            Ok(())
        }
        Ok(false) => {
            config
                .output()
                .info(&format!("Couldn't find: {}", dir.display()))?;
            Ok(())
        }
        Err(source) => Err(PackagerError::Clean { path: dir, source }),
    }
}
