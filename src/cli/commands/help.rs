//! Extended usage output.

use crate::cli::{EXTRA_HELP, RuntimeConfig};
use crate::error::Result;

/// Print the one-line flag summary
pub(super) fn execute_extrahelp(config: &RuntimeConfig) -> Result<()> {
    config.output().info(EXTRA_HELP)?;
    Ok(())
}
