//! Platform-specific build drivers.
//!
//! | Platform | Tool | Output | Module |
//! |----------|------|--------|--------|
//! | Linux | `fpm` | `.deb` per architecture | [`linux`] |
//! | Windows | `pyinstaller` | one-file `.exe` per `.py` file and architecture | [`windows`] |
//!
//! Drivers run one invocation at a time and route every exit status through
//! [`run_tool`], which applies the configured [`FailurePolicy`].

pub mod linux;
pub mod windows;

use crate::builder::{
    error::{Error, Result},
    layout::OutputLayout,
    process::{ToolInvocation, ToolRunner},
    report::{BuildReport, InvocationRecord},
    settings::{Arch, BuildSettings, FailurePolicy, Platform},
};
use std::path::Path;

/// Inputs shared by both drivers for one run.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Resolved settings
    pub settings: &'a BuildSettings,
    /// Output paths
    pub layout: &'a OutputLayout,
    /// Discovered icon, if any
    pub icon: Option<&'a Path>,
}

impl BuildContext<'_> {
    /// Subtree both drivers must not read back while scanning the source directory.
    pub(crate) fn excluded_dir(&self) -> Option<&Path> {
        let builds = self.layout.builds_dir();
        builds
            .starts_with(self.settings.source_dir())
            .then_some(builds)
    }
}

/// Runs one invocation and applies `policy` to a non-zero exit.
///
/// Every attempt is recorded in `report`. A tolerated failure is logged and
/// returns `Ok`; otherwise [`Error::ToolFailed`] is returned. Spawn errors are
/// always returned.
pub(crate) async fn run_tool<R: ToolRunner>(
    runner: &mut R,
    invocation: ToolInvocation,
    platform: Platform,
    arch: Arch,
    policy: FailurePolicy,
    report: &mut BuildReport,
) -> Result<()> {
    log::info!("Running command: {}", invocation.command_line());
    let exit = runner.run(&invocation).await?;
    let command = invocation.command_line();
    report.record(InvocationRecord {
        platform,
        arch,
        invocation,
        exit,
    });

    if exit.success() {
        return Ok(());
    }

    let error = Error::ToolFailed {
        command,
        code: exit.code,
    };
    if policy.continues(platform) {
        log::warn!("{error} (continuing)");
        Ok(())
    } else {
        Err(error)
    }
}
