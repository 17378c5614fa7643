//! Build orchestration.
//!
//! The [`Orchestrator`] runs one build pass:
//! 1. Validates the source directory
//! 2. Wipes and recreates `Builds/code/<name>/executables`
//! 3. Looks for an icon
//! 4. Runs the Linux driver, then the Windows driver, for the selected platforms
//! 5. Returns a [`BuildReport`] of everything attempted
//!
//! # Example
//!
//! ```no_run
//! use pybuild_packager::builder::{BuildSettingsBuilder, Orchestrator, SystemRunner};
//!
//! # async fn example() -> pybuild_packager::builder::Result<()> {
//! let settings = BuildSettingsBuilder::new("/work/MyApp")
//!     .platforms(true, false, false)
//!     .architectures(["x64", "arm64"])
//!     .build();
//!
//! let mut orchestrator = Orchestrator::new(settings, SystemRunner);
//! let report = orchestrator.run().await?;
//! println!("Output at: {}", report.output_base().display());
//! # Ok(())
//! # }
//! ```

use crate::builder::{
    error::{Error, Result},
    icon::find_icon,
    layout::OutputLayout,
    platform::{BuildContext, linux::build_linux, windows::build_windows},
    process::ToolRunner,
    report::BuildReport,
    settings::{BuildSettings, Platform},
};

/// Sequential build driver over a [`ToolRunner`].
#[derive(Debug)]
pub struct Orchestrator<R> {
    settings: BuildSettings,
    runner: R,
}

impl<R: ToolRunner> Orchestrator<R> {
    /// Creates an orchestrator for `settings` executing tools through `runner`.
    pub fn new(settings: BuildSettings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Settings this orchestrator builds with.
    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    /// The runner, e.g. to inspect what a dry run planned.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Output layout for the configured source directory.
    pub fn layout(&self) -> Result<OutputLayout> {
        let source = self.settings.source_dir();
        let build_name = source
            .file_name()
            .ok_or_else(|| Error::UnnamedSource(source.to_path_buf()))?;
        Ok(OutputLayout::new(
            self.settings.output_root(),
            build_name.to_string_lossy(),
        ))
    }

    /// Runs the full build pass.
    ///
    /// Returns the first propagated failure; tolerated tool failures and a
    /// skipped Windows phase are reported through the returned [`BuildReport`].
    pub async fn run(&mut self) -> Result<BuildReport> {
        let source = self.settings.source_dir();
        if !source.is_dir() {
            return Err(Error::SourceNotFound(source.to_path_buf()));
        }

        let layout = self.layout()?;
        layout.reset().await?;

        let icon = find_icon(self.settings.source_dir());
        match &icon {
            Some(icon) => log::debug!("Using icon {}", icon.display()),
            None => log::debug!("No icon found"),
        }

        let mut report = BuildReport::new(layout.base());
        let ctx = BuildContext {
            settings: &self.settings,
            layout: &layout,
            icon: icon.as_deref(),
        };

        if self.settings.targets(Platform::Linux) {
            let archs = self.settings.architectures(Platform::Linux);
            build_linux(ctx, &mut self.runner, archs, &mut report).await?;
        }
        if self.settings.targets(Platform::Windows) {
            let archs = self.settings.architectures(Platform::Windows);
            build_windows(ctx, &mut self.runner, archs, &mut report).await?;
        }

        log::info!("Build completed. Output at: {}", layout.base().display());
        Ok(report)
    }
}
