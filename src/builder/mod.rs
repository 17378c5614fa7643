//! Multi-platform build orchestration for Python source folders.
//!
//! This module turns a source directory into distributable artifacts by
//! driving two external tools:
//!
//! | Platform | Tool | Architectures | Artifact |
//! |----------|------|---------------|----------|
//! | Linux | `fpm` | x86, x64, arm64 | `.deb` |
//! | Windows | `pyinstaller` | x86, x64 | one-file `.exe` per script |
//!
//! All output lands under `<output_root>/Builds/code/<source name>/executables`,
//! see [`OutputLayout`]. Tools run strictly one after another.
//!
//! # Integration
//!
//! ```no_run
//! use pybuild_packager::builder::{BuildSettingsBuilder, Orchestrator, SystemRunner};
//!
//! # async fn example() -> pybuild_packager::builder::Result<()> {
//! let settings = BuildSettingsBuilder::new("/work/MyApp")
//!     .output_root("/work")
//!     .version(Some("2.3"))
//!     .name(Some("My App"))
//!     .build();
//!
//! let report = Orchestrator::new(settings, SystemRunner).run().await?;
//! for record in report.records() {
//!     println!("{} {}: {}", record.platform, record.arch, record.invocation.command_line());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod icon;
mod layout;
mod orchestrator;
pub mod platform;
mod process;
mod report;
mod settings;
pub mod utils;

pub use error::{Context, Error, ErrorExt, Result};
pub use icon::{ICON_EXTENSIONS, find_icon};
pub use layout::{BUILDS_DIR, OutputLayout, builds_dir};
pub use orchestrator::Orchestrator;
pub use platform::BuildContext;
pub use process::{DryRunRunner, SystemRunner, ToolExit, ToolInvocation, ToolRunner};
pub use report::{BuildReport, InvocationRecord};
pub use settings::{
    Arch, BuildSettings, BuildSettingsBuilder, DEFAULT_NAME, DEFAULT_VERSION, FailurePolicy,
    Platform, ToolSettings, filter_architectures, normalize_package_name, resolve_version,
    select_platforms,
};
