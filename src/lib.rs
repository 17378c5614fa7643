//! # pybuild_packager
//!
//! Packages a folder of Python sources into distributable artifacts for
//! several platforms and architectures by driving external tools:
//!
//! - **Windows**: one-file executables built with `pyinstaller`
//! - **Linux**: Debian packages built with `fpm`
//!
//! ## Features
//!
//! - **Predictable layout**: everything lands in `Builds/code/<source name>/executables`
//! - **Architecture filtering**: x86/x64/arm64 for Linux, x86/x64 for Windows
//! - **Icon discovery**: `icon.png`, `icon.ico`, `icon.jpg`, `icon.jpeg`, `icon.bmp`
//! - **Failure policy**: per-platform defaults, or uniform continue / fail-fast
//! - **Dry run**: show every tool invocation without running it
//!
//! ## Usage
//!
//! ```bash
//! pybuild_packager ./MyApp                                   # both platforms, x64
//! pybuild_packager ./MyApp --linux --arch x64 arm64          # two .deb packages
//! pybuild_packager ./MyApp --windows --version 2.3 --dry-run # print pyinstaller calls
//! pybuild_packager --clean                                   # remove Builds/
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod builder;
pub mod cli;
pub mod error;

// Re-export main types for public API
pub use builder::{
    Arch, BuildReport, BuildSettings, BuildSettingsBuilder, FailurePolicy, Orchestrator,
    OutputLayout, Platform,
};
pub use cli::Args;
pub use error::{CliError, PackagerError, Result};
