//! Windows bundling support.
//!
//! One-file executables are produced by `pyinstaller` through the
//! [`pyinstaller`] driver.
//!
//! # Output Location
//!
//! - `windows-<arch>/<script>.exe` - frozen executable
//! - `windows-<arch>/build/` - pyinstaller work files
//! - `windows-<arch>/spec/` - generated `.spec` files

pub mod pyinstaller;

pub use pyinstaller::build_windows;
