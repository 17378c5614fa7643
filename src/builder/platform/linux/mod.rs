//! Linux bundling support.
//!
//! Only Debian packages are produced, through the [`debian`] driver. The
//! packaging itself is delegated to `fpm`, which must be installed on the
//! build host.

pub mod debian;

pub use debian::build_linux;
