//! Output directory layout.
//!
//! Every path the drivers write to is derived here from an explicit output
//! root, so nothing depends on the process working directory:
//!
//! ```text
//! <root>/Builds/code/<build_name>/executables/
//! ├── <arch>/package/usr/local/bin/...   (Linux, one per architecture)
//! └── windows-<arch>/                    (Windows, one per architecture)
//!     ├── build/
//!     └── spec/
//! ```

use crate::builder::{
    error::{ErrorExt, Result},
    settings::Arch,
};
use std::path::{Path, PathBuf};

/// Top-level directory holding every build, removed by `--clean`.
pub const BUILDS_DIR: &str = "Builds";

/// Paths of one build run, keyed by the source directory's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    builds_dir: PathBuf,
    base: PathBuf,
}

impl OutputLayout {
    /// Layout for `build_name` beneath `output_root`.
    pub fn new(output_root: &Path, build_name: impl Into<String>) -> Self {
        let builds_dir = builds_dir(output_root);
        let base = builds_dir
            .join("code")
            .join(build_name.into())
            .join("executables");
        Self { builds_dir, base }
    }

    /// The shared `Builds/` directory.
    pub fn builds_dir(&self) -> &Path {
        &self.builds_dir
    }

    /// `Builds/code/<build_name>/executables`.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Working directory of the Linux packager for `arch`.
    pub fn linux_dir(&self, arch: Arch) -> PathBuf {
        self.base.join(arch.as_str())
    }

    /// Package root handed to `fpm` as `package/=/`.
    pub fn linux_package_dir(&self, arch: Arch) -> PathBuf {
        self.linux_dir(arch).join("package")
    }

    /// Where the source tree is copied for `arch`.
    pub fn linux_bin_dir(&self, arch: Arch) -> PathBuf {
        self.linux_package_dir(arch).join("usr").join("local").join("bin")
    }

    /// Distribution directory of the freezer for `arch`.
    pub fn windows_dir(&self, arch: Arch) -> PathBuf {
        self.base.join(format!("windows-{}", arch.as_str()))
    }

    /// Freezer work directory for `arch`.
    pub fn windows_work_dir(&self, arch: Arch) -> PathBuf {
        self.windows_dir(arch).join("build")
    }

    /// Freezer spec directory for `arch`.
    pub fn windows_spec_dir(&self, arch: Arch) -> PathBuf {
        self.windows_dir(arch).join("spec")
    }

    /// Removes any previous output for this build name and recreates the base.
    ///
    /// Runs unconditionally, whichever platforms the new build targets.
    pub async fn reset(&self) -> Result<()> {
        if tokio::fs::try_exists(&self.base).await.unwrap_or(false) {
            log::info!("Removing previous output at {}", self.base.display());
            tokio::fs::remove_dir_all(&self.base)
                .await
                .fs_context("removing previous output", &self.base)?;
        }
        tokio::fs::create_dir_all(&self.base)
            .await
            .fs_context("creating output base", &self.base)?;
        Ok(())
    }
}

/// `Builds/` beneath `output_root`.
pub fn builds_dir(output_root: &Path) -> PathBuf {
    output_root.join(BUILDS_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_follow_the_documented_tree() {
        let layout = OutputLayout::new(Path::new("/out"), "MyApp");
        assert_eq!(layout.builds_dir(), Path::new("/out/Builds"));
        assert_eq!(layout.base(), Path::new("/out/Builds/code/MyApp/executables"));
        assert_eq!(
            layout.linux_bin_dir(Arch::Arm64),
            Path::new("/out/Builds/code/MyApp/executables/arm64/package/usr/local/bin")
        );
        assert_eq!(
            layout.windows_dir(Arch::X86),
            Path::new("/out/Builds/code/MyApp/executables/windows-x86")
        );
        assert_eq!(
            layout.windows_spec_dir(Arch::X64),
            Path::new("/out/Builds/code/MyApp/executables/windows-x64/spec")
        );
    }

    #[tokio::test]
    async fn reset_wipes_previous_output_only_for_this_build() {
        let root = TempDir::new().unwrap();
        let layout = OutputLayout::new(root.path(), "MyApp");
        let stale = layout.base().join("windows-x64").join("old.exe");
        std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
        std::fs::write(&stale, b"old").unwrap();

        let other = OutputLayout::new(root.path(), "Other");
        std::fs::create_dir_all(other.base()).unwrap();

        layout.reset().await.unwrap();

        assert!(layout.base().is_dir());
        assert!(!stale.exists());
        assert!(other.base().is_dir());
    }
}
