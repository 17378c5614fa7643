//! Command line argument parsing and validation.

use crate::builder::{BuildSettings, BuildSettingsBuilder, ToolSettings};
use clap::Parser;
use std::path::PathBuf;

/// One-line summary of every flag, printed by `--extrahelp`.
pub const EXTRA_HELP: &str = "Flags: source (Path to project dir), --linux (flag to build for linux), \
--windows (flag to build for windows), --both (flag to build for both), \
--arch (Architectures x86 x64 and arm64), --version (String), --name (String), \
--clean (flag), --continue-on-error / --fail-fast (flag), --dry-run (flag), \
--output-root (Path), --pyinstaller (Path), --fpm (Path), --help (flag)";

/// Cross-platform and multi-arch build script
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pybuild_packager",
    about = "Cross-platform and multi-arch build script",
    long_about = "Package a folder of Python sources into Windows one-file executables (pyinstaller) \
and Debian packages (fpm) for several architectures.

Output is written to Builds/code/<source name>/executables.

Usage:
  pybuild_packager ./MyApp
  pybuild_packager ./MyApp --linux --arch x64 arm64 --version 2.3 --name \"My App\"
  pybuild_packager --clean"
)]
pub struct Args {
    /// Path to the folder containing your code
    #[arg(
        index = 1,
        value_name = "SOURCE",
        required_unless_present_any = ["clean", "extrahelp"]
    )]
    pub source: Option<PathBuf>,

    /// Build for Linux
    #[arg(long)]
    pub linux: bool,

    /// Build for Windows
    #[arg(long)]
    pub windows: bool,

    /// Build for both Linux and Windows
    #[arg(long)]
    pub both: bool,

    /// Architectures: x86, x64, arm64
    #[arg(long, num_args = 1.., value_name = "ARCH")]
    pub arch: Vec<String>,

    /// Version number for the package/executable
    #[arg(long, value_name = "VERSION")]
    pub version: Option<String>,

    /// Name for the package/executable
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Clean/Remove build dir
    #[arg(long)]
    pub clean: bool,

    /// Some extra help with flags
    #[arg(long)]
    pub extrahelp: bool,

    /// Directory that holds the Builds/ tree
    #[arg(long, value_name = "DIR", env = "PYBUILD_OUTPUT_ROOT", default_value = ".")]
    pub output_root: PathBuf,

    /// Freezer program used for Windows builds
    #[arg(long, value_name = "PATH", env = "PYBUILD_PYINSTALLER", default_value = "pyinstaller")]
    pub pyinstaller: PathBuf,

    /// Packaging program used for Linux builds
    #[arg(long, value_name = "PATH", env = "PYBUILD_FPM", default_value = "fpm")]
    pub fpm: PathBuf,

    /// Keep going after a tool fails, on every platform
    #[arg(long, conflicts_with = "fail_fast")]
    pub continue_on_error: bool,

    /// Stop at the first tool failure, on every platform
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the tool invocations without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Show debug detail
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.extrahelp || self.clean {
            return Ok(());
        }
        match &self.source {
            Some(source) if source.as_os_str().is_empty() => {
                Err("Source directory must not be empty".to_string())
            }
            Some(_) => Ok(()),
            None => Err("Source directory is required".to_string()),
        }
    }

    /// `None` keeps each platform's own failure handling.
    pub fn continue_on_error(&self) -> Option<bool> {
        match (self.continue_on_error, self.fail_fast) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }

    /// Assembles build settings for an already resolved source directory and output root.
    pub fn build_settings(&self, source_dir: PathBuf, output_root: PathBuf) -> BuildSettings {
        BuildSettingsBuilder::new(source_dir)
            .output_root(output_root)
            .platforms(self.linux, self.windows, self.both)
            .architectures(self.arch.iter().cloned())
            .version(self.version.clone())
            .name(self.name.clone())
            .tools(ToolSettings {
                pyinstaller: self.pyinstaller.clone(),
                fpm: self.fpm.clone(),
            })
            .continue_on_error(self.continue_on_error())
            .dry_run(self.dry_run)
            .build()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print info message
    pub fn info_println(&self, message: &str) {
        let _ = self.output.info(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.output.is_quiet()
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{Arch, FailurePolicy, Platform};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pybuild_packager").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn arch_takes_several_values() {
        let args = parse(&["app", "--linux", "--arch", "x64", "arm64"]);
        assert_eq!(args.arch, vec!["x64", "arm64"]);
        assert!(args.linux);
        assert_eq!(args.source, Some(PathBuf::from("app")));
    }

    #[test]
    fn version_is_a_value_not_a_flag() {
        let args = parse(&["app", "--version", "2.3"]);
        assert_eq!(args.version.as_deref(), Some("2.3"));
    }

    #[test]
    fn source_optional_for_clean_and_extrahelp() {
        assert!(parse(&["--clean"]).source.is_none());
        assert!(parse(&["--extrahelp"]).source.is_none());
        assert!(Args::try_parse_from(["pybuild_packager", "--linux"]).is_err());
    }

    #[test]
    fn failure_flags_conflict() {
        assert!(
            Args::try_parse_from(["pybuild_packager", "app", "--continue-on-error", "--fail-fast"])
                .is_err()
        );
        assert_eq!(parse(&["app"]).continue_on_error(), None);
        assert_eq!(parse(&["app", "--fail-fast"]).continue_on_error(), Some(false));
        assert_eq!(parse(&["app", "--continue-on-error"]).continue_on_error(), Some(true));
    }

    #[test]
    fn settings_from_args() {
        let args = parse(&[
            "app", "--windows", "--arch", "arm64", "x86", "--version", "0", "--name", "My App",
            "--fail-fast",
        ]);
        let settings = args.build_settings(PathBuf::from("/w/app"), PathBuf::from("/w"));
        assert_eq!(settings.platforms(), &[Platform::Windows]);
        assert_eq!(settings.architectures(Platform::Windows), &[Arch::X86]);
        assert_eq!(settings.architectures(Platform::Linux), &[Arch::Arm64, Arch::X86]);
        assert_eq!(settings.version(), "1.0");
        assert_eq!(settings.name(), "My App");
        assert_eq!(settings.failure_policy(), FailurePolicy::FailFast);
        assert_eq!(settings.output_root(), PathBuf::from("/w").as_path());
    }

    #[test]
    fn validate_requires_source_for_builds() {
        let mut args = parse(&["--clean"]);
        assert!(args.validate().is_ok());
        args.clean = false;
        assert!(args.validate().is_err());
    }
}
