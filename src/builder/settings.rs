//! Configuration structures for build orchestration.
//!
//! Holds the resolved inputs of one build run: which platforms to target,
//! which architectures each platform builds for, and the package metadata
//! handed to the external tools. Values are assembled through
//! [`BuildSettingsBuilder`], which applies the defaulting rules.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Version substituted when none is given or the given one is zero.
pub const DEFAULT_VERSION: &str = "1.0";

/// Package name used when none is given.
pub const DEFAULT_NAME: &str = "Unnamed";

/// CPU architecture for a build artifact.
///
/// # Examples
///
/// ```
/// use pybuild_packager::builder::Arch;
///
/// let arch: Arch = "arm64".parse().unwrap();
/// assert_eq!(arch, Arch::Arm64);
/// assert_eq!(arch.as_str(), "arm64");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Arch {
    /// 32-bit Intel
    X86,
    /// x86_64 / AMD64
    X64,
    /// AArch64
    Arm64,
}

impl Arch {
    /// Tag used on the command line, in directory names and as the `fpm -a` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86 => "x86",
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86" => Ok(Arch::X86),
            "x64" => Ok(Arch::X64),
            "arm64" => Ok(Arch::Arm64),
            other => Err(format!("unknown architecture '{other}'")),
        }
    }
}

/// Target operating system family.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    /// Debian packages built with `fpm`.
    Linux,
    /// One-file executables built with `pyinstaller`.
    Windows,
}

impl Platform {
    /// Architectures this platform can be built for.
    pub fn supported_architectures(&self) -> &'static [Arch] {
        match self {
            Platform::Linux => &[Arch::X86, Arch::X64, Arch::Arm64],
            Platform::Windows => &[Arch::X86, Arch::X64],
        }
    }

    /// Lowercase name used in status output.
    pub fn short_name(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        }
    }

    /// Whether a non-zero tool exit is tolerated when no policy is configured.
    ///
    /// Windows keeps going with the remaining files and architectures, Linux stops.
    pub fn tolerates_tool_failures(&self) -> bool {
        match self {
            Platform::Linux => false,
            Platform::Windows => true,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// What to do when an external tool exits unsuccessfully.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FailurePolicy {
    /// Each platform keeps its own behavior, see [`Platform::tolerates_tool_failures`].
    #[default]
    PerPlatform,
    /// Record the failure and continue on every platform.
    ContinueOnError,
    /// Abort the run on the first failure on every platform.
    FailFast,
}

impl FailurePolicy {
    /// Maps the `continue_on_error` setting onto a policy; `None` keeps per-platform defaults.
    pub fn from_continue_on_error(continue_on_error: Option<bool>) -> Self {
        match continue_on_error {
            None => FailurePolicy::PerPlatform,
            Some(true) => FailurePolicy::ContinueOnError,
            Some(false) => FailurePolicy::FailFast,
        }
    }

    /// Whether a failed invocation on `platform` should be recorded instead of propagated.
    pub fn continues(&self, platform: Platform) -> bool {
        match self {
            FailurePolicy::PerPlatform => platform.tolerates_tool_failures(),
            FailurePolicy::ContinueOnError => true,
            FailurePolicy::FailFast => false,
        }
    }
}

/// Computes the platform set from the three selection flags.
///
/// `both` wins over the individual flags, and no flag at all selects both.
/// Linux always comes first.
pub fn select_platforms(linux: bool, windows: bool, both: bool) -> Vec<Platform> {
    if both || (!linux && !windows) {
        return vec![Platform::Linux, Platform::Windows];
    }
    let mut platforms = Vec::with_capacity(1);
    if linux {
        platforms.push(Platform::Linux);
    }
    if windows {
        platforms.push(Platform::Windows);
    }
    platforms
}

/// Filters free-form architecture tags down to those `platform` supports.
///
/// Order and duplicates of the input are preserved. Unknown or unsupported
/// tags are dropped without error; an empty result falls back to `[x64]`.
pub fn filter_architectures<S: AsRef<str>>(platform: Platform, requested: &[S]) -> Vec<Arch> {
    let supported = platform.supported_architectures();
    let archs: Vec<Arch> = requested
        .iter()
        .filter_map(|tag| {
            let tag = tag.as_ref();
            match tag.parse::<Arch>() {
                Ok(arch) if supported.contains(&arch) => Some(arch),
                _ => {
                    log::debug!("Dropping architecture '{}' for {}", tag, platform);
                    None
                }
            }
        })
        .collect();

    if archs.is_empty() {
        vec![Arch::X64]
    } else {
        archs
    }
}

/// Resolves the package version, substituting [`DEFAULT_VERSION`] when unset.
///
/// Absent, blank and numerically zero values (`0`, `0.0`) count as unset.
/// Any other value is returned exactly as given.
pub fn resolve_version(version: Option<&str>) -> String {
    let Some(version) = version else {
        return DEFAULT_VERSION.to_string();
    };
    let trimmed = version.trim();
    if trimmed.is_empty() || trimmed.parse::<f64>().is_ok_and(|n| n == 0.0) {
        return DEFAULT_VERSION.to_string();
    }
    version.to_string()
}

/// Lowercases every alphabetic character, leaving digits and punctuation untouched.
///
/// ```
/// use pybuild_packager::builder::normalize_package_name;
///
/// assert_eq!(normalize_package_name("My App 2"), "my app 2");
/// ```
pub fn normalize_package_name(name: &str) -> String {
    name.chars()
        .flat_map(|c| {
            let lowered: Vec<char> = if c.is_alphabetic() {
                c.to_lowercase().collect()
            } else {
                vec![c]
            };
            lowered
        })
        .collect()
}

/// External programs invoked by the drivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    /// Freezer used for Windows executables
    pub pyinstaller: PathBuf,
    /// Packager used for Debian packages
    pub fpm: PathBuf,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            pyinstaller: PathBuf::from("pyinstaller"),
            fpm: PathBuf::from("fpm"),
        }
    }
}

/// Fully resolved configuration of one build run.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    source_dir: PathBuf,
    output_root: PathBuf,
    platforms: Vec<Platform>,
    linux_archs: Vec<Arch>,
    windows_archs: Vec<Arch>,
    version: String,
    name: String,
    tools: ToolSettings,
    failure_policy: FailurePolicy,
    dry_run: bool,
}

impl BuildSettings {
    /// Directory whose contents are packaged.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Directory that holds the `Builds/` tree.
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Platforms to build, Linux first.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Whether `platform` was selected.
    pub fn targets(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    /// Architectures to build for `platform`, never empty.
    pub fn architectures(&self, platform: Platform) -> &[Arch] {
        match platform {
            Platform::Linux => &self.linux_archs,
            Platform::Windows => &self.windows_archs,
        }
    }

    /// Package version label.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Package name as given (not normalized).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// External tool programs.
    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    /// How non-zero tool exits are handled.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// When set, invocations are reported but not executed.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// Builder for [`BuildSettings`].
///
/// ```
/// use pybuild_packager::builder::{Arch, BuildSettingsBuilder, Platform};
///
/// let settings = BuildSettingsBuilder::new("app")
///     .platforms(false, true, false)
///     .architectures(["x86", "arm64"])
///     .build();
///
/// assert_eq!(settings.platforms(), &[Platform::Windows]);
/// assert_eq!(settings.architectures(Platform::Windows), &[Arch::X86]);
/// assert_eq!(settings.architectures(Platform::Linux), &[Arch::X86, Arch::Arm64]);
/// assert_eq!(settings.version(), "1.0");
/// ```
#[derive(Debug, Clone)]
pub struct BuildSettingsBuilder {
    source_dir: PathBuf,
    output_root: PathBuf,
    platforms: Vec<Platform>,
    archs: Vec<String>,
    version: Option<String>,
    name: Option<String>,
    tools: ToolSettings,
    continue_on_error: Option<bool>,
    dry_run: bool,
}

impl BuildSettingsBuilder {
    /// Starts a builder for `source_dir`, writing under the current directory.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_root: PathBuf::from("."),
            platforms: select_platforms(false, false, false),
            archs: Vec::new(),
            version: None,
            name: None,
            tools: ToolSettings::default(),
            continue_on_error: None,
            dry_run: false,
        }
    }

    /// Sets the directory that holds `Builds/`.
    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Selects platforms from the `--linux`, `--windows` and `--both` flags.
    pub fn platforms(mut self, linux: bool, windows: bool, both: bool) -> Self {
        self.platforms = select_platforms(linux, windows, both);
        self
    }

    /// Sets the requested architecture tags; filtering happens in [`build`](Self::build).
    pub fn architectures<I, S>(mut self, archs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.archs = archs.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the package version.
    pub fn version(mut self, version: Option<impl Into<String>>) -> Self {
        self.version = version.map(Into::into);
        self
    }

    /// Sets the package name.
    pub fn name(mut self, name: Option<impl Into<String>>) -> Self {
        self.name = name.map(Into::into);
        self
    }

    /// Overrides the external programs.
    pub fn tools(mut self, tools: ToolSettings) -> Self {
        self.tools = tools;
        self
    }

    /// Sets the failure handling; `None` keeps per-platform defaults.
    pub fn continue_on_error(mut self, continue_on_error: Option<bool>) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Enables dry-run mode.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Applies defaults and architecture filtering.
    pub fn build(self) -> BuildSettings {
        BuildSettings {
            linux_archs: filter_architectures(Platform::Linux, &self.archs),
            windows_archs: filter_architectures(Platform::Windows, &self.archs),
            version: resolve_version(self.version.as_deref()),
            name: self.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
            source_dir: self.source_dir,
            output_root: self.output_root,
            platforms: self.platforms,
            tools: self.tools,
            failure_policy: FailurePolicy::from_continue_on_error(self.continue_on_error),
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_filter_keeps_supported_in_order() {
        let archs = filter_architectures(Platform::Linux, &["arm64", "ppc", "x86", "x64"]);
        assert_eq!(archs, vec![Arch::Arm64, Arch::X86, Arch::X64]);
    }

    #[test]
    fn windows_filter_drops_arm64() {
        let archs = filter_architectures(Platform::Windows, &["arm64", "x64", "x86"]);
        assert_eq!(archs, vec![Arch::X64, Arch::X86]);
    }

    #[test]
    fn empty_filter_result_falls_back_to_x64() {
        let none: [&str; 0] = [];
        assert_eq!(filter_architectures(Platform::Linux, &none), vec![Arch::X64]);
        assert_eq!(filter_architectures(Platform::Windows, &["arm64"]), vec![Arch::X64]);
        assert_eq!(filter_architectures(Platform::Linux, &["mips", "X64"]), vec![Arch::X64]);
    }

    #[test]
    fn duplicates_pass_through() {
        let archs = filter_architectures(Platform::Linux, &["x86", "x86"]);
        assert_eq!(archs, vec![Arch::X86, Arch::X86]);
    }

    #[test]
    fn platform_selection() {
        use Platform::*;
        assert_eq!(select_platforms(false, false, false), vec![Linux, Windows]);
        assert_eq!(select_platforms(true, false, false), vec![Linux]);
        assert_eq!(select_platforms(false, true, false), vec![Windows]);
        assert_eq!(select_platforms(true, true, false), vec![Linux, Windows]);
        assert_eq!(select_platforms(true, false, true), vec![Linux, Windows]);
        assert_eq!(select_platforms(false, true, true), vec![Linux, Windows]);
    }

    #[test]
    fn version_defaults() {
        assert_eq!(resolve_version(None), "1.0");
        assert_eq!(resolve_version(Some("0")), "1.0");
        assert_eq!(resolve_version(Some("0.0")), "1.0");
        assert_eq!(resolve_version(Some("")), "1.0");
        assert_eq!(resolve_version(Some("2.3")), "2.3");
        assert_eq!(resolve_version(Some("1.2.3-beta")), "1.2.3-beta");
        assert_eq!(resolve_version(Some(" 0 ")), "1.0");
        assert_eq!(resolve_version(Some(" 2.3 ")), " 2.3 ");
    }

    #[test]
    fn name_normalization_only_folds_letters() {
        assert_eq!(normalize_package_name("My App 2"), "my app 2");
        assert_eq!(normalize_package_name("Unnamed"), "unnamed");
        assert_eq!(normalize_package_name("Tool_V2.0-RC"), "tool_v2.0-rc");
        assert_eq!(normalize_package_name("ÄPFEL"), "äpfel");
    }

    #[test]
    fn failure_policy_matrix() {
        let per = FailurePolicy::from_continue_on_error(None);
        assert!(per.continues(Platform::Windows));
        assert!(!per.continues(Platform::Linux));

        let cont = FailurePolicy::from_continue_on_error(Some(true));
        assert!(cont.continues(Platform::Windows));
        assert!(cont.continues(Platform::Linux));

        let fast = FailurePolicy::from_continue_on_error(Some(false));
        assert!(!fast.continues(Platform::Windows));
        assert!(!fast.continues(Platform::Linux));
    }

    #[test]
    fn builder_applies_defaults() {
        let settings = BuildSettingsBuilder::new("src").build();
        assert_eq!(settings.name(), DEFAULT_NAME);
        assert_eq!(settings.version(), DEFAULT_VERSION);
        assert_eq!(settings.platforms(), &[Platform::Linux, Platform::Windows]);
        assert_eq!(settings.architectures(Platform::Linux), &[Arch::X64]);
        assert_eq!(settings.failure_policy(), FailurePolicy::PerPlatform);
        assert_eq!(settings.tools(), &ToolSettings::default());
        assert!(!settings.dry_run());
    }
}
