use pybuild_packager::builder::{
    Arch, BuildSettings, BuildSettingsBuilder, Error, Orchestrator, OutputLayout, Platform,
    Result, ToolExit, ToolInvocation, ToolRunner,
};
use std::collections::VecDeque;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Records invocations instead of running tools.
#[derive(Debug, Default, Clone)]
struct RecordingRunner {
    missing: Vec<PathBuf>,
    exits: VecDeque<ToolExit>,
    calls: Vec<ToolInvocation>,
    staged_main_py: Vec<bool>,
}

impl RecordingRunner {
    fn with_exits(codes: &[i32]) -> Self {
        Self {
            exits: codes.iter().map(|&c| ToolExit { code: Some(c) }).collect(),
            ..Default::default()
        }
    }

    fn without(mut self, program: &str) -> Self {
        self.missing.push(PathBuf::from(program));
        self
    }
}

impl ToolRunner for RecordingRunner {
    fn locate(&self, program: &Path) -> Result<PathBuf> {
        if self.missing.iter().any(|m| m == program) {
            return Err(Error::ToolNotFound {
                tool: program.display().to_string(),
                reason: "not on PATH".into(),
            });
        }
        Ok(PathBuf::from("/usr/bin").join(program))
    }

    async fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolExit> {
        let staged = invocation
            .get_current_dir()
            .map(|dir| dir.join("package/usr/local/bin/main.py").is_file())
            .unwrap_or(false);
        self.staged_main_py.push(staged);
        self.calls.push(invocation.clone());
        Ok(self.exits.pop_front().unwrap_or(ToolExit::SUCCESS))
    }
}

struct Fixture {
    _tmp: TempDir,
    root: PathBuf,
    source: PathBuf,
}

impl Fixture {
    fn new(name: &str, files: &[&str]) -> Self {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().to_path_buf();
        let source = root.join(name);
        fs::create_dir_all(&source).unwrap();
        for file in files {
            let path = source.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"print('hi')\n").unwrap();
        }
        Self {
            _tmp: tmp,
            root,
            source,
        }
    }

    fn settings(&self) -> BuildSettingsBuilder {
        BuildSettingsBuilder::new(&self.source).output_root(&self.root)
    }

    fn layout(&self) -> OutputLayout {
        let name = self.source.file_name().unwrap().to_string_lossy().into_owned();
        OutputLayout::new(&self.root, name)
    }
}

async fn run(settings: BuildSettings, runner: RecordingRunner) -> (Result<()>, RecordingRunner) {
    let mut orchestrator = Orchestrator::new(settings, runner);
    let result = orchestrator.run().await.map(|_| ());
    let runner = orchestrator.runner().clone();
    (result, runner)
}

#[tokio::test]
async fn windows_single_script_with_icon() {
    let fx = Fixture::new("MyApp", &["main.py", "icon.ico"]);
    let settings = fx.settings().platforms(false, true, false).architectures(["x64"]).build();

    let (result, runner) = run(settings, RecordingRunner::default()).await;
    result.unwrap();

    assert_eq!(runner.calls.len(), 1);
    let call = &runner.calls[0];
    let dist = fx.layout().windows_dir(Arch::X64);
    assert!(call.has_arg("--onefile"));
    assert_eq!(call.arg_after("--icon"), Some(fx.source.join("icon.ico").as_os_str()));
    assert_eq!(call.arg_after("--distpath"), Some(dist.as_os_str()));
    assert!(dist.ends_with("Builds/code/MyApp/executables/windows-x64"));
    assert_eq!(call.get_args().last().unwrap(), fx.source.join("main.py").as_os_str());
    assert_eq!(call.env_value("PYINSTALLER_PLATFORM"), Some("win_amd64"));
    assert!(dist.join("build").is_dir());
    assert!(dist.join("spec").is_dir());
}

#[tokio::test]
async fn linux_two_architectures_copy_then_package() {
    let fx = Fixture::new("MyApp", &["main.py", "lib/helpers.py", "data/config.json"]);
    let settings = fx
        .settings()
        .platforms(true, false, false)
        .architectures(["x64", "arm64"])
        .build();

    let (result, runner) = run(settings, RecordingRunner::default()).await;
    result.unwrap();

    let layout = fx.layout();
    assert_eq!(runner.calls.len(), 2);
    assert_eq!(
        runner.calls[0].get_current_dir(),
        Some(layout.linux_dir(Arch::X64).as_path())
    );
    assert_eq!(
        runner.calls[1].get_current_dir(),
        Some(layout.linux_dir(Arch::Arm64).as_path())
    );
    assert_eq!(runner.staged_main_py, vec![true, true]);
    assert_eq!(runner.calls[1].arg_after("-a"), Some(OsStr::new("arm64")));

    for arch in [Arch::X64, Arch::Arm64] {
        let bin = layout.linux_bin_dir(arch);
        assert!(bin.join("lib/helpers.py").is_file());
        assert!(bin.join("data/config.json").is_file());
    }
}

#[tokio::test]
async fn linux_name_and_version_reach_fpm() {
    let fx = Fixture::new("MyApp", &["main.py"]);
    let settings = fx
        .settings()
        .platforms(true, false, false)
        .name(Some("My App 2"))
        .version(Some("0"))
        .build();

    let (result, runner) = run(settings, RecordingRunner::default()).await;
    result.unwrap();

    let call = &runner.calls[0];
    assert_eq!(call.program(), Path::new("fpm"));
    assert_eq!(call.arg_after("-n"), Some(OsStr::new("my app 2")));
    assert_eq!(call.arg_after("-v"), Some(OsStr::new("1.0")));
    assert_eq!(call.arg_after("-t"), Some(OsStr::new("deb")));
    assert_eq!(call.arg_after("-s"), Some(OsStr::new("dir")));
    assert!(call.has_arg("package/=/"));
}

#[tokio::test]
async fn previous_output_is_wiped_even_for_one_platform() {
    let fx = Fixture::new("MyApp", &["main.py"]);
    let layout = fx.layout();
    let stale_exe = layout.windows_dir(Arch::X86).join("old.exe");
    fs::create_dir_all(stale_exe.parent().unwrap()).unwrap();
    fs::write(&stale_exe, b"old").unwrap();

    let settings = fx.settings().platforms(true, false, false).build();
    let (result, _) = run(settings, RecordingRunner::default()).await;
    result.unwrap();

    assert!(!stale_exe.exists());
    assert!(!layout.windows_dir(Arch::X86).exists());
    assert!(layout.linux_bin_dir(Arch::X64).join("main.py").is_file());
}

#[tokio::test]
async fn missing_freezer_skips_windows_only() {
    let fx = Fixture::new("MyApp", &["main.py"]);
    let settings = fx.settings().build();

    let mut orchestrator =
        Orchestrator::new(settings, RecordingRunner::default().without("pyinstaller"));
    let report = orchestrator.run().await.unwrap();

    assert!(report.was_skipped(Platform::Windows));
    assert!(!report.was_skipped(Platform::Linux));
    assert_eq!(report.records_for(Platform::Linux).count(), 1);
    assert_eq!(report.records_for(Platform::Windows).count(), 0);
    assert!(!fx.layout().windows_dir(Arch::X64).exists());
}

#[tokio::test]
async fn scripts_are_frozen_in_sorted_order_per_architecture() {
    let fx = Fixture::new("MyApp", &["zeta.py", "alpha/b.py", "alpha/a.py", "README.md"]);
    let settings = fx
        .settings()
        .platforms(false, true, false)
        .architectures(["x86", "arm64", "x64"])
        .build();

    let (result, runner) = run(settings, RecordingRunner::default()).await;
    result.unwrap();

    let scripts: Vec<PathBuf> = runner
        .calls
        .iter()
        .map(|c| PathBuf::from(c.get_args().last().unwrap()))
        .map(|p| p.strip_prefix(&fx.source).unwrap().to_path_buf())
        .collect();
    let one_pass = ["alpha/a.py", "alpha/b.py", "zeta.py"].map(PathBuf::from);
    assert_eq!(scripts[..3], one_pass);
    assert_eq!(scripts[3..], one_pass);
    assert_eq!(runner.calls[0].env_value("PYINSTALLER_PLATFORM"), Some("win32"));
    assert_eq!(runner.calls[3].env_value("PYINSTALLER_PLATFORM"), Some("win_amd64"));
}

#[tokio::test]
async fn windows_failures_are_tolerated_by_default() {
    let fx = Fixture::new("MyApp", &["a.py", "b.py"]);
    let settings = fx
        .settings()
        .platforms(false, true, false)
        .architectures(["x86", "x64"])
        .build();

    let mut orchestrator = Orchestrator::new(settings, RecordingRunner::with_exits(&[1, 1, 0, 1]));
    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.records().len(), 4);
    assert_eq!(report.failures().count(), 3);
}

#[tokio::test]
async fn linux_failure_is_fatal_by_default() {
    let fx = Fixture::new("MyApp", &["main.py"]);
    let settings = fx
        .settings()
        .architectures(["x64", "arm64"])
        .build();

    let (result, runner) = run(settings, RecordingRunner::with_exits(&[2])).await;

    let err = result.unwrap_err();
    assert!(err.is_tool_failure());
    assert_eq!(runner.calls.len(), 1);
    assert!(!fx.layout().linux_dir(Arch::Arm64).exists());
}

#[tokio::test]
async fn continue_on_error_covers_linux() {
    let fx = Fixture::new("MyApp", &["main.py"]);
    let settings = fx
        .settings()
        .platforms(true, false, false)
        .architectures(["x64", "arm64"])
        .continue_on_error(Some(true))
        .build();

    let mut orchestrator = Orchestrator::new(settings, RecordingRunner::with_exits(&[2, 0]));
    let report = orchestrator.run().await.unwrap();

    assert_eq!(report.records().len(), 2);
    assert_eq!(report.failures().count(), 1);
}

#[tokio::test]
async fn fail_fast_covers_windows() {
    let fx = Fixture::new("MyApp", &["a.py", "b.py"]);
    let settings = fx
        .settings()
        .platforms(false, true, false)
        .continue_on_error(Some(false))
        .build();

    let (result, runner) = run(settings, RecordingRunner::with_exits(&[1])).await;

    assert!(result.unwrap_err().is_tool_failure());
    assert_eq!(runner.calls.len(), 1);
}

#[tokio::test]
async fn missing_source_directory_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let settings = BuildSettingsBuilder::new(tmp.path().join("Nope"))
        .output_root(tmp.path())
        .build();

    let (result, runner) = run(settings, RecordingRunner::default()).await;

    assert!(matches!(result, Err(Error::SourceNotFound(_))));
    assert!(runner.calls.is_empty());
    assert!(!tmp.path().join("Builds").exists());
}

#[tokio::test]
async fn builds_inside_the_source_are_not_copied_or_frozen() {
    let fx = Fixture::new("MyApp", &["main.py"]);
    let settings = BuildSettingsBuilder::new(&fx.source)
        .output_root(&fx.source)
        .build();

    let (result, runner) = run(settings, RecordingRunner::default()).await;
    result.unwrap();

    let layout = OutputLayout::new(&fx.source, "MyApp");
    assert!(!layout.linux_bin_dir(Arch::X64).join("Builds").exists());
    let windows_calls = runner
        .calls
        .iter()
        .filter(|c| c.has_arg("--onefile"))
        .count();
    assert_eq!(windows_calls, 1);
}
