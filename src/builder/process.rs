//! External tool invocation.
//!
//! Platform drivers describe each tool run as a [`ToolInvocation`] and hand it
//! to a [`ToolRunner`]. [`SystemRunner`] spawns real processes, one at a time;
//! [`DryRunRunner`] only logs what would run.

use crate::builder::error::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// One external tool run: program, arguments, working directory and extra environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    program: PathBuf,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl ToolInvocation {
    /// Starts an invocation of `program` with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env: Vec::new(),
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Runs the tool from `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Adds an environment variable on top of the inherited environment.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Program to execute.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments in order.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Working directory, `None` to inherit.
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Extra environment variables.
    pub fn get_env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Value of an extra environment variable, if set.
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `arg` appears among the arguments.
    pub fn has_arg(&self, arg: impl AsRef<OsStr>) -> bool {
        self.args.iter().any(|a| a == arg.as_ref())
    }

    /// Argument following `flag`, e.g. the path after `--distpath`.
    pub fn arg_after(&self, flag: impl AsRef<OsStr>) -> Option<&OsStr> {
        let flag = flag.as_ref();
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(OsString::as_os_str)
    }

    /// Shell-like rendering for logs and error messages.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Exit status of a finished tool run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl ToolExit {
    /// A zero exit.
    pub const SUCCESS: ToolExit = ToolExit { code: Some(0) };

    /// Whether the tool exited with code zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ToolExit {
    fn from(status: std::process::ExitStatus) -> Self {
        ToolExit {
            code: status.code(),
        }
    }
}

/// Executes tool invocations.
///
/// Implementations must finish one invocation before returning; the
/// orchestrator never has two tools running at once.
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    /// Resolves `program` to an executable path.
    fn locate(&self, program: &Path) -> Result<PathBuf>;

    /// Runs `invocation` to completion.
    async fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolExit>;
}

/// Runs tools as child processes, inheriting the parent environment and stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn locate(&self, program: &Path) -> Result<PathBuf> {
        which::which(program).map_err(|e| Error::ToolNotFound {
            tool: program.display().to_string(),
            reason: e.to_string(),
        })
    }

    async fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolExit> {
        log::debug!("Running command: {}", invocation.command_line());

        let mut command = tokio::process::Command::new(invocation.program());
        command.args(invocation.get_args());
        command.envs(invocation.get_env().iter().map(|(k, v)| (k, v)));
        if let Some(dir) = invocation.get_current_dir() {
            command.current_dir(dir);
        }

        let status = command.status().await.map_err(|error| Error::CommandFailed {
            command: invocation.command_line(),
            error,
        })?;
        Ok(status.into())
    }
}

/// Logs invocations instead of executing them.
///
/// Programs missing from `PATH` are passed through by name so the full plan
/// is still shown.
#[derive(Debug, Default, Clone)]
pub struct DryRunRunner {
    planned: Vec<ToolInvocation>,
}

impl DryRunRunner {
    /// Invocations seen so far.
    pub fn planned(&self) -> &[ToolInvocation] {
        &self.planned
    }
}

impl ToolRunner for DryRunRunner {
    fn locate(&self, program: &Path) -> Result<PathBuf> {
        Ok(which::which(program).unwrap_or_else(|_| program.to_path_buf()))
    }

    async fn run(&mut self, invocation: &ToolInvocation) -> Result<ToolExit> {
        log::info!("[dry-run] {}", invocation.command_line());
        self.planned.push(invocation.clone());
        Ok(ToolExit::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_accessors() {
        let inv = ToolInvocation::new("fpm")
            .args(["-s", "dir", "-n", "app"])
            .arg("package/=/")
            .current_dir("/tmp/x64")
            .env("A", "1")
            .env("A", "2");

        assert!(inv.has_arg("package/=/"));
        assert_eq!(inv.arg_after("-n"), Some(OsStr::new("app")));
        assert_eq!(inv.arg_after("package/=/"), None);
        assert_eq!(inv.get_current_dir(), Some(Path::new("/tmp/x64")));
        assert_eq!(inv.env_value("A"), Some("2"));
        assert_eq!(inv.command_line(), "fpm -s dir -n app package/=/");
    }

    #[test]
    fn exit_success_only_on_zero() {
        assert!(ToolExit::SUCCESS.success());
        assert!(!ToolExit { code: Some(2) }.success());
        assert!(!ToolExit { code: None }.success());
    }

    #[tokio::test]
    async fn dry_run_records_without_executing() {
        let mut runner = DryRunRunner::default();
        let inv = ToolInvocation::new("definitely-not-a-real-tool-xyz").arg("--flag");
        let program = runner.locate(inv.program()).unwrap();
        assert_eq!(program, PathBuf::from("definitely-not-a-real-tool-xyz"));

        let exit = runner.run(&inv).await.unwrap();
        assert!(exit.success());
        assert_eq!(runner.planned(), &[inv]);
    }

    #[test]
    fn system_runner_reports_missing_tool() {
        let err = SystemRunner
            .locate(Path::new("definitely-not-a-real-tool-xyz"))
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
    }
}
