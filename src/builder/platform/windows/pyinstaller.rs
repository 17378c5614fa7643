//! One-file executable driver built on `pyinstaller`.
//!
//! Every `.py` file found anywhere under the source directory is frozen into
//! its own executable, once per architecture. There is no entry-point
//! selection: a tree with five scripts yields five executables per
//! architecture. Scripts are processed in lexicographic order of their path
//! relative to the source directory.

use crate::builder::{
    error::{Context, Result},
    platform::{BuildContext, run_tool},
    process::{ToolInvocation, ToolRunner},
    report::BuildReport,
    settings::{Arch, Platform},
    utils::fs::{create_dirs, find_files_with_extension},
};
use std::path::Path;

/// Environment variable carrying the target hint to the freezer.
pub const PLATFORM_ENV: &str = "PYINSTALLER_PLATFORM";

/// Target tag exported in [`PLATFORM_ENV`] for `arch`.
pub fn platform_tag(arch: Arch) -> Option<&'static str> {
    match arch {
        Arch::X86 => Some("win32"),
        Arch::X64 => Some("win_amd64"),
        Arch::Arm64 => None,
    }
}

/// Output directories of one freezer run.
#[derive(Debug, Clone, Copy)]
pub struct FreezeDirs<'a> {
    /// `--distpath`
    pub dist: &'a Path,
    /// `--workpath`
    pub work: &'a Path,
    /// `--specpath`
    pub spec: &'a Path,
}

/// Builds the `pyinstaller` call freezing `script` for `arch`.
pub fn pyinstaller_invocation(
    program: &Path,
    script: &Path,
    dirs: FreezeDirs<'_>,
    icon: Option<&Path>,
    arch: Arch,
) -> ToolInvocation {
    let mut invocation = ToolInvocation::new(program)
        .arg("--onefile")
        .arg("--distpath")
        .arg(dirs.dist)
        .arg("--workpath")
        .arg(dirs.work)
        .arg("--specpath")
        .arg(dirs.spec);

    if let Some(icon) = icon {
        invocation = invocation.arg("--icon").arg(icon);
    }
    invocation = invocation.arg(script);

    match platform_tag(arch) {
        Some(tag) => invocation.env(PLATFORM_ENV, tag),
        None => invocation,
    }
}

/// Freezes every script for every architecture in `archs`, in order.
///
/// When the freezer cannot be found on `PATH` the phase is skipped and
/// recorded in `report`; the run itself carries on.
pub async fn build_windows<R: ToolRunner>(
    ctx: BuildContext<'_>,
    runner: &mut R,
    archs: &[Arch],
    report: &mut BuildReport,
) -> Result<()> {
    let program = match runner.locate(&ctx.settings.tools().pyinstaller) {
        Ok(program) => program,
        Err(e) => {
            log::warn!("{e}. Ensure it's installed and in PATH.");
            report.skip(Platform::Windows, e.to_string());
            return Ok(());
        }
    };

    let scripts = find_files_with_extension(ctx.settings.source_dir(), "py", ctx.excluded_dir())
        .context("failed to scan for Python sources")?;
    if scripts.is_empty() {
        log::warn!(
            "No .py files under {}; nothing to freeze",
            ctx.settings.source_dir().display()
        );
    }

    let policy = ctx.settings.failure_policy();
    for &arch in archs {
        log::info!("Building for Windows ({arch})...");

        let dist = ctx.layout.windows_dir(arch);
        let work = ctx.layout.windows_work_dir(arch);
        let spec = ctx.layout.windows_spec_dir(arch);
        create_dirs(&[dist.as_path(), work.as_path(), spec.as_path()]).await?;

        if let Some(icon) = ctx.icon {
            log::info!("Found icon argument: {}", icon.display());
        }

        for script in &scripts {
            let dirs = FreezeDirs {
                dist: &dist,
                work: &work,
                spec: &spec,
            };
            let invocation = pyinstaller_invocation(&program, script, dirs, ctx.icon, arch);
            run_tool(runner, invocation, Platform::Windows, arch, policy, report)
                .await
                .with_context(|| format!("freezing {} for {arch} failed", script.display()))?;
        }
    }

    Ok(())
}
