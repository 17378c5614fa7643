//! Debian package (.deb) driver built on `fpm`.
//!
//! For each architecture the whole source tree is copied into
//! `<arch>/package/usr/local/bin/` and `fpm` is run from `<arch>/` with
//! `package/=/` as the package root, so the sources install under
//! `/usr/local/bin`.

use crate::builder::{
    error::{Context, Result},
    platform::{BuildContext, run_tool},
    process::{ToolInvocation, ToolRunner},
    report::BuildReport,
    settings::{Arch, Platform, normalize_package_name},
    utils::fs::copy_dir_contents,
};
use std::path::Path;

/// Package root mapping handed to `fpm`, relative to the working directory.
pub const PACKAGE_ROOT_MAPPING: &str = "package/=/";

/// Builds the `fpm` call for one architecture.
///
/// `name` must already be normalized.
pub fn fpm_invocation(
    program: &Path,
    working_dir: &Path,
    name: &str,
    version: &str,
    arch: Arch,
) -> ToolInvocation {
    ToolInvocation::new(program)
        .args(["-s", "dir", "-t", "deb"])
        .args(["-n", name])
        .args(["-v", version])
        .args(["-a", arch.as_str()])
        .arg(PACKAGE_ROOT_MAPPING)
        .current_dir(working_dir)
}

/// Packages the source directory for every architecture in `archs`, in order.
///
/// The icon is not used for Debian packages.
pub async fn build_linux<R: ToolRunner>(
    ctx: BuildContext<'_>,
    runner: &mut R,
    archs: &[Arch],
    report: &mut BuildReport,
) -> Result<()> {
    if let Some(icon) = ctx.icon {
        log::debug!("Icon {} is not used for Debian packages", icon.display());
    }

    let name = normalize_package_name(ctx.settings.name());
    let policy = ctx.settings.failure_policy();
    let program = ctx.settings.tools().fpm.as_path();

    for &arch in archs {
        log::info!("Building for Linux ({arch})...");

        let bin_dir = ctx.layout.linux_bin_dir(arch);
        copy_dir_contents(ctx.settings.source_dir(), &bin_dir, ctx.excluded_dir())
            .await
            .with_context(|| format!("failed to stage sources for {arch}"))?;

        let working_dir = ctx.layout.linux_dir(arch);
        log::debug!("Build path: {}", working_dir.display());

        let invocation = fpm_invocation(program, &working_dir, &name, ctx.settings.version(), arch);
        run_tool(runner, invocation, Platform::Linux, arch, policy, report)
            .await
            .with_context(|| format!("Debian packaging failed for {arch}"))?;
    }

    Ok(())
}
