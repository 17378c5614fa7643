//! Build command implementation.
//!
//! Resolves paths, runs the orchestrator with the real or dry-run tool
//! runner, and prints the summary.

use crate::builder::{
    BuildReport, BuildSettings, DryRunRunner, Orchestrator, Platform, SystemRunner, ToolRunner,
    utils::fs::resolve_path,
};
use crate::cli::{Args, RuntimeConfig};
use crate::error::{CliError, Result};

/// Execute build command
pub(super) async fn execute_build(args: &Args, config: &RuntimeConfig) -> Result<()> {
    let source = args.source.as_ref().ok_or_else(|| CliError::MissingArgument {
        argument: "SOURCE".to_string(),
    })?;

    let settings = args.build_settings(resolve_path(source)?, resolve_path(&args.output_root)?);
    describe_settings(&settings, config);

    let report = if settings.dry_run() {
        config.info_println("Dry run: tools will not be executed");
        build_with(settings, DryRunRunner::default()).await?
    } else {
        build_with(settings, SystemRunner).await?
    };

    print_summary(&report, config);
    config.success_println(&format!(
        "Build completed. Output at: {}",
        report.output_base().display()
    ));
    Ok(())
}

async fn build_with<R: ToolRunner>(settings: BuildSettings, runner: R) -> Result<BuildReport> {
    let mut orchestrator = Orchestrator::new(settings, runner);
    Ok(orchestrator.run().await?)
}

fn describe_settings(settings: &BuildSettings, config: &RuntimeConfig) {
    config.verbose_println(&format!("Source: {}", settings.source_dir().display()));
    config.verbose_println(&format!("Name: {}", settings.name()));
    config.verbose_println(&format!("Version: {}", settings.version()));
    for platform in settings.platforms() {
        let archs: Vec<&str> = settings
            .architectures(*platform)
            .iter()
            .map(|a| a.as_str())
            .collect();
        config.verbose_println(&format!("{}: {}", platform, archs.join(", ")));
    }
}

fn print_summary(report: &BuildReport, config: &RuntimeConfig) {
    for platform in [Platform::Linux, Platform::Windows] {
        let attempted = report.records_for(platform).count();
        let failed = report.records_for(platform).filter(|r| !r.succeeded()).count();
        if attempted > 0 {
            config.info_println(&format!(
                "{}: {} invocation(s), {} failed",
                platform, attempted, failed
            ));
        }
    }

    for record in report.failures() {
        config.warning_println(&format!(
            "{} ({}) failed: {}",
            record.platform,
            record.arch,
            record.invocation.command_line()
        ));
    }

    for (platform, reason) in report.skipped() {
        config.warning_println(&format!("Skipped {}: {}", platform, reason));
    }
}
