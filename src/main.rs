//! pybuild_packager - cross-platform and multi-arch packaging for Python source folders.
//!
//! This binary parses the command line, runs the selected action and maps the
//! outcome onto the process exit code.

use pybuild_packager::cli;
use pybuild_packager::cli::OutputManager;
use std::process;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("pybuild_packager=info"),
    )
    .format_timestamp(None)
    .format_target(false)
    .init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Create output manager for error display (never quiet for fatal errors)
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\nRecovery suggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&suggestion);
                }
            }

            process::exit(1);
        }
    }
}
