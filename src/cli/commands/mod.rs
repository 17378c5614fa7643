//! Command execution.
//!
//! `--extrahelp` is handled first, then `--clean`, and only then the build
//! itself. Both short-circuits exit successfully without looking at the
//! source directory.

mod build;
mod clean;
mod help;

use crate::cli::{Args, RuntimeConfig};
use crate::error::Result;

use build::execute_build;
use clean::execute_clean;
use help::execute_extrahelp;

/// Which action a set of arguments resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Print the extended usage line
    ExtraHelp,
    /// Remove the `Builds/` directory
    Clean,
    /// Run the build
    Build,
}

impl Action {
    /// Resolves the action, honoring `--extrahelp` over `--clean` over build.
    pub fn from_args(args: &Args) -> Self {
        if args.extrahelp {
            Action::ExtraHelp
        } else if args.clean {
            Action::Clean
        } else {
            Action::Build
        }
    }

    /// Name used in status messages.
    pub fn name(&self) -> &'static str {
        match self {
            Action::ExtraHelp => "extrahelp",
            Action::Clean => "clean",
            Action::Build => "build",
        }
    }
}

/// Execute the action selected by the parsed arguments
pub async fn execute_command(args: Args) -> Result<i32> {
    // Validate arguments
    if let Err(validation_error) = args.validate() {
        let output = super::OutputManager::new(false, false);
        output.error(&format!("Invalid arguments: {}", validation_error));
        return Ok(1);
    }

    let config = RuntimeConfig::from(&args);
    let action = Action::from_args(&args);

    let result = match action {
        Action::ExtraHelp => execute_extrahelp(&config),
        Action::Clean => execute_clean(&args, &config).await,
        Action::Build => execute_build(&args, &config).await,
    };

    match result {
        Ok(()) => Ok(0),
        Err(e) => {
            config.error_println(&format!("Command '{}' failed: {}", action.name(), e));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() && !config.is_quiet() {
                config.println("\nRecovery suggestions:");
                for suggestion in suggestions {
                    config.indent(&format!("- {}", suggestion));
                }
            }

            Ok(1)
        }
    }
}
