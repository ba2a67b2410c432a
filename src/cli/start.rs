use super::{commands, dispatch, telemetry};
use crate::build_mode::BuildMode;
use anyhow::Result;
use tracing::debug;

/// Main orchestrator - Pure orchestration with no business logic
///
/// Five-step data flow:
/// 1. Parse: Extract CLI arguments, flags depend on `build_mode`
/// 2. Extract Verbosity: Convert flag count to logging level
/// 3. Initialize Telemetry: Set up structured logging/tracing
/// 4. Dispatch: Convert `ArgMatches` into typed Action enum
/// 5. Execute: Run the action's business logic
///
/// # Errors
///
/// Returns an error if any step in the flow fails
pub fn start(build_mode: BuildMode) -> Result<()> {
    // 1. Parse: Extract CLI arguments
    let matches = commands::new(build_mode).get_matches();

    // 2. Extract Verbosity
    let verbosity = matches.get_count("verbose");

    // 3. Initialize Telemetry
    telemetry::init(verbosity)?;
    debug!(%build_mode, "starting");

    // 4. Dispatch: Convert ArgMatches into typed Action enum, usage errors
    // found here exit like the ones clap reports while parsing
    let action = match dispatch::dispatch(&matches, build_mode) {
        Ok(action) => action,
        Err(err) => match err.downcast::<clap::Error>() {
            Ok(usage) => usage.exit(),
            Err(err) => return Err(err),
        },
    };

    // 5. Execute: Run the action's business logic
    action.execute()?;

    Ok(())
}
