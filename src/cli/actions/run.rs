use super::{Action, InitOptions};
use crate::{
    cluster::{Initializer, Workspace},
    error::InitError,
};
use tracing::debug;

/// Execute the action's business logic by delegating to the appropriate module
pub fn execute(action: Action) -> anyhow::Result<()> {
    match action {
        Action::Init { options, workdir } => {
            init(&Workspace::new(workdir), &options)?;
        }
    }
    Ok(())
}

/// Build the configuration and hand it to the initializer
///
/// `initializer.init` runs only if the configuration was built.
///
/// # Errors
///
/// Returns [`InitError::ConfigurationBuild`] or [`InitError::Bootstrap`] with
/// the collaborator's error
pub fn init<I: Initializer>(initializer: &I, options: &InitOptions) -> Result<(), InitError> {
    debug!(?options, "building init configuration");

    let config = initializer
        .build_configuration(
            &options.cluster_name,
            &options.cloud_provider,
            &options.control_plane,
            &options.kubernetes_version,
            options.strict_cap_defaults,
            &options.cni_plugin,
        )
        .map_err(InitError::ConfigurationBuild)?;

    initializer.init(config).map_err(InitError::Bootstrap)
}
