mod run;

pub use run::init;

use std::path::PathBuf;

/// Flag and argument values of one `init` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    pub cluster_name: String,
    pub control_plane: String,
    /// Empty unless set on a development build
    pub kubernetes_version: String,
    pub cloud_provider: String,
    pub strict_cap_defaults: bool,
    pub cni_plugin: String,
}

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Init {
        options: InitOptions,
        workdir: PathBuf,
    },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub fn execute(self) -> anyhow::Result<()> {
        run::execute(self)
    }
}
