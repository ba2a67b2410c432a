//! Cluster definition and the default bootstrap collaborator
//!
//! The `init` command only talks to the [`Initializer`] trait. [`Workspace`]
//! is the implementation the binary uses: it validates the raw flag values
//! into an [`InitConfiguration`] and writes a cluster definition directory.
//!
//! # Module Organization
//!
//! - `config` - `InitConfiguration` and its validation
//! - `endpoint` - control plane address parsing
//! - `provider` - cloud provider and CNI plugin enums
//! - `versions` - supported kubernetes versions
//! - `bootstrap` - the filesystem backed `Workspace`

pub mod bootstrap;
pub mod config;
pub mod endpoint;
pub mod provider;
pub mod versions;

pub use bootstrap::Workspace;
pub use config::InitConfiguration;
pub use endpoint::ControlPlane;
pub use provider::{CloudProvider, CniPlugin};

/// Builds a cluster configuration and bootstraps the cluster from it
///
/// Both steps are fail-fast: callers treat any error as final.
pub trait Initializer {
    type Configuration;

    /// Turn the raw command inputs into a configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any input is invalid for this initializer
    fn build_configuration(
        &self,
        cluster_name: &str,
        cloud_provider: &str,
        control_plane: &str,
        kubernetes_version: &str,
        strict_cap_defaults: bool,
        cni_plugin: &str,
    ) -> anyhow::Result<Self::Configuration>;

    /// Bootstrap the cluster described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if bootstrapping fails
    fn init(&self, config: Self::Configuration) -> anyhow::Result<()>;
}
