use super::{
    endpoint::ControlPlane,
    provider::{CloudProvider, CniPlugin},
    versions,
};
use anyhow::{Result, anyhow, bail};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Registry the control plane images are pulled from
pub const DEFAULT_IMAGE_REPOSITORY: &str = "registry.k8s.io";

/// Everything needed to lay out a new cluster definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitConfiguration {
    pub cluster_name: String,
    pub control_plane: ControlPlane,
    pub kubernetes_version: Version,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<CloudProvider>,
    pub strict_capability_defaults: bool,
    pub cni_plugin: CniPlugin,
    pub image_repository: String,
}

impl InitConfiguration {
    /// Validate the raw command inputs and build the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster name is not a plain directory name, the
    /// cloud provider or CNI plugin is unknown, the control plane is neither an
    /// IP address nor an FQDN, or the kubernetes version is not supported
    pub fn new(
        cluster_name: &str,
        cloud_provider: &str,
        control_plane: &str,
        kubernetes_version: &str,
        strict_capability_defaults: bool,
        cni_plugin: &str,
    ) -> Result<Self> {
        validate_cluster_name(cluster_name)?;

        let cloud_provider = CloudProvider::parse_optional(cloud_provider).map_err(|e| anyhow!(e))?;
        let control_plane = control_plane.parse::<ControlPlane>().map_err(|e| anyhow!(e))?;
        let kubernetes_version = versions::resolve(kubernetes_version)?;
        let cni_plugin = cni_plugin.parse::<CniPlugin>().map_err(|e| anyhow!(e))?;

        Ok(Self {
            cluster_name: cluster_name.to_string(),
            control_plane,
            kubernetes_version,
            cloud_provider,
            strict_capability_defaults,
            cni_plugin,
            image_repository: DEFAULT_IMAGE_REPOSITORY.to_string(),
        })
    }
}

// the name becomes a directory under the workspace root
fn validate_cluster_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("cluster name must not be empty");
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        bail!("Invalid cluster name: {name}, must be a plain directory name");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use super::*;
    use crate::cluster::endpoint::DEFAULT_API_SERVER_PORT;

    #[test]
    fn test_new_defaults() {
        let config = InitConfiguration::new("mycluster", "", "10.0.0.1", "", false, "cilium").unwrap();
        assert_eq!(config.cluster_name, "mycluster");
        assert_eq!(config.control_plane.host, "10.0.0.1");
        assert_eq!(config.control_plane.port, DEFAULT_API_SERVER_PORT);
        assert_eq!(config.kubernetes_version, versions::default_version().unwrap());
        assert_eq!(config.cloud_provider, None);
        assert!(!config.strict_capability_defaults);
        assert_eq!(config.cni_plugin, CniPlugin::Cilium);
        assert_eq!(config.image_repository, DEFAULT_IMAGE_REPOSITORY);
    }

    #[test]
    fn test_new_all_options() {
        let config = InitConfiguration::new(
            "prod",
            "openstack",
            "lb.example.com:8443",
            "1.30.6",
            true,
            "cilium",
        )
        .unwrap();
        assert_eq!(config.cloud_provider, Some(CloudProvider::Openstack));
        assert_eq!(config.control_plane.host, "lb.example.com");
        assert_eq!(config.control_plane.port, 8443);
        assert_eq!(config.kubernetes_version, Version::new(1, 30, 6));
        assert!(config.strict_capability_defaults);
    }

    #[test]
    fn test_new_rejects_bad_input() {
        assert!(InitConfiguration::new("", "", "10.0.0.1", "", false, "cilium").is_err());
        assert!(InitConfiguration::new("..", "", "10.0.0.1", "", false, "cilium").is_err());
        assert!(InitConfiguration::new("a/b", "", "10.0.0.1", "", false, "cilium").is_err());

        let err = InitConfiguration::new("c", "gcp", "10.0.0.1", "", false, "cilium").unwrap_err();
        assert!(err.to_string().starts_with("Invalid cloud provider: gcp"));

        let err = InitConfiguration::new("c", "", "", "", false, "cilium").unwrap_err();
        assert_eq!(err.to_string(), "control plane endpoint must not be empty");

        let err = InitConfiguration::new("c", "", "10.0.0.1", "0.1.0", false, "cilium").unwrap_err();
        assert!(err.to_string().starts_with("Unsupported kubernetes version"));

        let err = InitConfiguration::new("c", "", "10.0.0.1", "", false, "weave").unwrap_err();
        assert!(err.to_string().starts_with("Invalid CNI plugin: weave"));
    }

    #[test]
    fn test_serialize_skips_missing_cloud_provider() {
        let config = InitConfiguration::new("c", "", "10.0.0.1", "", false, "cilium").unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("cloud_provider").is_none());
        assert_eq!(json["control_plane"]["port"], 6443);
        assert_eq!(json["kubernetes_version"], "1.31.2");
        assert_eq!(json["cni_plugin"], "cilium");

        let back: InitConfiguration = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
