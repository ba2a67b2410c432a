use super::{Initializer, config::InitConfiguration};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

pub const CLUSTER_FILE: &str = "cluster.json";
pub const CAPABILITIES_FILE: &str = "addons/cri/default_capabilities.conf";

/// CRI-O default capability set
const STRICT_CAPABILITIES: &[&str] = &[
    "CHOWN",
    "DAC_OVERRIDE",
    "FSETID",
    "FOWNER",
    "SETGID",
    "SETUID",
    "SETPCAP",
    "NET_BIND_SERVICE",
    "KILL",
];

/// Added on top of the strict set to match what Docker grants by default
const EXTRA_CAPABILITIES: &[&str] = &["MKNOD", "NET_RAW", "AUDIT_WRITE", "SYS_CHROOT"];

/// `crio.conf.d` drop-in, only the `[crio.runtime]` table is written
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrioConf {
    pub crio: CrioSection,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrioSection {
    pub runtime: CrioRuntime,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrioRuntime {
    pub default_capabilities: Vec<String>,
}

#[derive(Serialize)]
struct ClusterFile<'a> {
    #[serde(flatten)]
    config: &'a InitConfiguration,
    created_at: String,
    generator: String,
}

/// Initializer writing cluster definitions below a root directory
///
/// `init` creates `<root>/<cluster_name>/` and refuses to touch an existing
/// one. A directory left half written by a failed `init` is removed.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a cluster definition lives in
    #[must_use]
    pub fn cluster_dir(&self, cluster_name: &str) -> PathBuf {
        self.root.join(cluster_name)
    }
}

impl Initializer for Workspace {
    type Configuration = InitConfiguration;

    fn build_configuration(
        &self,
        cluster_name: &str,
        cloud_provider: &str,
        control_plane: &str,
        kubernetes_version: &str,
        strict_cap_defaults: bool,
        cni_plugin: &str,
    ) -> Result<InitConfiguration> {
        InitConfiguration::new(
            cluster_name,
            cloud_provider,
            control_plane,
            kubernetes_version,
            strict_cap_defaults,
            cni_plugin,
        )
    }

    fn init(&self, config: InitConfiguration) -> Result<()> {
        let dir = self.cluster_dir(&config.cluster_name);

        info!(
            cluster = %config.cluster_name,
            control_plane = %config.control_plane,
            control_plane_is_ip = config.control_plane.is_ip(),
            kubernetes_version = %config.kubernetes_version,
            "initializing cluster definition"
        );

        fs::create_dir_all(self.root())
            .with_context(|| format!("failed to create {}", self.root().display()))?;

        // create_dir fails if the directory appeared in the meantime, so the
        // cleanup below only ever removes a directory created here
        match fs::create_dir(&dir) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                bail!("cluster directory {} already exists", dir.display());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to create {}", dir.display()));
            }
        }

        fill_or_remove(&dir, |dir| write_definition(dir, &config))?;

        info!(
            "cluster definition for {} written to {}",
            config.cluster_name,
            dir.display()
        );

        Ok(())
    }
}

/// Run `write` against the freshly created `dir`, removing `dir` if it fails
fn fill_or_remove(dir: &Path, write: impl FnOnce(&Path) -> Result<()>) -> Result<()> {
    if let Err(err) = write(dir) {
        if let Err(cleanup) = fs::remove_dir_all(dir) {
            warn!("failed to remove partial cluster directory {}: {cleanup}", dir.display());
        }
        return Err(err);
    }
    Ok(())
}

fn write_definition(dir: &Path, config: &InitConfiguration) -> Result<()> {
    let cluster_file = ClusterFile {
        config,
        created_at: Utc::now().to_rfc3339(),
        generator: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
    };
    let serialized = serde_json::to_string_pretty(&cluster_file)
        .context("failed to serialize cluster configuration")?;
    write_file(&dir.join(CLUSTER_FILE), &serialized)?;

    let cni_dir = dir.join("addons/cni").join(config.cni_plugin.as_str());
    fs::create_dir_all(&cni_dir)
        .with_context(|| format!("failed to create {}", cni_dir.display()))?;
    debug!("created {}", cni_dir.display());

    write_file(
        &dir.join(CAPABILITIES_FILE),
        &capabilities_conf(config.strict_capability_defaults)?,
    )?;

    if let Some(provider) = config.cloud_provider {
        let cloud_dir = dir.join("cloud").join(provider.as_str());
        fs::create_dir_all(&cloud_dir)
            .with_context(|| format!("failed to create {}", cloud_dir.display()))?;
        write_file(
            &cloud_dir.join("README.md"),
            &format!(
                "# {provider} integration\n\n\
                Place the {provider} cloud provider configuration for cluster \
                `{}` in this directory before bootstrapping the first control \
                plane node.\n",
                config.cluster_name
            ),
        )?;
    }

    Ok(())
}

/// CRI-O `default_capabilities` drop-in for the chosen policy
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized
pub fn capabilities_conf(strict: bool) -> Result<String> {
    let mut caps: Vec<&str> = STRICT_CAPABILITIES.to_vec();
    if !strict {
        caps.extend_from_slice(EXTRA_CAPABILITIES);
    }

    let conf = CrioConf {
        crio: CrioSection {
            runtime: CrioRuntime {
                default_capabilities: caps.into_iter().map(String::from).collect(),
            },
        },
    };
    toml::to_string_pretty(&conf).context("failed to serialize CRI-O capabilities")
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    debug!("wrote {}", path.display());
    Ok(())
}
