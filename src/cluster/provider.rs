use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Cloud provider integration enabled for the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Openstack,
    Vsphere,
}

impl CloudProvider {
    pub const ALL: [Self; 4] = [Self::Aws, Self::Azure, Self::Openstack, Self::Vsphere];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "aws",
            Self::Azure => "azure",
            Self::Openstack => "openstack",
            Self::Vsphere => "vsphere",
        }
    }

    /// Parse an optional provider, the empty string means no cloud integration
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not one of the supported providers
    pub fn parse_optional(s: &str) -> Result<Option<Self>, String> {
        if s.is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aws" => Ok(Self::Aws),
            "azure" => Ok(Self::Azure),
            "openstack" => Ok(Self::Openstack),
            "vsphere" => Ok(Self::Vsphere),
            _ => Err(format!(
                "Invalid cloud provider: {s}, valid values: {}",
                join_names(Self::ALL.iter().map(Self::as_str))
            )),
        }
    }
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Container networking plugin deployed across the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CniPlugin {
    #[default]
    Cilium,
}

impl CniPlugin {
    pub const ALL: [Self; 1] = [Self::Cilium];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cilium => "cilium",
        }
    }
}

impl FromStr for CniPlugin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cilium" => Ok(Self::Cilium),
            _ => Err(format!(
                "Invalid CNI plugin: {s}, valid values: {}",
                join_names(Self::ALL.iter().map(Self::as_str))
            )),
        }
    }
}

impl fmt::Display for CniPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}
