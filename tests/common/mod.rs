#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use anyhow::{Result, anyhow};
use clusterkit::{
    build_mode::BuildMode,
    cli::{
        actions::{self, Action, InitOptions},
        commands, dispatch,
    },
    cluster::Initializer,
};
use std::cell::RefCell;

/// Arguments `build_configuration` was called with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCall {
    pub cluster_name: String,
    pub cloud_provider: String,
    pub control_plane: String,
    pub kubernetes_version: String,
    pub strict_cap_defaults: bool,
    pub cni_plugin: String,
}

/// Initializer that records every call and fails on request
#[derive(Default)]
pub struct RecordingInitializer {
    pub build_calls: RefCell<Vec<BuildCall>>,
    pub init_calls: RefCell<Vec<BuildCall>>,
    pub fail_build: Option<String>,
    pub fail_init: Option<String>,
}

impl RecordingInitializer {
    pub fn failing_build(msg: &str) -> Self {
        Self {
            fail_build: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_init(msg: &str) -> Self {
        Self {
            fail_init: Some(msg.to_string()),
            ..Self::default()
        }
    }
}

impl Initializer for RecordingInitializer {
    type Configuration = BuildCall;

    fn build_configuration(
        &self,
        cluster_name: &str,
        cloud_provider: &str,
        control_plane: &str,
        kubernetes_version: &str,
        strict_cap_defaults: bool,
        cni_plugin: &str,
    ) -> Result<BuildCall> {
        let call = BuildCall {
            cluster_name: cluster_name.to_string(),
            cloud_provider: cloud_provider.to_string(),
            control_plane: control_plane.to_string(),
            kubernetes_version: kubernetes_version.to_string(),
            strict_cap_defaults,
            cni_plugin: cni_plugin.to_string(),
        };
        self.build_calls.borrow_mut().push(call.clone());

        match &self.fail_build {
            Some(msg) => Err(anyhow!("{msg}")),
            None => Ok(call),
        }
    }

    fn init(&self, config: BuildCall) -> Result<()> {
        self.init_calls.borrow_mut().push(config);

        match &self.fail_init {
            Some(msg) => Err(anyhow!("{msg}")),
            None => Ok(()),
        }
    }
}

/// Parse `clusterkit init <args>` and dispatch it into `InitOptions`
pub fn options_from(build_mode: BuildMode, args: &[&str]) -> Result<InitOptions> {
    let mut argv = vec!["clusterkit", "init"];
    argv.extend_from_slice(args);
    let matches = commands::new(build_mode).try_get_matches_from(argv)?;
    match dispatch::dispatch(&matches, build_mode)? {
        Action::Init { options, .. } => Ok(options),
    }
}

/// Run the whole `init` pipeline against `initializer`
pub fn run_init(
    build_mode: BuildMode,
    args: &[&str],
    initializer: &RecordingInitializer,
) -> Result<()> {
    let options = options_from(build_mode, args)?;
    actions::init(initializer, &options)?;
    Ok(())
}
