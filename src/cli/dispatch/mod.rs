use crate::{
    build_mode::BuildMode,
    cli::{
        actions::{Action, InitOptions},
        commands,
    },
    error::InitError,
};
use anyhow::{Context, Result, bail};
use clap::{ArgMatches, error::ErrorKind, parser::MatchesError};
use std::path::PathBuf;

/// Check the positional arguments of `init`, returning the cluster name
///
/// Exactly one non-empty argument is accepted. This runs before any flag is
/// read and has no side effects.
///
/// # Errors
///
/// Returns [`InitError::ArgumentCount`] or [`InitError::InvalidArgument`]
pub fn validate_args(args: &[String]) -> Result<&str, InitError> {
    match args {
        [name] if name.is_empty() => Err(InitError::InvalidArgument(
            "expected non empty cluster name".to_string(),
        )),
        [name] => Ok(name),
        _ => Err(InitError::ArgumentCount {
            expected: 1,
            received: args.len(),
        }),
    }
}

/// Value of an optional string flag, `None` if the flag is not registered
///
/// # Errors
///
/// Returns an error if the flag exists but does not hold a `String`
pub fn optional_string(matches: &ArgMatches, id: &str) -> Result<Option<String>> {
    match matches.try_get_one::<String>(id) {
        Ok(value) => Ok(value.cloned()),
        Err(MatchesError::UnknownArgument { .. }) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("failed to read --{id}")),
    }
}

/// Extract [`InitOptions`] from the `init` subcommand matches
///
/// The positional arguments are checked first, `--control-plane` is only
/// looked at once they are valid. A missing `--control-plane` is reported as
/// a clap usage error.
///
/// # Errors
///
/// Returns an error if the positional arguments are invalid or a required
/// flag is missing
pub fn init_options(matches: &ArgMatches, build_mode: BuildMode) -> Result<InitOptions> {
    let args: Vec<String> = matches
        .get_many::<String>("cluster-name")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let cluster_name = validate_args(&args)?.to_string();

    let Some(control_plane) = matches.get_one::<String>("control-plane").cloned() else {
        return Err(commands::init(build_mode)
            .error(
                ErrorKind::MissingRequiredArgument,
                "the following required arguments were not provided:\n  --control-plane <IP/FQDN>",
            )
            .into());
    };

    // only registered on development builds
    let kubernetes_version = optional_string(matches, "kubernetes-version")?.unwrap_or_default();

    let cloud_provider = optional_string(matches, "cloud-provider")?.unwrap_or_default();

    let strict_cap_defaults = matches.get_flag("strict-capability-defaults");

    let cni_plugin =
        optional_string(matches, "cni-plugin")?.unwrap_or_else(|| "cilium".to_string());

    Ok(InitOptions {
        cluster_name,
        control_plane,
        kubernetes_version,
        cloud_provider,
        strict_cap_defaults,
        cni_plugin,
    })
}

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if the subcommand is unknown or its arguments are invalid
pub fn dispatch(matches: &ArgMatches, build_mode: BuildMode) -> Result<Action> {
    let workdir = matches
        .get_one::<PathBuf>("workdir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    match matches.subcommand() {
        Some(("init", sub)) => Ok(Action::Init {
            options: init_options(sub, build_mode)?,
            workdir,
        }),
        Some((name, _)) => bail!("unknown command: {name}"),
        None => bail!("no command given"),
    }
}
