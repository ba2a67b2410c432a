use crate::build_mode::BuildMode;
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Pure clap command definitions with zero business logic
///
/// `build_mode` decides which flags exist: `--kubernetes-version` is only
/// registered for development builds.
#[must_use]
pub fn new(build_mode: BuildMode) -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v debug, -vv trace)")
                .long("verbose")
                .short('v'),
        )
        .arg(
            Arg::new("workdir")
                .default_value(".")
                .env("CLUSTERKIT_WORKDIR")
                .global(true)
                .help("Directory the cluster definition is created in")
                .long("workdir")
                .short('C')
                .value_name("DIR")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .subcommand(init(build_mode))
}

/// `init <cluster-name> --control-plane <IP/FQDN>`
///
/// The positional is collected as a list so the exact count can be checked by
/// [`crate::cli::dispatch`] instead of clap. `--control-plane` is enforced there
/// too, after the positional check.
#[must_use]
pub fn init(build_mode: BuildMode) -> Command {
    let cmd = Command::new("init")
        .about("Initialize the structure for a cluster deployment")
        .override_usage("init <cluster-name> --control-plane <IP/FQDN>")
        .arg(
            Arg::new("cluster-name")
                .action(ArgAction::Append)
                .help("Name of the cluster, also used as its directory name")
                .num_args(1..)
                .value_name("CLUSTER_NAME"),
        )
        .arg(
            Arg::new("control-plane")
                .help("The control plane location (IP/FQDN) that will load balance the master nodes (required)")
                .long("control-plane")
                .value_name("IP/FQDN"),
        );

    let cmd = if build_mode.is_development() {
        cmd.arg(
            Arg::new("kubernetes-version")
                .default_value("")
                .hide_default_value(true)
                .help("The kubernetes version to bootstrap with (only in development build)")
                .long("kubernetes-version")
                .value_name("VERSION"),
        )
    } else {
        cmd
    };

    cmd.arg(
        Arg::new("cloud-provider")
            .default_value("")
            .hide_default_value(true)
            .help("Enable cloud provider integration with the chosen cloud. Valid values: aws, azure, openstack, vsphere")
            .long("cloud-provider")
            .value_name("PROVIDER"),
    )
    .arg(
        Arg::new("strict-capability-defaults")
            .action(ArgAction::SetTrue)
            .help("All the containers will start with CRI-O default capabilities")
            .long("strict-capability-defaults"),
    )
    .arg(
        Arg::new("cni-plugin")
            .default_value("cilium")
            .help("Specify the CNI plugin to be used across the cluster. Valid values: cilium")
            .long("cni-plugin")
            .value_name("PLUGIN"),
    )
}
