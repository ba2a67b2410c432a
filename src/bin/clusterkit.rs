use clusterkit::{build_mode::BuildMode, cli::start};

fn main() -> anyhow::Result<()> {
    start::start(BuildMode::current())
}
