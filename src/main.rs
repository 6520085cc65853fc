use clap::Parser;
use radix_dispatch::cli::{run_cli, Cli};
use radix_dispatch::logging::init_logging;
use radix_dispatch::runtime_config::RuntimeConfig;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let config = RuntimeConfig::from_env();
    init_logging(config.log_format, "warn")?;

    let cli = Cli::parse();
    let status = run_cli(cli, config, &mut std::io::stdout().lock())?;
    Ok(ExitCode::from(status))
}
