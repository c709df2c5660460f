use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use check_netio::checks;
use check_netio::cli::{Cli, Command};
use check_netio::client::PduClient;
use check_netio::config_generator;
use check_netio::error::CheckError;
use check_netio::plugin::Resource;
use check_netio::runner::Runner;

fn main() {
    // Config generation wants no other arguments, so it runs before parsing.
    if let Err(e) =
        config_generator::print_icinga_command_config_if_env_and_exit("check_netio", &Cli::command())
    {
        eprintln!("failed to generate Icinga command configuration: {}", e);
        std::process::exit(3);
    }

    let cli = Cli::parse();

    // Logs go to stderr, the monitoring system consumes stdout.
    let default_filter = if cli.verbose {
        "check_netio=debug"
    } else {
        "check_netio=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    Runner::new()
        .with_name(checks::RESOURCE_NAME)
        .safe_run(|| run_check(&cli))
        .print_and_exit()
}

fn run_check(cli: &Cli) -> Result<Resource, CheckError> {
    let client = PduClient::new(&cli.connection)?;
    let status = client.fetch_status()?;

    match &cli.command {
        Command::Info(args) => checks::info(&status, args),
        Command::Uptime(args) => checks::uptime(&status, args),
        Command::Output(args) => checks::output(&status, args),
        Command::Load(args) => checks::load(&status, args),
    }
}
