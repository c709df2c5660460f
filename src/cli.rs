//! Command line surface of the check.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::plugin::ServiceState;

#[derive(Debug, Parser)]
#[command(name = "check_netio", version, about = "Check NETIO PDU status")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Log debug information (including the raw device response) to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Address of the device
    #[arg(short = 'H', long = "address")]
    pub address: String,

    /// JSON port
    #[arg(short = 'p', long, default_value_t = 80)]
    pub port: u16,

    /// Path of the JSON endpoint
    #[arg(long, default_value = "/netio.json")]
    pub path: String,

    /// Username used to access the console
    #[arg(short = 'k', long = "user")]
    pub user: Option<String>,

    /// Password used to access the console
    #[arg(short = 'K', long = "password", default_value = "")]
    pub password: String,

    /// Request timeout in seconds
    #[arg(short = 't', long, default_value_t = 10)]
    pub timeout: u64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Get PDU info
    Info(InfoArgs),
    /// Check PDU uptime
    Uptime(UptimeArgs),
    /// Check output state
    Output(OutputArgs),
    /// Check output load
    Load(LoadArgs),
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Expect this MAC address, compared case-insensitively
    #[arg(long = "expect-mac", visible_alias = "mac")]
    pub expect_mac: Option<String>,
}

#[derive(Debug, Args)]
pub struct UptimeArgs {
    /// Minimum expected uptime in seconds
    #[arg(long)]
    pub min: Option<u64>,

    /// Maximum expected uptime in seconds
    #[arg(long)]
    pub max: Option<u64>,

    /// State to report when a bound is violated
    #[arg(long, value_enum, default_value_t = Severity::Critical)]
    pub severity: Severity,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// ID of the output to check
    #[arg(short = 'n', long = "id", default_value_t = 1)]
    pub id: u32,

    /// Expect the output to be powered on
    #[arg(long, conflicts_with = "off")]
    pub on: bool,

    /// Expect the output to be powered off
    #[arg(long)]
    pub off: bool,
}

impl OutputArgs {
    pub fn expected_state(&self) -> Option<bool> {
        if self.on {
            Some(true)
        } else if self.off {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// ID of the output to check
    #[arg(short = 'n', long = "id", default_value_t = 1)]
    pub id: u32,

    /// Expect minimum load in W
    #[arg(long)]
    pub min_watts: Option<f64>,

    /// Expect maximum load in W
    #[arg(long)]
    pub max_watts: Option<f64>,

    /// Expect minimum load in A
    #[arg(long)]
    pub min_amps: Option<f64>,

    /// Expect maximum load in A
    #[arg(long)]
    pub max_amps: Option<f64>,

    /// State to report when a bound is violated
    #[arg(long, value_enum, default_value_t = Severity::Critical)]
    pub severity: Severity,
}

/// Severity a threshold violation escalates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Severity {
    Warning,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Critical => f.write_str("critical"),
        }
    }
}

impl From<Severity> for ServiceState {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => ServiceState::Warning,
            Severity::Critical => ServiceState::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uptime_command() {
        let cli = Cli::try_parse_from([
            "check_netio",
            "-H",
            "192.0.2.10",
            "uptime",
            "--min",
            "900",
        ])
        .unwrap();

        assert_eq!(cli.connection.address, "192.0.2.10");
        assert_eq!(cli.connection.port, 80);
        assert_eq!(cli.connection.path, "/netio.json");
        match cli.command {
            Command::Uptime(args) => {
                assert_eq!(args.min, Some(900));
                assert_eq!(args.max, None);
                assert_eq!(args.severity, Severity::Critical);
            }
            _ => panic!("expected the uptime command"),
        }
    }

    #[test]
    fn parses_output_expectation() {
        let cli = Cli::try_parse_from([
            "check_netio", "-H", "pdu", "output", "-n", "2", "--on",
        ])
        .unwrap();
        match cli.command {
            Command::Output(args) => {
                assert_eq!(args.id, 2);
                assert_eq!(args.expected_state(), Some(true));
            }
            _ => panic!("expected the output command"),
        }
    }

    #[test]
    fn output_defaults_to_no_expectation() {
        let cli = Cli::try_parse_from(["check_netio", "-H", "pdu", "output"]).unwrap();
        match cli.command {
            Command::Output(args) => {
                assert_eq!(args.id, 1);
                assert_eq!(args.expected_state(), None);
            }
            _ => panic!("expected the output command"),
        }
    }

    #[test]
    fn on_and_off_conflict() {
        let result =
            Cli::try_parse_from(["check_netio", "-H", "pdu", "output", "--on", "--off"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_load_thresholds() {
        let cli = Cli::try_parse_from([
            "check_netio",
            "-H",
            "pdu",
            "load",
            "-n",
            "2",
            "--min-watts",
            "10",
            "--max-watts",
            "300",
            "--severity",
            "warning",
        ])
        .unwrap();
        match cli.command {
            Command::Load(args) => {
                assert_eq!(args.id, 2);
                assert_eq!(args.min_watts, Some(10.0));
                assert_eq!(args.max_watts, Some(300.0));
                assert_eq!(args.severity, Severity::Warning);
            }
            _ => panic!("expected the load command"),
        }
    }

    #[test]
    fn host_is_required() {
        assert!(Cli::try_parse_from(["check_netio", "info"]).is_err());
    }
}
