use clap::{Parser, Subcommand};
use infrastructure::config::{LogFormat, LogLevel};
use infrastructure::constants::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(
    name = "secreport",
    about = "Security recommendation report generator",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Log level override (takes precedence over config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Log format: json (default, production) or text (development)
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Bearer token for the management API
    #[arg(long, env = "SECREPORT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub completion_key: Option<String>,

    /// Subscription ID to report on
    #[arg(short, long, conflicts_with = "management_group")]
    pub subscription: Option<String>,

    /// Management group name to report on (covers all subscriptions below it)
    #[arg(short, long)]
    pub management_group: Option<String>,

    /// Output file override (takes precedence over config file)
    #[arg(short, long)]
    pub output: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display version and build information
    Version,
}

impl Cli {
    /// Scope path fragment from the CLI flags, if either was given.
    pub fn scope(&self) -> Option<String> {
        if let Some(id) = &self.subscription {
            return Some(format!("subscriptions/{id}"));
        }
        self.management_group
            .as_ref()
            .map(|name| format!("providers/Microsoft.Management/managementGroups/{name}"))
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::try_parse_from(["secreport"]).unwrap();
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
        assert!(cli.log_level.is_none());
        assert!(cli.scope().is_none());
        assert!(cli.output.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_subscription_scope() {
        let cli = Cli::try_parse_from(["secreport", "--subscription", "abc-123"]).unwrap();
        assert_eq!(cli.scope().as_deref(), Some("subscriptions/abc-123"));
    }

    #[test]
    fn cli_management_group_scope() {
        let cli = Cli::try_parse_from(["secreport", "--management-group", "prod"]).unwrap();
        assert_eq!(
            cli.scope().as_deref(),
            Some("providers/Microsoft.Management/managementGroups/prod")
        );
    }

    #[test]
    fn cli_scope_flags_conflict() {
        let result = Cli::try_parse_from([
            "secreport",
            "--subscription",
            "abc",
            "--management-group",
            "prod",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_log_level_override() {
        let cli = Cli::try_parse_from(["secreport", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn cli_invalid_log_level_rejected() {
        assert!(Cli::try_parse_from(["secreport", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn cli_version_subcommand() {
        let cli = Cli::try_parse_from(["secreport", "version"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Version)));
    }

    #[test]
    fn cli_output_override() {
        let cli = Cli::try_parse_from(["secreport", "--output", "report.csv"]).unwrap();
        assert_eq!(cli.output.as_deref(), Some("report.csv"));
    }
}
