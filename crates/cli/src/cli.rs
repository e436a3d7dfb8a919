//! Command-line interface argument parsing.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Finance Dashboard - terminal front end for the finance tracker backend
///
/// The backend session is a cookie that lives only as long as this process,
/// so every command that needs a session logs in first and logs out when done.
///
/// Examples:
///   finance-dashboard dashboard --email ann@example.com --password secret123
///   finance-dashboard add --email ann@example.com --password secret123 \
///       --type expense --amount 12.50 --category Food
///   finance-dashboard register --username ann --email ann@example.com --password secret123
///   finance-dashboard --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the settings file
    ///
    /// If not specified, looks for finance-dashboard.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Backend root URL (overrides the settings file)
    #[arg(long, value_name = "URL", env = "FINANCE_API_URL", global = true)]
    pub base_url: Option<String>,

    /// Display currency, a 3-letter code (overrides the settings file)
    #[arg(long, value_name = "CODE", global = true)]
    pub currency: Option<String>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT", global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Write a default finance-dashboard.toml and exit
    #[arg(long)]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in and print the dashboard
    Dashboard {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Log in, add a transaction and print the refreshed dashboard
    Add {
        #[command(flatten)]
        credentials: Credentials,

        #[command(flatten)]
        transaction: TransactionArgs,
    },

    /// Create an account
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "FINANCE_PASSWORD", hide_env_values = true)]
        password: String,

        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct Credentials {
    #[arg(long, env = "FINANCE_EMAIL")]
    pub email: String,

    #[arg(long, env = "FINANCE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct TransactionArgs {
    /// income or expense
    #[arg(long = "type", value_name = "TYPE", default_value = "expense")]
    pub kind: String,

    #[arg(long)]
    pub amount: String,

    #[arg(long)]
    pub category: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// YYYY-MM-DD, defaults to today
    #[arg(long)]
    pub date: Option<String>,
}

/// Output format for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    #[default]
    Text,
    /// The rendered view as JSON
    Json,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.command.is_none() {
            return Err("A command is required (dashboard, add, register)".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err("Backend URL must start with 'http://' or 'https://'".to_string());
            }
        }

        Ok(())
    }

    /// Default directive for the log filter when `RUST_LOG` is not set.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn dashboard_command() {
        let args = parse(&[
            "finance-dashboard",
            "dashboard",
            "--email",
            "ann@example.com",
            "--password",
            "secret123",
        ]);
        assert!(args.validate().is_ok());
        match args.command {
            Some(Command::Dashboard { credentials }) => {
                assert_eq!(credentials.email, "ann@example.com");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn add_command_defaults() {
        let args = parse(&[
            "finance-dashboard",
            "add",
            "--email",
            "ann@example.com",
            "--password",
            "secret123",
            "--amount",
            "12.50",
            "--category",
            "Food",
        ]);
        let Some(Command::Add { transaction, .. }) = args.command else {
            panic!("expected add");
        };
        assert_eq!(transaction.kind, "expense");
        assert!(transaction.date.is_none());
        assert_eq!(transaction.description, "");
    }

    #[test]
    fn init_config_needs_no_command() {
        let args = parse(&["finance-dashboard", "--init-config"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn missing_command_is_rejected() {
        let args = parse(&["finance-dashboard"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let args = parse(&["finance-dashboard", "--init-config", "-v", "-q"]);
        assert!(args.validate().is_ok());
        let args = Args {
            init_config: false,
            command: Some(Command::Register {
                username: "ann".into(),
                email: "ann@example.com".into(),
                password: "secret123".into(),
                confirm_password: None,
            }),
            ..args
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn base_url_must_be_http() {
        let mut args = parse(&["finance-dashboard", "--init-config"]);
        args.init_config = false;
        args.command = Some(Command::Register {
            username: "ann".into(),
            email: "ann@example.com".into(),
            password: "secret123".into(),
            confirm_password: None,
        });
        args.base_url = Some("localhost:5000".into());
        assert!(args.validate().is_err());
    }

    #[test]
    fn log_levels() {
        let mut args = parse(&["finance-dashboard", "--init-config"]);
        assert_eq!(args.log_level(), tracing::Level::WARN);
        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);
        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
