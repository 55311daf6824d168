//! Argument parsing and command dispatch.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use crynux_devproxy::{DEFAULT_LISTEN_ADDR, DEFAULT_PREFIX, DEFAULT_TARGET, TARGET_ENV};
use crynux_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, init_logging};
use serde_json::Value;
use uuid::Uuid;

use crate::client::{AppContext, CliResult, parse_assignment, resolve_config};
use crate::commands::proxy::handle_proxy;
use crate::commands::settings::{handle_settings_get, handle_settings_set};

const QUIET_LOG_LEVEL: &str = "warn";

/// Parses CLI arguments, executes the requested command and reports failures.
/// Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    install_logging(&cli);
    let trace_id = Uuid::new_v4().to_string();

    match dispatch(cli, &trace_id).await {
        Ok(()) => 0,
        Err(err) => {
            let message = err.display_message();
            tracing::debug!(trace_id = %trace_id, error = %message, "command failed");
            eprintln!("error: {message}");
            err.exit_code()
        }
    }
}

fn install_logging(cli: &Cli) {
    let default_level = match cli.command {
        Command::Proxy(_) => DEFAULT_LOG_LEVEL,
        Command::Settings(_) => QUIET_LOG_LEVEL,
    };
    let level = cli.log_level.as_deref().unwrap_or(default_level);
    let config = LoggingConfig {
        level,
        format: log_format(cli.log_format),
        build_sha: env!("CARGO_PKG_VERSION"),
    };
    if let Err(err) = init_logging(&config) {
        eprintln!("warning: {err:#}");
    }
}

const fn log_format(arg: Option<LogFormatArg>) -> LogFormat {
    match arg {
        Some(LogFormatArg::Pretty) => LogFormat::Pretty,
        Some(LogFormatArg::Json) => LogFormat::Json,
        None => LogFormat::infer(),
    }
}

async fn dispatch(cli: Cli, trace_id: &str) -> CliResult<()> {
    match cli.command {
        Command::Settings(settings) => {
            let config =
                resolve_config(cli.config.as_deref(), cli.base_url.as_deref(), cli.timeout)?;
            let ctx = AppContext::from_config(&config, trace_id)?;
            match settings {
                SettingsCommand::Get => handle_settings_get(&ctx, cli.output).await,
                SettingsCommand::Set(args) => handle_settings_set(&ctx, args, cli.output).await,
            }
        }
        Command::Proxy(args) => handle_proxy(args).await,
    }
}

#[derive(Parser)]
#[command(
    name = "crynux-webui",
    version,
    about = "Settings and development tooling for the node manager web UI"
)]
pub(crate) struct Cli {
    /// API base URL; overrides `base_url` from `--config`.
    #[arg(long, global = true, env = "CRYNUX_WEBUI_BASE_URL")]
    base_url: Option<String>,
    /// Web UI `config.json` to read `base_url` from.
    #[arg(long, global = true, env = "CRYNUX_WEBUI_CONFIG")]
    config: Option<PathBuf>,
    /// Request timeout in seconds.
    #[arg(long, global = true, env = "CRYNUX_HTTP_TIMEOUT_SECS")]
    timeout: Option<u64>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    output: OutputFormat,
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// Log output format; defaults to pretty in debug builds and JSON in release builds.
    #[arg(long, global = true, value_enum, env = "CRYNUX_LOG_FORMAT")]
    log_format: Option<LogFormatArg>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Read or replace node settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Run the development proxy.
    Proxy(ProxyArgs),
}

#[derive(Subcommand)]
pub(crate) enum SettingsCommand {
    /// Fetch the current settings.
    Get,
    /// Send a new settings document.
    Set(SettingsSetArgs),
}

#[derive(Args, Debug)]
pub(crate) struct SettingsSetArgs {
    /// JSON file holding the settings document.
    #[arg(long, conflicts_with = "set", required_unless_present = "set")]
    pub(crate) file: Option<PathBuf>,
    /// Individual `key=value` entries; values are parsed as JSON when possible.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub(crate) set: Vec<(String, Value)>,
}

#[derive(Args, Debug)]
pub(crate) struct ProxyArgs {
    /// Address to listen on.
    #[arg(long, default_value = DEFAULT_LISTEN_ADDR)]
    pub(crate) listen: SocketAddr,
    /// Backend origin requests are forwarded to.
    #[arg(long, env = TARGET_ENV, default_value = DEFAULT_TARGET)]
    pub(crate) target: String,
    /// Path prefix to forward.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub(crate) prefix: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormatArg {
    Pretty,
    Json,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn settings_set_collects_assignments() {
        let cli = Cli::try_parse_from([
            "crynux-webui",
            "settings",
            "set",
            "--set",
            "num_staking=3",
            "--set",
            "label=node-a",
        ]);
        let Ok(Cli {
            command: Command::Settings(SettingsCommand::Set(args)),
            ..
        }) = cli
        else {
            panic!("expected settings set");
        };
        assert_eq!(
            args.set,
            vec![
                ("num_staking".to_string(), json!(3)),
                ("label".to_string(), json!("node-a")),
            ]
        );
        assert!(args.file.is_none());
    }

    #[test]
    fn settings_set_requires_a_source() {
        assert!(Cli::try_parse_from(["crynux-webui", "settings", "set"]).is_err());
        assert!(
            Cli::try_parse_from([
                "crynux-webui",
                "settings",
                "set",
                "--file",
                "a.json",
                "--set",
                "a=1"
            ])
            .is_err()
        );
    }

    #[test]
    fn proxy_defaults_match_dev_server() {
        let Ok(Cli {
            command: Command::Proxy(args),
            ..
        }) = Cli::try_parse_from(["crynux-webui", "proxy", "--target", DEFAULT_TARGET])
        else {
            panic!("expected proxy command");
        };
        assert_eq!(args.listen.port(), 3000);
        assert_eq!(args.prefix, "/manager");
        assert_eq!(args.target, "http://localhost:7412");
    }

    #[test]
    fn log_format_flag_overrides_build_default() {
        assert_eq!(log_format(None), LogFormat::infer());
        assert_eq!(log_format(Some(LogFormatArg::Json)), LogFormat::Json);
        assert_eq!(log_format(Some(LogFormatArg::Pretty)), LogFormat::Pretty);

        let Ok(cli) =
            Cli::try_parse_from(["crynux-webui", "proxy", "--log-format", "json"])
        else {
            panic!("expected parse");
        };
        assert_eq!(log_format(cli.log_format), LogFormat::Json);
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let Ok(cli) = Cli::try_parse_from([
            "crynux-webui",
            "settings",
            "get",
            "--output",
            "json",
            "--base-url",
            "http://node:7412/manager/v1",
        ]) else {
            panic!("expected parse");
        };
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.base_url.as_deref(), Some("http://node:7412/manager/v1"));
    }
}
