//! Command-line reachability check (binary).
//!
//! A thin wrapper around the library's fail-fast probe, meant to run before a
//! test suite:
//! - Loads a `.env` file if present
//! - Parses the servers to probe and any extra headers
//! - Exits with status 1 on the first unreachable server

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use remote_http_testing::config::SERVER_ENV_VAR;
use remote_http_testing::initialization::init_logger_with;
use remote_http_testing::{LogFormat, LogLevel, Session, SessionConfig};

/// Checks that remote HTTP servers answer `GET` with 200 within two seconds.
#[derive(Debug, Parser)]
#[command(name = "remote-http-check", version, about)]
struct Cli {
    /// Server URLs to probe; defaults to $REMOTE_HTTP_TESTING_SERVER
    servers: Vec<String>,

    /// Display name used in the failure message
    #[arg(long)]
    name: Option<String>,

    /// Extra request header as `Name: Value` (repeatable)
    #[arg(long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected `Name: Value`, got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in {raw:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let mut config = SessionConfig::from_env().context("Invalid environment")?;
    config.headers = cli.headers;

    let servers = if cli.servers.is_empty() {
        match config.server.clone() {
            Some(server) => vec![server],
            None => {
                eprintln!("remote-http-check error: no server given and {SERVER_ENV_VAR} is not set");
                process::exit(2);
            }
        }
    } else {
        cli.servers
    };

    let session = Session::new(config).context("Failed to initialize HTTP client")?;
    for server in &servers {
        // Exits the process on failure
        session.ensure_reachable(server, cli.name.as_deref()).await;
        println!(
            "OK: {}",
            remote_http_testing::server_description(server, cli.name.as_deref())
        );
    }
    Ok(())
}
