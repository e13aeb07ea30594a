//! swagger-host — entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI args
//!   3. Load config (file, then env, then CLI overrides)
//!   4. Resolve effective log level (CLI `-v` flags > RUST_LOG > config)
//!   5. Init logger once
//!   6. Build the UI backend and router
//!   7. Spawn Ctrl-C → shutdown signal watcher
//!   8. Serve until shutdown

use tokio_util::sync::CancellationToken;
use tracing::info;

use swagger_host::config::{self, Overrides};
use swagger_host::error::AppError;
use swagger_host::logger;
use swagger_host::server::Server;

const USAGE: &str = "\
Usage: swagger-host [OPTIONS]

Options:
  -h, --help                 Print help
  -f, --config <PATH>        Path to configuration file (default: config/default.toml)
  -b, --bind <ADDR>          Listen address (overrides server.bind)
  -s, --spec <PATH>          OpenAPI document to host (overrides spec.path)
  -v, -vv, -vvv, -vvvv       Increase logging verbosity";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(CliCommand::Run(args)) => args,
        Ok(CliCommand::Help) => {
            println!("{USAGE}");
            return Ok(());
        }
        Err(msg) => return Err(AppError::Config(msg)),
    };

    let overrides = Overrides::from_env().with(Overrides {
        bind: args.bind.clone(),
        log_level: None,
        spec_path: args.spec_path.clone(),
    });
    let config = config::load(args.config_path.as_deref(), &overrides)?;

    let effective_log_level = args.log_level.unwrap_or(config.log_level.as_str());
    logger::init(effective_log_level, args.log_level.is_some())?;

    info!(
        bind = %config.server.bind,
        prefix = %config.ui.prefix,
        spec_route = %config.spec.route,
        spec_hosted = config.spec.path.is_some(),
        configured_log_level = %config.log_level,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    let server = Server::new(&config)?;

    // Shared shutdown token — Ctrl-C cancels it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received — initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    server.run(shutdown).await
}

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
    bind: Option<String>,
    spec_path: Option<String>,
}

#[derive(Debug, PartialEq)]
enum CliCommand {
    Run(CliArgs),
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliCommand, String> {
    let mut verbosity = 0u8;
    let mut out = CliArgs::default();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-f" | "--config" => out.config_path = Some(value_for(&arg, iter.next())?),
            "-b" | "--bind" => out.bind = Some(value_for(&arg, iter.next())?),
            "-s" | "--spec" => out.spec_path = Some(value_for(&arg, iter.next())?),
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                let n = u8::try_from(a.len() - 1).unwrap_or(u8::MAX);
                verbosity = verbosity.saturating_add(n);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    out.log_level = logger::level_for_verbosity(verbosity);
    Ok(CliCommand::Run(out))
}

fn value_for(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("{flag} requires an argument"))
}
