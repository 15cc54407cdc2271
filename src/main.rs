// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, load config, run one command.
// - Errors reach `main` as `anyhow::Error` and are mapped to exit codes.

use anyhow::Context;
use cacoon::api::ApiClient;
use cacoon::cli::{Cli, Commands};
use cacoon::commands::{self, OutputOptions};
use cacoon::config::{self, Config};
use cacoon::error::ExitCode;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = match run(cli) {
        Ok(()) => ExitCode::Success,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::for_error(&err)
        }
    };
    std::process::exit(code.as_i32());
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Configuration is loaded before any request is built.
    config::load_dotenv().context("Failed to load environment")?;
    let config = Config::from_env().context("Invalid configuration")?;
    let api = ApiClient::new(config)?;

    let opts = OutputOptions {
        pretty: cli.pretty,
        quiet: cli.quiet,
    };
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Diagram(cmd) => commands::run(cmd, &api, &opts, &mut stdout)?,
    }
    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the `-v` flags when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cacoon={}", level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
