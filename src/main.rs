use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use taskrelay::cli::Cli;
use taskrelay::config::Config;
use taskrelay::utils::error::{report_error, AppError, EXIT_USAGE};
use taskrelay::utils::terminal::configure_colors;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<AppError>() {
            Some(app_err) => {
                report_error(app_err);
                ExitCode::from(app_err.exit_code())
            }
            None => {
                eprintln!("taskrelay: {:#}", err);
                ExitCode::from(EXIT_USAGE)
            }
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (mut config, source) = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    let color = configure_colors(config.general.color);
    debug!(?source, color, "configuration loaded");

    cli.resolved_command().execute(config, &source, cli.dry_run).await
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(cli.verbose >= 2),
        )
        .init();
}
