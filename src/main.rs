use tracing_subscriber::EnvFilter;

mod cli;
use cli::{parse_cli_mode, run_command, CliMode, USAGE};
mod tui;
use tui::run_tui;

use daybook::storage::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let cli_mode = match parse_cli_mode(std::env::args().skip(1)) {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    if let CliMode::Help = cli_mode {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = Config::load_or_create()?;

    let result = match cli_mode {
        CliMode::Calendar => run_tui(config).await,
        command => run_command(command, &config).await,
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
    }

    Ok(())
}

fn setup_logging() {
    let log_dir = Config::config_dir();

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "daybook.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("daybook started");
}
