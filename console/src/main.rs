// Console entry point: interactive paper-towel cost comparison.
mod app;
mod cli;
mod components;
mod config;
mod input;
mod state;

use anyhow::Result;
use app::App;
use clap::Parser;
use cli::Cli;
use config::AppConfig;
use engine::services::ComparisonService;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    // Logs go to stderr so they do not interleave with the prompts.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut app_config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_default()?,
    };
    if let Some(data) = cli.data {
        app_config.engine.data_path = data;
    }
    if cli.no_color {
        app_config.display.color = false;
    }
    tracing::info!(
        version = %app_config.version,
        data = %app_config.engine.data_path.display(),
        "Starting towel-compare"
    );

    let service = ComparisonService::from_settings(app_config.engine.clone())?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut app = App::new(service, &app_config, stdin.lock(), stdout.lock());
    app.run()
}
