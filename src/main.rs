//! MediaWall - four-window browser media wall
//!
//! Entry point: loads configuration, sets up tracing and runs one of the
//! CLI commands against the wall engine.

mod cli;
mod console;
mod screen;

use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mediawall_browser_chrome::ChromeLauncher;
use mediawall_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig, ScreenConfig};
use mediawall_core::{
    GeometryPlanner, MediaWall, PoolSettings, PresetCatalog, ScreenSize, SessionPool, WallWorker,
};

use cli::{Cli, Commands};

/// Commands waiting for the worker.
const QUEUE_DEPTH: usize = 16;

/// Initialize tracing with console and file output.
///
/// Log files are written to the configured log directory with daily rotation.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = logging.log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("mediawall")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer alive for the program duration.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Validation errors are fatal, warnings are only logged.
fn validate_config(config: &Config, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;

    for warning in &result.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    if !result.is_valid() {
        for e in &result.errors {
            error!("Config {}: {}", e.path, e.message);
        }
        return Err(format!(
            "{} has {} configuration error(s)",
            path.display(),
            result.errors.len()
        )
        .into());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    init_tracing(&config.logging)?;
    validate_config(&config, &cli.config)?;
    let catalog = PresetCatalog::from_config(&config.presets)?;

    match cli.command {
        Commands::Presets => {
            for name in catalog.list_names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Plan { width, height } => {
            let screen = screen::resolve(&ScreenConfig {
                width: width.or(config.screen.width),
                height: height.or(config.screen.height),
            });
            print_plan(&config, screen);
            Ok(())
        }
        Commands::Show { preset } => run_show(config, catalog, &preset).await,
        Commands::Console => {
            let (handle, task) = WallWorker::spawn(build_wall(&config, catalog), QUEUE_DEPTH);
            console::run(handle).await?;
            task.await?;
            Ok(())
        }
    }
}

fn build_wall(config: &Config, catalog: PresetCatalog) -> MediaWall {
    let screen = screen::resolve(&config.screen);
    info!(
        "Starting MediaWall v{} on a {}x{} screen",
        env!("CARGO_PKG_VERSION"),
        screen.width,
        screen.height
    );

    let launcher = Arc::new(ChromeLauncher::new(config.browser.clone(), &config.timing));
    let pool = SessionPool::new(launcher, PoolSettings::from_config(config, screen));
    MediaWall::new(catalog, pool)
}

fn print_plan(config: &Config, screen: ScreenSize) {
    let planner = GeometryPlanner::new(config.geometry);
    println!("screen {}x{}", screen.width, screen.height);
    for (slot, rect) in planner.plan_all(screen).iter().enumerate() {
        println!(
            "slot {}: x={} y={} width={} height={}",
            slot, rect.x, rect.y, rect.width, rect.height
        );
    }
}

/// Show one preset, hold the wall until Ctrl-C, then tear it down.
async fn run_show(
    config: Config,
    catalog: PresetCatalog,
    preset: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (handle, task) = WallWorker::spawn(build_wall(&config, catalog), QUEUE_DEPTH);

    let outcome = handle.show(preset).await?;
    if outcome.success {
        println!("{}", outcome.message);
        info!("Wall is up, press Ctrl-C to close it");
        tokio::signal::ctrl_c().await?;
    }

    handle.shutdown().await?;
    task.await?;

    if outcome.success {
        Ok(())
    } else {
        Err(outcome.message.into())
    }
}
