mod app;
mod controller;
mod display;
mod picker;

use anyhow::Context;
use radio_core::config::Config;
use radio_core::player::MpvEngine;
use radio_core::probe::StreamProbe;
use radio_core::stations::{parse_stations, stations_path};

use crate::app::App;
use crate::display::Display;
use crate::picker::InquireSelector;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let data_dir = radio_core::platform::data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;
    let log_path = data_dir.join("radio.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    // The terminal belongs to the picker, so logs go to a file.  RUST_LOG
    // overrides; HTTP client internals are noisy at debug.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        "info,radio=debug,radio_core=debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string()
    });
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("radio log: {}", log_path.display());
    tracing::info!("radio starting…");

    let config = Config::load().context("failed to load settings")?;
    tracing::info!("settings: {:?}", Config::config_path());

    // Fail fast on a missing station file instead of after the first prompt.
    let stations_path = stations_path(&config);
    let stations = parse_stations(&stations_path)?;
    tracing::info!("{} stations in {:?}", stations.len(), stations_path);

    let mut app = App {
        stations_path,
        selector: InquireSelector::new(config.display.page_size),
        probe: StreamProbe::from_config(&config).context("failed to build HTTP client")?,
        engine: MpvEngine::new(&config),
        display: Display::stdout(config.display.color),
        interrupt: || async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("cannot listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        },
    };

    app.display.clear()?;
    app.run().await
}
