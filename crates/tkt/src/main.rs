use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tkt::alarm::{AdbPlatform, AlarmCapabilityBridge, SdkVersion, StaticPlatform};
use tkt::channel::MethodChannel;
use tkt::config::{AppConfig, PlatformConfig, CONFIG_ENV_VAR};
use tkt::course::ScheduleWidget;
use tkt::server::create_router;
use tkt::store::{MemoryStore, PreferenceStore, SqlitePreferenceStore};
use tkt::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tkt=info")),
        )
        .init();

    let config = match config_path() {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            AppConfig::load(&path)?
        }
        None => AppConfig::default(),
    };

    let state = Arc::new(build_state(&config)?);
    let app = create_router(state);

    let address = format!("{}:{}", config.server.address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// The first command-line argument, or the `TKT_CONFIG` environment variable.
fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
}

fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn PreferenceStore> = match &config.store.path {
        Some(path) => {
            info!("Reading preferences from {}", path.display());
            Arc::new(
                SqlitePreferenceStore::open(path, &config.store.preferences_name)
                    .with_context(|| format!("Failed to open {}", path.display()))?,
            )
        }
        None => {
            info!("No store path configured, using an empty in-memory store");
            Arc::new(MemoryStore::new())
        }
    };
    let widget = Arc::new(ScheduleWidget::new(store, &config.store.courses_key));

    let bridge = match &config.platform {
        PlatformConfig::Static {
            sdk_version,
            exact_alarms_allowed,
        } => AlarmCapabilityBridge::new(
            StaticPlatform::new(SdkVersion(*sdk_version), *exact_alarms_allowed),
            &config.package_name,
        )?,
        PlatformConfig::Adb { adb_path, serial } => AlarmCapabilityBridge::new(
            AdbPlatform::connect(adb_path, serial.clone(), &config.package_name)
                .context("Failed to connect to device")?,
            &config.package_name,
        )?,
    };

    let channel = MethodChannel::new(Arc::new(bridge), widget.clone());
    Ok(AppState::new(widget, channel))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
