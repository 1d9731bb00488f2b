use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "WELLNESS_LOG";
const DEFAULT_LOG_DIRECTIVES: &str = "warn";
const LOG_FILE_NAME: &str = "wellness.log";

/// Sends logs to `<data dir>/wellness.log` so they never draw over the TUI.
/// The level comes from `WELLNESS_LOG` (e.g. `wellness_core=debug`).
pub fn init_logging(data_dir: &Path) -> Result<()> {
    fs::create_dir_all(data_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE_NAME))?;

    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))
        .map_err(|err| anyhow!("Invalid log filter: {}", err))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .map_err(|err| anyhow!("Logging already initialized: {}", err))?;

    Ok(())
}
