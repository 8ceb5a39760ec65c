use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use tracing::trace;

pub const LOG_ENV: &str = "ATLAS_LOG";
const DEFAULT_FILTER: &str = "atlas_escape=info";

/// Sends tracing output to `path`; the terminal belongs to the UI.
///
/// If the file can't be created the game runs without logging.
pub fn init_tracing(path: &Path) -> bool {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .is_ok();

    trace!("finished");
    installed
}
