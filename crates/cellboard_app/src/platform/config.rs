use std::path::PathBuf;
use std::time::Duration;

use cellboard_core::DEFAULT_REQUEST_TARGET;
use cellboard_engine::FetchSettings;

/// Compile-time application settings. There are no flags or environment
/// overrides; everything is fixed here.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub request_target: String,
    pub storage_dir: PathBuf,
    pub tick_rate: Duration,
    pub fetch: FetchSettings,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            request_target: DEFAULT_REQUEST_TARGET.to_string(),
            storage_dir: default_storage_dir(),
            tick_rate: Duration::from_millis(100),
            fetch: FetchSettings::default(),
            log_file: PathBuf::from("./cellboard.log"),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("cellboard"))
        .unwrap_or_else(|| PathBuf::from(".cellboard"))
}
