/// Path constants and utilities for local state
use std::path::PathBuf;
use once_cell::sync::OnceCell;

// Static storage for configurable data root
static DATA_ROOT: OnceCell<String> = OnceCell::new();

const DEFAULT_DATA_ROOT: &str = ".leadgen";

pub const CREDITS_FILE_NAME: &str = "credits.json";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Initialize the data root directory. Can only be called once.
/// If not called, the default `.leadgen` will be used.
pub fn init_data_root(path: String) -> Result<(), String> {
    DATA_ROOT.set(path).map_err(|_| "Data root already initialized".to_string())
}

fn get_data_root() -> &'static str {
    DATA_ROOT.get().map(|s| s.as_str()).unwrap_or(DEFAULT_DATA_ROOT)
}

pub fn data_root() -> PathBuf {
    PathBuf::from(get_data_root())
}

pub fn credits_file() -> PathBuf {
    data_root().join(CREDITS_FILE_NAME)
}

pub fn default_config_file() -> PathBuf {
    data_root().join(CONFIG_FILE_NAME)
}
