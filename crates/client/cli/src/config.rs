//! Driver configuration from `KEYSTRIKE_*` environment variables.
use std::env;
use std::path::{Path, PathBuf};

/// Headless driver configuration.
///
/// Command-line flags override these values; see `main.rs`.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub seed: Option<String>,
    /// `campaign`, `endless` or `slice`.
    pub mode: Option<String>,
    pub profile: Option<String>,
    /// Directory of RON/TOML tables overriding the built-in content.
    pub data_dir: Option<PathBuf>,
    pub save_dir: Option<PathBuf>,
    /// When set, logs are also written to `keystrike.log` here.
    pub log_dir: Option<PathBuf>,
    /// Prints the prompt word after every night event batch.
    pub show_prompt: bool,
}

impl CliConfig {
    /// Construct driver configuration from environment variables.
    ///
    /// Environment variables:
    /// - `KEYSTRIKE_SEED` - Run seed
    /// - `KEYSTRIKE_MODE` - Game mode (default: campaign)
    /// - `KEYSTRIKE_PROFILE` - Wave profile for `slice` mode
    /// - `KEYSTRIKE_DATA_DIR` - Content override directory
    /// - `KEYSTRIKE_SAVE_DIR` - Save directory (default: platform data dir)
    /// - `KEYSTRIKE_LOG_DIR` - Enables the file log layer
    /// - `KEYSTRIKE_SHOW_PROMPT` - `true`/`false` (default: true)
    pub fn from_env() -> Self {
        Self {
            seed: read_env("KEYSTRIKE_SEED"),
            mode: read_env("KEYSTRIKE_MODE"),
            profile: read_env("KEYSTRIKE_PROFILE"),
            data_dir: read_env("KEYSTRIKE_DATA_DIR"),
            save_dir: read_env("KEYSTRIKE_SAVE_DIR"),
            log_dir: read_env("KEYSTRIKE_LOG_DIR"),
            show_prompt: read_env("KEYSTRIKE_SHOW_PROMPT").unwrap_or(true),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok().filter(|value| !value.is_empty())?.parse().ok()
}

/// Loads a `.env` file into the process environment, from `path` or the
/// current directory upward.
///
/// A missing file is not a problem. Any other failure is handed back so it
/// can be logged once logging is up.
pub fn load_env_file(path: Option<&Path>) -> Option<dotenvy::Error> {
    let result = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    match result {
        Err(err) if !err.not_found() => Some(err),
        _ => None,
    }
}
