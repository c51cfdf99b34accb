//! Bootstrap configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration required to bootstrap the progression runtime.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    /// Directory holding `paths.ron`, `lang.toml` and `config.toml`.
    pub data_dir: PathBuf,
    /// Completion records file. Defaults to `completions.json` in the data directory.
    pub completions_file: Option<PathBuf>,
    /// Overrides `query_timeout_ms` from `config.toml`.
    pub query_timeout_ms: Option<u64>,
    /// Directory for the log file. Defaults to the platform log directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            data_dir: crate::dirs::data_dir(),
            completions_file: None,
            query_timeout_ms: None,
            log_dir: None,
        }
    }
}

impl BootstrapConfig {
    pub const COMPLETIONS_FILE: &'static str = "completions.json";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load `.env` if present, then read the process environment.
    pub fn load() -> Self {
        // Silently ignore a missing .env file
        let _ = dotenvy::dotenv();
        Self::from_env()
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PROGRESSION_DATA_DIR` - Content directory (default: platform data dir)
    /// - `PROGRESSION_COMPLETIONS_FILE` - Completion records file (default: `<data dir>/completions.json`)
    /// - `PROGRESSION_QUERY_TIMEOUT_MS` - Hook query bound (default: from `config.toml`)
    /// - `PROGRESSION_LOG_DIR` - Log file directory (default: platform log dir)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("PROGRESSION_DATA_DIR").filter(|s| !s.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config.completions_file = lookup("PROGRESSION_COMPLETIONS_FILE").map(PathBuf::from);
        config.query_timeout_ms =
            parse_var::<u64>(lookup("PROGRESSION_QUERY_TIMEOUT_MS")).filter(|ms| *ms > 0);
        config.log_dir = lookup("PROGRESSION_LOG_DIR").map(PathBuf::from);

        config
    }

    /// Resolved path of the completion records file.
    pub fn completions_path(&self) -> PathBuf {
        self.completions_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(Self::COMPLETIONS_FILE))
    }

    /// Resolved directory of the log file.
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(crate::dirs::log_dir)
    }
}

fn parse_var<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}
