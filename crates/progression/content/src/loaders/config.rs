//! Engine configuration loader.

use std::path::Path;

use progression_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.command_buffer_size == 0 || config.event_buffer_size == 0 {
            anyhow::bail!("buffer sizes must be at least 1");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults() {
        let config = ConfigLoader::parse("query_timeout_ms = 500\n").unwrap();
        assert_eq!(config.query_timeout_ms, 500);
        assert_eq!(config.command_buffer_size, EngineConfig::DEFAULT_COMMAND_BUFFER_SIZE);
        assert_eq!(config, EngineConfig::default().with_query_timeout_ms(500));
    }

    #[test]
    fn zero_buffers_are_rejected() {
        assert!(ConfigLoader::parse("event_buffer_size = 0\n").is_err());
    }

    #[test]
    fn type_errors_are_reported() {
        let err = ConfigLoader::parse("query_timeout_ms = \"fast\"\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }
}
