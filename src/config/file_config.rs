use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML configuration file. Every field mirrors a CLI argument and
/// overrides it when present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub db_path: Option<String>,
    pub port: Option<u16>,
    pub logging_level: Option<String>,
    pub static_dir: Option<String>,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {:?}", path.as_ref()))?;
        toml::from_str(&text).context("Failed to parse config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_partial_config() {
        let config: FileConfig = toml::from_str(
            r#"
            port = 9090
            logging_level = "headers"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, Some(9090));
        assert_eq!(config.logging_level.as_deref(), Some("headers"));
        assert_eq!(config.db_path, None);
        assert_eq!(config.static_dir, None);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "db_path = \"/tmp/catalog.db\"").unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.db_path.as_deref(), Some("/tmp/catalog.db"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(FileConfig::load("/nonexistent/config.toml").is_err());
    }
}
