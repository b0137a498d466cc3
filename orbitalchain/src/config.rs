use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};
use tletypes::prelude::GENESIS_KEY;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}'. {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse config file. {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration. {0}")]
    Invalid(String),
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Ledger snapshot file
    pub ledger: PathBuf,
    /// Pretty-print query output
    pub pretty: bool,
    pub import: ImportConfig,
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImportConfig {
    pub key_prefix: String,
    pub start_index: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger: PathBuf::from("ledger.json"),
            pretty: false,
            import: ImportConfig::default(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            key_prefix: "TLE".to_owned(),
            start_index: 1,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str_checked(&content)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;

        if cfg.ledger.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("ledger path is empty".to_owned()));
        }

        let first_key = format!("{}{}", cfg.import.key_prefix, cfg.import.start_index);
        if first_key == GENESIS_KEY {
            warn!(
                key = GENESIS_KEY,
                "Import configuration overwrites the genesis record"
            );
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn empty_config_is_default() {
        assert_eq!(Config::from_str_checked("").unwrap(), Config::default());
    }

    #[test]
    fn full_config() {
        let cfg = Config::from_str_checked(indoc! {r#"
            ledger = "/var/lib/orbitalchain/ledger.json"
            pretty = true

            [import]
            key-prefix = "SAT-"
            start-index = 100
        "#})
        .unwrap();
        assert_eq!(cfg.ledger, PathBuf::from("/var/lib/orbitalchain/ledger.json"));
        assert!(cfg.pretty);
        assert_eq!(cfg.import.key_prefix, "SAT-");
        assert_eq!(cfg.import.start_index, 100);
    }

    #[test]
    fn partial_import_table() {
        let cfg = Config::from_str_checked("[import]\nstart-index = 0\n").unwrap();
        assert_eq!(cfg.import.key_prefix, "TLE");
        assert_eq!(cfg.import.start_index, 0);
    }

    #[test]
    fn rejects_unknown_types_and_empty_ledger() {
        assert!(matches!(
            Config::from_str_checked("pretty = \"yes\""),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            Config::from_str_checked("ledger = \"\""),
            Err(ConfigError::Invalid(_))
        ));
    }
}
