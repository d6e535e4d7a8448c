// src/config.rs

use crate::error::{LoadError, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_PATH: &str = "../data/training_data.csv";
pub const DEFAULT_DELIMITER: &str = ", ";

/// What to do with data rows that don't fit the sampled shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Bad numbers and short/long rows fail the load.
    #[default]
    Strict,
    /// Bad numbers become `0.0`, long rows are truncated, short rows are
    /// padded with `0.0`. Each coercion is logged at `warn`.
    Lenient,
}

/// Where to read from and how to split it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub path: PathBuf,
    pub delimiter: String,
    pub strictness: Strictness,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            delimiter: DEFAULT_DELIMITER.to_string(),
            strictness: Strictness::default(),
        }
    }
}

impl LoadConfig {
    pub fn new(path: impl Into<PathBuf>, delimiter: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            delimiter: delimiter.into(),
            strictness: Strictness::default(),
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Read a YAML config. Missing keys fall back to the defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let cfg: LoadConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(LoadError::Config("delimiter must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_match_the_historical_constants() {
        let cfg = LoadConfig::default();
        assert_eq!(cfg.path, PathBuf::from("../data/training_data.csv"));
        assert_eq!(cfg.delimiter, ", ");
        assert_eq!(cfg.strictness, Strictness::Strict);
    }

    #[test]
    fn yaml_fills_missing_keys_with_defaults() {
        let cfg = LoadConfig::from_yaml_str("path: data/x.csv\nstrictness: lenient\n").unwrap();
        assert_eq!(cfg.path, PathBuf::from("data/x.csv"));
        assert_eq!(cfg.delimiter, ", ");
        assert_eq!(cfg.strictness, Strictness::Lenient);
    }

    #[test]
    fn empty_delimiter_is_rejected() {
        let err = LoadConfig::from_yaml_str("delimiter: \"\"\n").unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn unknown_strictness_is_a_yaml_error() {
        let err = LoadConfig::from_yaml_str("strictness: sloppy\n").unwrap_err();
        assert!(matches!(err, LoadError::Yaml(_)));
    }

    #[test]
    fn reads_config_from_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        writeln!(tmp, "path: a.csv\ndelimiter: \";\"").unwrap();
        let cfg = LoadConfig::from_yaml_file(tmp.path()).unwrap();
        assert_eq!(cfg.path, PathBuf::from("a.csv"));
        assert_eq!(cfg.delimiter, ";");
    }

    #[test]
    fn missing_config_file_is_io() {
        let err = LoadConfig::from_yaml_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
