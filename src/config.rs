//! Loader configuration.
//!
//! Controls how delimited expression files are read: which character separates
//! cells and which status labels mark the two sample groups. Every field has a
//! default, so a JSON config only needs the fields it overrides.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Number of decimal places used for reported values and percentages.
pub const ROUND_DECIMALS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Cell separator
    pub delimiter: char,
    /// Status label of the reference group
    pub normal_label: String,
    /// Status label of the disease group
    pub case_label: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            delimiter: ',',
            normal_label: "normal".to_string(),
            case_label: "HCC".to_string(),
        }
    }
}

impl LoaderConfig {
    /// Read a config from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_labels(mut self, normal_label: &str, case_label: &str) -> Self {
        self.normal_label = normal_label.to_string();
        self.case_label = case_label.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_liver_dataset() {
        let config = LoaderConfig::default();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.normal_label, "normal");
        assert_eq!(config.case_label, "HCC");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"delimiter": "\t"}}"#).unwrap();

        let config = LoaderConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.delimiter, '\t');
        assert_eq!(config.case_label, "HCC");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        assert!(LoaderConfig::from_json_file(file.path()).is_err());
    }
}
