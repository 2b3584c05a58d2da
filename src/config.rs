use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConvertError;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub code: CodeConfig,
    pub rule: RuleConfig,
}

/// Body text font, applied to the Normal style
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub name: String,
    pub size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            name: "Arial".to_string(),
            size: 11.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodeConfig {
    pub font: String,
    pub size: f32,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            font: "Courier New".to_string(),
            size: 9.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleConfig {
    /// Number of underscores drawn for a horizontal rule
    pub width: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self { width: 30 }
    }
}

impl Config {
    /// The configuration shipped with the binary.
    pub fn compiled_default() -> Self {
        // build.rs rejects a default_config.toml that does not parse
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file. Missing keys fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let content = fs::read_to_string(path).map_err(|e| ConvertError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConvertError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_matches_code_defaults() {
        assert_eq!(Config::compiled_default(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("md2docx.toml");
        fs::write(&path, "[code]\nfont = \"Consolas\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.code.font, "Consolas");
        assert_eq!(config.code.size, 9.0);
        assert_eq!(config.font, FontConfig::default());
        assert_eq!(config.rule.width, 30);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[font\nname = 1").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ConvertError::Config { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = Config::load(Path::new("/nonexistent/md2docx.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/md2docx.toml"));
    }
}
