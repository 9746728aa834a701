//! YAML configuration file (`~/.inkwell.yaml`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use inkwell_ai::AiConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".inkwell.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiConfig,
    pub theme: ThemeConfig,
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// `dark`, `light`, `monokai` or `solarized`.
    pub current: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            current: "dark".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Spaces inserted by Tab.
    pub tab_size: usize,
    pub show_line_numbers: bool,
    /// Enter repeats the current line's leading whitespace.
    pub auto_indent: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            show_line_numbers: true,
            auto_indent: true,
        }
    }
}

/// `~/.inkwell.yaml`, or `.inkwell.yaml` in the working directory when no home is known.
pub fn default_path() -> PathBuf {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
}

impl Config {
    /// Load the config at `path`.
    ///
    /// A missing file yields the defaults and is written out for the user to edit; a failure
    /// to write it is logged and otherwise ignored.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let config = Config::default();
                match config.save(path) {
                    Ok(()) => tracing::info!(path = %path.display(), "wrote default config"),
                    Err(err) => tracing::warn!(error = %err, "could not write default config"),
                }
                return Ok(config);
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the config as YAML, creating parent directories.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(io::Error::other)?;
        fs::write(path, yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkwell_ai::Provider;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_or_create(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "ai:\n  enabled: true\n  provider: openrouter\ntheme:\n  current: monokai\n",
        )
        .unwrap();

        let config = Config::load_or_create(&path).unwrap();
        assert!(config.ai.enabled);
        assert_eq!(config.ai.provider, Provider::OpenRouter);
        assert_eq!(config.ai.model, "llama3.2");
        assert_eq!(config.theme.current, "monokai");
        assert_eq!(config.editor, EditorConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "ai: [unterminated").unwrap();

        let err = Config::load_or_create(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn test_unknown_provider_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "ai:\n  provider: gemini\n").unwrap();

        assert!(Config::load_or_create(&path).is_err());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "").unwrap();

        assert_eq!(Config::load_or_create(&path).unwrap(), Config::default());
    }
}
