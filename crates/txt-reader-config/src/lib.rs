use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Marks a comment line in a rules file.
pub const COMMENT_PREFIX: char = '#';

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read rules file at {rules_path}: {source}")]
    RulesReadError {
        rules_path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Start from the built-in rule set.
    pub default_rules: bool,
    /// Extra rules, applied after the built-in ones.
    pub rules: Vec<String>,
    /// A file with one rule per line, read after `rules`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,
    /// Strip control characters and markup tags before substitution.
    pub clean: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_rules: true,
            rules: vec![],
            rules_file: None,
            clean: true,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde, then anchor relative paths at the config file
        config.rules_file = config.rules_file.map(|path| {
            let path = Self::expand_path(&path).unwrap_or(path);
            match config_path.parent() {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path,
            }
        });

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/txt-reader");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Rules to add on top of the built-in set: inline `rules` first, then
    /// the lines of `rules_file`.
    pub fn extra_rules(&self) -> Result<Vec<String>, ConfigError> {
        let mut rules = self.rules.clone();
        if let Some(rules_path) = &self.rules_file {
            let content = std::fs::read_to_string(rules_path).map_err(|source| {
                ConfigError::RulesReadError {
                    rules_path: rules_path.clone(),
                    source,
                }
            })?;
            rules.extend(parse_rules_file(&content));
        }
        Ok(rules)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

/// Rule lines of a rules file, skipping blanks and `#` comments
pub fn parse_rules_file(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .map(str::to_string)
}
