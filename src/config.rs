use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::markers;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub comparison: ComparisonConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ComparisonConfig {
    /// Characters stripped from both transcripts before comparing (e.g. stress marks)
    #[serde(default)]
    pub ignored_characters: String,
    #[serde(default = "default_pause_marker")]
    pub pause_marker: String,
}

fn default_pause_marker() -> String {
    markers::PAUSE.to_string()
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        ComparisonConfig {
            ignored_characters: String::new(),
            pause_marker: default_pause_marker(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    /// Emit `style="color: ..;"` spans instead of highlight classes
    #[serde(default)]
    pub inline_styles: bool,
    #[serde(default = "default_blank_placeholder")]
    pub blank_placeholder: String,
}

fn default_blank_placeholder() -> String {
    markers::HTML_BLANK.to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            inline_styles: false,
            blank_placeholder: default_blank_placeholder(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            comparison: ComparisonConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".pronounce-diff"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("settings.yaml"))
    }

    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path()?)
    }

    /// Load `path`, writing the defaults there first if it does not exist
    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load_from(path);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }
        let config = Config::default();
        config.save_to(path)?;
        // stdout carries command output
        eprintln!("Created default config at: {}", path.display());
        Ok(config)
    }

    /// Load and validate a settings file from an explicit location
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let marker = &self.comparison.pause_marker;
        if marker.is_empty() {
            bail!("pause_marker cannot be empty");
        }
        if marker.chars().any(char::is_whitespace) {
            bail!("pause_marker cannot contain whitespace");
        }

        let ignored = &self.comparison.ignored_characters;
        if ignored.chars().any(char::is_whitespace) {
            bail!("ignored_characters cannot contain whitespace");
        }
        if ignored.chars().any(|c| marker.contains(c)) {
            bail!("ignored_characters cannot overlap the pause marker");
        }

        if self.render.blank_placeholder.is_empty() {
            bail!("blank_placeholder cannot be empty");
        }

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}
