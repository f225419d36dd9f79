use md2docx_engine::{AsideStyle, CodeStyle, ConvertOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

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
}

/// Direct formatting for fenced code lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeConfig {
    pub font: String,
    pub size_pt: f32,
    pub shading: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        let code = CodeStyle::default();
        Self {
            font: code.font,
            size_pt: code.size_pt,
            shading: code.shading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub width_inches: f32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width_inches: ConvertOptions::default().image_width_inches,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsideConfig {
    pub title_shading: String,
    pub body_shading: String,
}

impl Default for AsideConfig {
    fn default() -> Self {
        let aside = AsideStyle::default();
        Self {
            title_shading: aside.title_shading,
            body_shading: aside.body_shading,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Template used when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    pub code: CodeConfig,
    pub image: ImageConfig,
    pub aside: AsideConfig,
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

        config.template = config
            .template
            .map(|template| Self::expand_path(&template).unwrap_or(template));

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

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/md2docx");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Formatting options for the engine.
    pub fn to_options(&self) -> ConvertOptions {
        ConvertOptions {
            code: CodeStyle {
                font: self.code.font.clone(),
                size_pt: self.code.size_pt,
                shading: self.code.shading.clone(),
            },
            aside: AsideStyle {
                title_shading: self.aside.title_shading.clone(),
                body_shading: self.aside.body_shading.clone(),
            },
            image_width_inches: self.image.width_inches,
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
