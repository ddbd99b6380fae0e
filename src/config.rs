//! Configuration file handling for braille-art.
//!
//! Loads configuration from `<config dir>/braille-art/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::params::{
    AdjustmentParams, GlyphGridRequest, DEFAULT_CHARS_H, DEFAULT_CHARS_W, DEFAULT_MAX_CHARS,
    DEFAULT_THRESHOLD,
};

/// Default bound for the decoded source before rendering.
pub const DEFAULT_SOURCE_MAX_WIDTH: u32 = 800;
pub const DEFAULT_SOURCE_MAX_HEIGHT: u32 = 600;

/// Configuration file structure for braille-art.
/// Loaded from <config dir>/braille-art/config.toml (or custom path via --config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub adjust: AdjustmentParams,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    pub keep_aspect: bool,
    pub threshold: u8,
    pub invert: bool,
    pub max_chars: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHARS_W,
            height: DEFAULT_CHARS_H,
            keep_aspect: false,
            threshold: DEFAULT_THRESHOLD,
            invert: false,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

/// Bound applied to the decoded image before rendering. Zero disables an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_SOURCE_MAX_WIDTH,
            max_height: DEFAULT_SOURCE_MAX_HEIGHT,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::info!("loaded config from {}", path.display());
            Ok(config)
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Load from a path the user named explicitly. The file must exist.
    pub fn load_explicit(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::IoError {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            });
        }
        Self::load(Some(path))
    }

    /// Grid request described by the `[grid]` section.
    pub fn grid_request(&self) -> GlyphGridRequest {
        GlyphGridRequest {
            chars_w: self.grid.width,
            chars_h: self.grid.height,
            threshold: self.grid.threshold,
            invert: self.grid.invert,
            keep_aspect: self.grid.keep_aspect,
            max_chars: self.grid.max_chars,
        }
    }

    /// Effective settings rendered back as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("braille-art").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/braille-art/config.toml")
        })
}

/// Commented default configuration written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# braille-art configuration

[adjust]
# Additive brightness shift (-100..100)
brightness = 0.0
# Contrast around mid-gray (-100..100)
contrast = 0.0
# Saturation (-100..100, -100 = grayscale)
saturation = 0.0
# Sharpening strength (0..5, 0 = off). Also brightens flat areas.
sharpness = 0.0

[grid]
# Output size in characters (each character is 2x4 dots)
width = 80
height = 30
# Derive height from width and the image aspect ratio
keep_aspect = false
# Luma cut point for a dot (0..255)
threshold = 128
# Dots for dark pixels instead of bright ones
invert = false
# Upper bound for width and height
max_chars = 400

[source]
# Decoded images are shrunk to fit this box first (0 = no limit)
max_width = 800
max_height = 600
"#;
