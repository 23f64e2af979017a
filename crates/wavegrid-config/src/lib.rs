//! Configuration for the wavegrid terminal page.
//!
//! Settings live in `config.toml` inside the platform config directory.
//! Every key is optional; anything missing falls back to its default, and
//! a missing file means "all defaults".

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use wavegrid_core::{AnimationSpeed, CellSize, FieldParams, LifecycleParams, RenderStyle};

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "wavegrid.log";

/// Errors raised while reading, validating or writing the config file.
#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "{}: {e}", path.display()),
            ConfigError::Parse(e) => write!(f, "invalid config file: {e}"),
            ConfigError::Serialize(e) => write!(f, "could not serialize config: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config value: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(_, e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Scrolling "trusted by" strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    /// Scroll speed in virtual pixels per second.
    pub speed: f32,
    /// Blank cells between two labels.
    pub spacing: u16,
    pub companies: Vec<String>,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            speed: 40.0,
            spacing: 6,
            companies: [
                "Coca-Cola", "Nestle", "AT&T", "BMW Group", "IBM", "Red Bull", "Sony", "Henkel",
                "Itau", "Priceline", "ifood", "DOD", "Dyson",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Forms relay used by the contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub endpoint: String,
    /// Relay access key; submissions are refused while it is empty.
    pub access_key: String,
    /// Subject used when the visitor leaves it blank.
    pub default_subject: String,
    pub email: String,
    pub phone: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.web3forms.com/submit".to_string(),
            access_key: String::new(),
            default_subject: "New contact from the website".to_string(),
            email: "contato@katrinasec.com".to_string(),
            phone: "+55 (11) 94539-0284".to_string(),
        }
    }
}

/// One entry of the services list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub title: String,
    pub description: String,
}

/// Page copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub brand: String,
    pub tagline: String,
    pub services: Vec<ServiceEntry>,
}

impl Default for PageConfig {
    fn default() -> Self {
        let service = |title: &str, description: &str| ServiceEntry {
            title: title.to_string(),
            description: description.to_string(),
        };
        Self {
            brand: "KATRINASEC".to_string(),
            tagline: "Protect what matters. Offensive security for real-world threats.".to_string(),
            services: vec![
                service(
                    "Penetration Testing",
                    "We replicate attacker behaviour, adapting vectors to each environment.",
                ),
                service(
                    "Social Engineering",
                    "Realistic phishing campaigns that test the most critical factor: people.",
                ),
                service(
                    "Code Review",
                    "Source code read with an offensive eye for logic, authn and authz flaws.",
                ),
            ],
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub speed: AnimationSpeed,
    pub field: FieldParams,
    pub render: RenderStyle,
    pub lifecycle: LifecycleParams,
    pub terminal: CellSize,
    pub marquee: MarqueeConfig,
    pub contact: ContactConfig,
    pub page: PageConfig,
}

impl Config {
    /// Default location of the config file.
    pub fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Default location of the log file.
    pub fn log_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
    }

    /// Load from the default location, or defaults if there is no file.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::from_toml_str(&content)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()
            .ok_or_else(|| ConfigError::Invalid("no home directory for config".to_string()))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(parent.to_path_buf(), e))?;
        }
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        debug!("saved config to {}", path.display());
        Ok(())
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        let f = &self.field;
        if !positive(f.x_gap) || !positive(f.y_gap) {
            return invalid("field.x_gap and field.y_gap must be positive");
        }
        if !(f.repulsion_radius >= 0.0) {
            return invalid("field.repulsion_radius must not be negative");
        }

        let r = &self.render;
        if !unit(r.base_opacity) || !unit(r.max_opacity) || !unit(r.glow_opacity) {
            return invalid("render opacities must be between 0 and 1");
        }
        if r.base_opacity > r.max_opacity {
            return invalid("render.base_opacity must not exceed render.max_opacity");
        }
        if !(r.glow_blur >= 0.0) {
            return invalid("render.glow_blur must not be negative");
        }

        if !positive(self.terminal.width_px) || !positive(self.terminal.height_px) {
            return invalid("terminal cell sizes must be positive");
        }
        if self.lifecycle.frame_interval_ms == 0 {
            return invalid("lifecycle.frame_interval_ms must be at least 1");
        }
        if !(self.marquee.speed >= 0.0) {
            return invalid("marquee.speed must not be negative");
        }
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "wavegrid")
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn unit(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}
