use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

// Environment variable naming a TOML file that replaces the embedded defaults.
pub const CONFIG_PATH_ENV: &str = "POKEDEX_CONFIG";

const DEFAULT_CONFIG: &str = include_str!("../config/config.toml");

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub pokeapi: PokeApiConfig,
    pub display: DisplayConfig,
    pub chart: ChartConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Where this configuration came from; set by the loaders, never read from TOML.
    #[serde(skip)]
    pub source: ConfigSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Embedded,
    File(String),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Embedded => write!(f, "embedded defaults"),
            ConfigSource::File(path) => write!(f, "{}", path),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PokeApiConfig {
    pub api_url: String,
    /// Locale codes tried in order when picking localized names and effect text.
    pub locales: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DisplayConfig {
    pub placeholder_sprite: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ChartConfig {
    pub enabled: bool,
    pub ceiling: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl Config {
    /// Loads the embedded defaults, or the file named by `POKEDEX_CONFIG` when set.
    ///
    /// Runs before logging is set up, so it reports through its result only.
    pub fn load() -> Result<Self> {
        Self::load_from(std::env::var(CONFIG_PATH_ENV).ok())
    }

    pub fn load_from(path: Option<String>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(&path),
            None => Self::from_toml(DEFAULT_CONFIG),
        }
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::ConfigError(format!("failed to read {}: {}", path, e)))?;
        let mut config = Self::from_toml(&raw)?;
        config.source = ConfigSource::File(path.to_string());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.pokeapi.api_url.trim().is_empty() {
            return Err(AppError::ConfigError("pokeapi.api_url is empty".to_string()));
        }
        if self.pokeapi.locales.is_empty() {
            return Err(AppError::ConfigError(
                "pokeapi.locales needs at least one locale".to_string(),
            ));
        }
        if self.chart.ceiling == 0 {
            return Err(AppError::ConfigError(
                "chart.ceiling must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Root lookup URL for an already normalized query.
    pub fn entity_url(&self, query: &str) -> String {
        format!("{}/pokemon/{}", self.pokeapi.api_url.trim_end_matches('/'), query)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pokeapi: PokeApiConfig {
                api_url: "https://pokeapi.co/api/v2".to_string(),
                locales: vec!["es".to_string()],
            },
            display: DisplayConfig {
                placeholder_sprite: "img/pokemon-ir.png".to_string(),
            },
            chart: ChartConfig {
                enabled: true,
                ceiling: 200,
            },
            server: ServerConfig {
                bind: "0.0.0.0:3000".to_string(),
            },
            logging: LoggingConfig::default(),
            source: ConfigSource::Embedded,
        }
    }
}
