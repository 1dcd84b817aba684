use serde::{Deserialize, Serialize};
use std::fs;

pub const ENV_CONFIG: &str = "BLACKJACK_CONFIG";
pub const ENV_SEED: &str = "BLACKJACK_SEED";
pub const ENV_ASCII: &str = "BLACKJACK_ASCII";
pub const ENV_LOG: &str = "BLACKJACK_LOG";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub ascii_suits: bool,
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub ascii_suits: ValueSource,
    pub log_level: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            ascii_suits: ValueSource::Default,
            log_level: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            ascii_suits: false,
            log_level: "warn".into(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Resolves the configuration from defaults, the TOML file named by
/// `BLACKJACK_CONFIG`, and `BLACKJACK_*` environment overrides, in that order.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve_with(|key| std::env::var(key).ok())
}

fn resolve_with(env: impl Fn(&str) -> Option<String>) -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env(ENV_CONFIG).filter(|p| !p.is_empty()) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        apply_file(&mut cfg, &mut sources, f);
    }

    if let Some(seed) = env(ENV_SEED)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(ascii) = env(ENV_ASCII)
        && !ascii.is_empty()
    {
        cfg.ascii_suits =
            parse_bool(&ascii).ok_or_else(|| ConfigError::Invalid("Invalid ascii flag".into()))?;
        sources.ascii_suits = ValueSource::Env;
    }
    if let Some(level) = env(ENV_LOG)
        && !level.is_empty()
    {
        cfg.log_level = level.to_ascii_lowercase();
        sources.log_level = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ascii_suits: Option<bool>,
    #[serde(default)]
    log_level: Option<String>,
}

fn apply_file(cfg: &mut Config, sources: &mut ConfigSources, f: FileConfig) {
    if let Some(v) = f.seed {
        cfg.seed = Some(v);
        sources.seed = ValueSource::File;
    }
    if let Some(v) = f.ascii_suits {
        cfg.ascii_suits = v;
        sources.ascii_suits = ValueSource::File;
    }
    if let Some(v) = f.log_level {
        cfg.log_level = v.to_ascii_lowercase();
        sources.log_level = ValueSource::File;
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !LOG_LEVELS.contains(&cfg.log_level.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: log_level must be one of {}",
            LOG_LEVELS.join(", ")
        )));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
