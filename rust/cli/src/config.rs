use serde::{Deserialize, Serialize};
use std::fs;

use blackjack_engine::shoe::{DEFAULT_DECKS, DEFAULT_PENETRATION};

/// Environment variable naming a TOML configuration file.
pub const CONFIG_ENV: &str = "BLACKJACK_CONFIG";

/// Largest shoe a table will hold.
pub const MAX_DECKS: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub decks: usize,
    pub seed: Option<u64>,
    pub penetration_min: usize,
    pub penetration_max: usize,
    pub starting_budget: u32,
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
    pub decks: ValueSource,
    pub seed: ValueSource,
    pub penetration_min: ValueSource,
    pub penetration_max: ValueSource,
    pub starting_budget: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            decks: ValueSource::Default,
            seed: ValueSource::Default,
            penetration_min: ValueSource::Default,
            penetration_max: ValueSource::Default,
            starting_budget: ValueSource::Default,
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
            decks: DEFAULT_DECKS,
            seed: None,
            penetration_min: *DEFAULT_PENETRATION.start(),
            penetration_max: *DEFAULT_PENETRATION.end(),
            starting_budget: blackjack_engine::participant::STARTING_BUDGET,
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

impl std::error::Error for ConfigError {}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves the configuration: defaults, then the file named by
/// `BLACKJACK_CONFIG`, then `BLACKJACK_*` environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.decks {
            cfg.decks = v;
            sources.decks = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.penetration_min {
            cfg.penetration_min = v;
            sources.penetration_min = ValueSource::File;
        }
        if let Some(v) = f.penetration_max {
            cfg.penetration_max = v;
            sources.penetration_max = ValueSource::File;
        }
        if let Some(v) = f.starting_budget {
            cfg.starting_budget = v;
            sources.starting_budget = ValueSource::File;
        }
    }

    if let Some(v) = env_value("BLACKJACK_DECKS", "decks")? {
        cfg.decks = v;
        sources.decks = ValueSource::Env;
    }
    if let Some(v) = env_value("BLACKJACK_SEED", "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("BLACKJACK_PENETRATION_MIN", "penetration_min")? {
        cfg.penetration_min = v;
        sources.penetration_min = ValueSource::Env;
    }
    if let Some(v) = env_value("BLACKJACK_PENETRATION_MAX", "penetration_max")? {
        cfg.penetration_max = v;
        sources.penetration_max = ValueSource::Env;
    }
    if let Some(v) = env_value("BLACKJACK_BUDGET", "starting_budget")? {
        cfg.starting_budget = v;
        sources.starting_budget = ValueSource::Env;
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
    decks: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    penetration_min: Option<usize>,
    #[serde(default)]
    penetration_max: Option<usize>,
    #[serde(default)]
    starting_budget: Option<u32>,
}

fn env_value<T: std::str::FromStr>(key: &str, name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", name, raw))),
        _ => Ok(None),
    }
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.decks == 0 || cfg.decks > MAX_DECKS {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: decks must be between 1 and {}",
            MAX_DECKS
        )));
    }
    if cfg.penetration_min > cfg.penetration_max {
        return Err(ConfigError::Invalid(
            "Invalid configuration: penetration_min must be <= penetration_max".into(),
        ));
    }
    let shoe_size = cfg.decks * 52;
    if cfg.penetration_max >= shoe_size {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: penetration_max must be < {} for {} deck(s)",
            shoe_size, cfg.decks
        )));
    }
    if cfg.starting_budget == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_budget must be >0".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: &[&str] = &[
        CONFIG_ENV,
        "BLACKJACK_DECKS",
        "BLACKJACK_SEED",
        "BLACKJACK_PENETRATION_MIN",
        "BLACKJACK_PENETRATION_MAX",
        "BLACKJACK_BUDGET",
    ];

    fn clear_env() {
        for key in VARS {
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_when_nothing_is_set() {
        clear_env();
        let resolved = load_with_sources().expect("defaults are valid");
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.config.decks, 6);
        assert_eq!(resolved.config.penetration_min, 50);
        assert_eq!(resolved.config.penetration_max, 80);
        assert_eq!(resolved.sources.decks, ValueSource::Default);
        assert_eq!(resolved.sources.seed, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn file_values_override_defaults() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "decks = 2\nseed = 99\npenetration_max = 60").unwrap();
        unsafe {
            std::env::set_var(CONFIG_ENV, file.path());
        }

        let resolved = load_with_sources().unwrap();
        clear_env();

        assert_eq!(resolved.config.decks, 2);
        assert_eq!(resolved.config.seed, Some(99));
        assert_eq!(resolved.config.penetration_max, 60);
        assert_eq!(resolved.sources.decks, ValueSource::File);
        assert_eq!(resolved.sources.penetration_min, ValueSource::Default);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "decks = 2\nseed = 99").unwrap();
        unsafe {
            std::env::set_var(CONFIG_ENV, file.path());
            std::env::set_var("BLACKJACK_SEED", "7");
        }

        let resolved = load_with_sources().unwrap();
        clear_env();

        assert_eq!(resolved.config.seed, Some(7));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert_eq!(resolved.sources.decks, ValueSource::File);
    }

    #[test]
    #[serial]
    fn unparsable_env_value_is_rejected() {
        clear_env();
        unsafe {
            std::env::set_var("BLACKJACK_DECKS", "six");
        }
        let result = load_with_sources();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    #[serial]
    fn malformed_file_is_a_parse_error() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "decks = \"many").unwrap();
        unsafe {
            std::env::set_var(CONFIG_ENV, file.path());
        }
        let result = load_with_sources();
        clear_env();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn validation_rejects_inconsistent_values() {
        let base = Config::default();
        assert!(validate(&base).is_ok());
        assert!(validate(&Config { decks: 0, ..base.clone() }).is_err());
        assert!(
            validate(&Config {
                penetration_min: 90,
                ..base.clone()
            })
            .is_err()
        );
        assert!(
            validate(&Config {
                decks: 1,
                ..base.clone()
            })
            .is_err()
        );
        assert!(
            validate(&Config {
                starting_budget: 0,
                ..base
            })
            .is_err()
        );
    }

    #[test]
    fn validation_caps_deck_count() {
        let base = Config::default();
        assert!(validate(&Config { decks: MAX_DECKS, ..base.clone() }).is_ok());
        for decks in [MAX_DECKS + 1, 1_000_000, usize::MAX] {
            let result = validate(&Config { decks, ..base.clone() });
            match result {
                Err(ConfigError::Invalid(msg)) => assert!(msg.contains("decks must be between 1 and 8")),
                other => panic!("expected Invalid for {} decks, got {:?}", decks, other),
            }
        }
    }
}
