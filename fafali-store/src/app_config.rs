use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub rules: ValidationRules,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    File,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub redis_url: Option<String>,
    pub redis_namespace: String,
    pub keys: StorageKeys,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            data_dir: PathBuf::from("data"),
            redis_url: None,
            redis_namespace: "fafali".to_string(),
            keys: StorageKeys::default(),
        }
    }
}

/// Key names the account collection and the session are stored under
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageKeys {
    pub users: String,
    pub session: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            users: "fafaliUsers".to_string(),
            session: "fafaliUserSession".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ValidationRules {
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_min_password_length() -> usize { 6 }

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `FAFALI_STORAGE__BACKEND=memory`
            .add_source(config::Environment::with_prefix("FAFALI").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
