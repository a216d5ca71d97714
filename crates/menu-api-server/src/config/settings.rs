use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub translation: TranslationConfig,
    pub auth: AuthConfig,
    pub languages: LanguagesConfig,
    #[serde(default)]
    pub publish: PublishConfig,
    #[serde(default)]
    pub listing: ListingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: String,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    /// Local directory holding public objects (snapshots, images)
    pub root: String,
    pub public_base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TranslationConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LanguagesConfig {
    pub default: String,
    pub supported: Vec<String>,
}

impl LanguagesConfig {
    pub fn is_supported(&self, lang: &str) -> bool {
        self.supported.iter().any(|l| l == lang)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingReferencePolicy {
    /// Log and leave the missing category/item out of the snapshot
    #[default]
    Skip,
    /// Abort the publish
    Fail,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PublishConfig {
    #[serde(default)]
    pub missing_references: MissingReferencePolicy,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ListingConfig {
    pub fetch_concurrency: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            fetch_concurrency: 8,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(File::with_name("config/settings").required(true))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("languages.supported"),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}
