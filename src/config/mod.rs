use config::{builder::DefaultState, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::env;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub venue: VenueConfig,
    pub storage: StorageConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

// Откуда грузить документ площадки
#[derive(Debug, Clone, Deserialize)]
pub struct VenueConfig {
    /// URL (http/https) или путь к файлу
    pub source: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
}

// Настройки локального кеша выбора
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub dir: String,
    pub redis_url: String,
    pub key: String,
}

// Плоские переменные окружения, которые читаются напрямую (как в .env)
const FLAT_OVERRIDES: [(&str, &str); 8] = [
    ("HOST", "app.host"),
    ("PORT", "app.port"),
    ("ENVIRONMENT", "app.environment"),
    ("RUST_LOG", "app.rust_log"),
    ("LOG_FORMAT", "app.log_format"),
    ("VENUE_SOURCE", "venue.source"),
    ("STORAGE_BACKEND", "storage.backend"),
    ("REDIS_URL", "storage.redis_url"),
];

impl Config {
    /// Значения по умолчанию -> seating.toml (если есть) -> SEATING__* -> плоские переменные.
    pub fn load() -> anyhow::Result<Self> {
        let mut builder = Self::defaults()?
            .add_source(File::with_name("seating").required(false))
            .add_source(
                Environment::with_prefix("SEATING")
                    .prefix_separator("__")
                    .separator("__"),
            );

        for (var, key) in FLAT_OVERRIDES {
            builder = builder.set_override_option(key, env::var(var).ok())?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Только значения по умолчанию, без файла и окружения.
    pub fn from_defaults() -> anyhow::Result<Self> {
        Ok(Self::defaults()?.build()?.try_deserialize()?)
    }

    fn defaults() -> anyhow::Result<ConfigBuilder<DefaultState>> {
        Ok(config::Config::builder()
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8000)?
            .set_default("app.environment", "development")?
            .set_default("app.rust_log", "seating_chart=debug,tower_http=debug")?
            .set_default("app.log_format", "pretty")?
            .set_default("venue.source", "public/venue.json")?
            .set_default("venue.timeout_seconds", 10)?
            .set_default("storage.backend", "file")?
            .set_default("storage.dir", ".seating-cache")?
            .set_default("storage.redis_url", "redis://127.0.0.1:6379")?
            .set_default("storage.key", crate::services::selection::STORAGE_KEY)?)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.storage.key.trim().is_empty() {
            anyhow::bail!("storage.key must not be empty");
        }
        Ok(())
    }
}
