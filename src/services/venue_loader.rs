//! venue_loader.rs
//!
//! Загрузка документа площадки из внешнего источника: HTTP или файл на диске.
//! Одна попытка за сессию, без повторов. Любая ошибка (транспорт, статус,
//! разбор, нарушение структуры) приводится к `LoadFailure`, частично
//! загруженная площадка наружу никогда не отдаётся.

use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

use crate::config::VenueConfig;
use crate::models::{Venue, VenueError};

/// Ошибка загрузки площадки. `Display` даёт человекочитаемое сообщение.
#[derive(Debug, thiserror::Error)]
pub enum LoadFailure {
    #[error("Failed to reach venue source: {0}")]
    Transport(String),
    #[error("Failed to load venue data: server answered {0}")]
    Status(StatusCode),
    #[error("Failed to read venue file {path}: {message}")]
    Io { path: String, message: String },
    #[error("Malformed venue document: {0}")]
    Parse(String),
    #[error("Invalid venue document: {0}")]
    Invalid(#[from] VenueError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueSource {
    Http(String),
    File(PathBuf),
}

impl VenueSource {
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            VenueSource::Http(source.to_string())
        } else {
            VenueSource::File(PathBuf::from(source))
        }
    }
}

impl std::fmt::Display for VenueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VenueSource::Http(url) => f.write_str(url),
            VenueSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct VenueLoader {
    source: VenueSource,
    timeout: Duration,
}

impl VenueLoader {
    pub fn new(source: VenueSource, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    pub fn from_config(config: &VenueConfig) -> Self {
        Self::new(
            VenueSource::parse(&config.source),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn source(&self) -> &VenueSource {
        &self.source
    }

    pub async fn load(&self) -> Result<Venue, LoadFailure> {
        info!("Loading venue from {}", self.source);

        let result = match &self.source {
            VenueSource::Http(url) => self.fetch(url).await,
            VenueSource::File(path) => self.read(path).await,
        };

        match &result {
            Ok(venue) => info!(
                "Venue '{}' loaded: {} sections, {} seats",
                venue.venue_id,
                venue.sections.len(),
                venue.seat_count()
            ),
            Err(e) => error!("Venue load failed: {}", e),
        }

        result
    }

    async fn fetch(&self, url: &str) -> Result<Venue, LoadFailure> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| LoadFailure::Transport(e.to_string()))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadFailure::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LoadFailure::Status(response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LoadFailure::Transport(e.to_string()))?;

        parse_venue(&body)
    }

    async fn read(&self, path: &Path) -> Result<Venue, LoadFailure> {
        let read = tokio::time::timeout(self.timeout, tokio::fs::read_to_string(path))
            .await
            .map_err(|_| LoadFailure::Io {
                path: path.display().to_string(),
                message: "timed out".to_string(),
            })?;

        let body = read.map_err(|e| LoadFailure::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        parse_venue(&body)
    }
}

/// Разобрать и проверить документ площадки.
pub fn parse_venue(body: &str) -> Result<Venue, LoadFailure> {
    let venue: Venue = serde_json::from_str(body).map_err(|e| LoadFailure::Parse(e.to_string()))?;
    venue.validate()?;
    Ok(venue)
}
