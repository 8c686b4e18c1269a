//! selection.rs
//!
//! Хранилище выбранных мест: упорядоченное множество ограниченного размера
//! с семантикой переключения и локальным сохранением между сессиями.
//!
//! Правила:
//! 1.  Не больше `MAX_SELECTED_SEATS` мест и никогда двух записей с одним id.
//! 2.  Переключение уже выбранного места снимает его без проверки лимита.
//! 3.  Выбор сверх лимита и выбор недоступного места ничего не меняют и не
//!     являются ошибкой: вызывающий узнаёт об этом только по `ToggleOutcome`.
//! 4.  Каждое изменение записывается в кеш. Ошибка записи только логируется,
//!     источник истины для сессии это память, а не кеш.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::models::{SelectedSeat, Venue};
use crate::storage::Storage;

/// Максимум мест в одном выборе.
pub const MAX_SELECTED_SEATS: usize = 8;

/// Ключ, под которым выбор лежит в локальном кеше.
pub const STORAGE_KEY: &str = "seating-selection";

/// Результат `toggle`. `AtCapacity` и `Unavailable` означают, что ничего не изменилось.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
    AtCapacity,
    Unavailable,
}

impl ToggleOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, ToggleOutcome::Added | ToggleOutcome::Removed)
    }
}

pub struct SelectionStore {
    // Мьютекс держится и на время записи в кеш: записи идут в порядке изменений
    seats: Mutex<Vec<SelectedSeat>>,
    storage: Arc<dyn Storage>,
    key: String,
}

impl SelectionStore {
    /// Поднять выбор из кеша. Любая ошибка чтения или разбора даёт пустой выбор.
    pub async fn restore(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        let key = key.into();

        let seats = match storage.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<SelectedSeat>>(&raw) {
                Ok(seats) => sanitize(seats, MAX_SELECTED_SEATS),
                Err(e) => {
                    warn!("Corrupt selection cache under '{}', starting empty: {}", key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read selection cache '{}', starting empty: {}", key, e);
                Vec::new()
            }
        };

        debug!("Selection restored with {} seats", seats.len());

        Self {
            seats: Mutex::new(seats),
            storage,
            key,
        }
    }

    pub async fn toggle(&self, seat: SelectedSeat) -> ToggleOutcome {
        let mut seats = self.seats.lock().await;

        if let Some(pos) = seats.iter().position(|s| s.id() == seat.id()) {
            seats.remove(pos);
            self.persist(&seats).await;
            return ToggleOutcome::Removed;
        }

        // Статус проверяет и рендерер, но здесь это инвариант, а не подсказка UI
        if !seat.status().is_available() {
            debug!("Ignoring toggle of non-available seat {}", seat.id());
            return ToggleOutcome::Unavailable;
        }

        if seats.len() >= MAX_SELECTED_SEATS {
            debug!("Selection at capacity ({}), ignoring seat {}", MAX_SELECTED_SEATS, seat.id());
            return ToggleOutcome::AtCapacity;
        }

        seats.push(seat);
        self.persist(&seats).await;
        ToggleOutcome::Added
    }

    /// Убрать место по id. Возвращает true, если оно было выбрано.
    pub async fn remove(&self, seat_id: &str) -> bool {
        let mut seats = self.seats.lock().await;
        let before = seats.len();
        seats.retain(|s| s.id() != seat_id);

        if seats.len() == before {
            return false;
        }
        self.persist(&seats).await;
        true
    }

    pub async fn clear(&self) {
        let mut seats = self.seats.lock().await;
        seats.clear();
        self.persist(&seats).await;
    }

    /// Сверить выбор с загруженной площадкой: места, которых в ней нет или
    /// которые стали недоступны, снимаются. Оставшиеся берут данные из площадки.
    /// Возвращает число снятых мест.
    pub async fn reconcile(&self, venue: &Venue) -> usize {
        let mut seats = self.seats.lock().await;
        let before = seats.len();

        let kept: Vec<SelectedSeat> = seats
            .iter()
            .filter_map(|s| venue.find_seat(s.id()))
            .filter(|s| s.status().is_available())
            .collect();
        let dropped = before - kept.len();

        if kept != *seats {
            *seats = kept;
            self.persist(&seats).await;
        }
        if dropped > 0 {
            warn!(
                "Dropped {} restored seats missing or unavailable in venue '{}'",
                dropped, venue.venue_id
            );
        }
        dropped
    }

    pub async fn is_selected(&self, seat_id: &str) -> bool {
        self.seats.lock().await.iter().any(|s| s.id() == seat_id)
    }

    /// Копия текущего выбора в порядке добавления.
    pub async fn snapshot(&self) -> Vec<SelectedSeat> {
        self.seats.lock().await.clone()
    }

    pub async fn selected_ids(&self) -> HashSet<String> {
        self.seats
            .lock()
            .await
            .iter()
            .map(|s| s.id().to_string())
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.seats.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.seats.lock().await.is_empty()
    }

    pub fn max(&self) -> usize {
        MAX_SELECTED_SEATS
    }

    async fn persist(&self, seats: &[SelectedSeat]) {
        let data = match serde_json::to_string(seats) {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to serialize selection: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.key, &data).await {
            error!("Failed to save selection to storage: {}", e);
        }
    }
}

// Данные из кеша могли быть записаны другой версией или руками
fn sanitize(seats: Vec<SelectedSeat>, max: usize) -> Vec<SelectedSeat> {
    let mut seen = HashSet::new();
    seats
        .into_iter()
        .filter(|s| s.status().is_available())
        .filter(|s| seen.insert(s.id().to_string()))
        .take(max)
        .collect()
}
