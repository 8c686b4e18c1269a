//! coordinator.rs
//!
//! Корневой координатор сессии. Владеет загруженной площадкой, хранилищем
//! выбора и местом в фокусе; связывает события рендерера с мутациями выбора.
//!
//! Состояние загрузки: `Loading -> Ready | Failed`. Ready и Failed терминальны,
//! повторной загрузки в рамках сессии нет.

use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::models::{SelectedSeat, Venue};
use crate::render::{svg, Scene, SceneRenderer, SeatEvent};
use crate::services::selection::{SelectionStore, ToggleOutcome};
use crate::services::venue_loader::{LoadFailure, VenueLoader};
use crate::views::{DetailPopover, FocusedSeat, SummaryView};

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<Venue>),
    Failed(String),
}

impl LoadState {
    pub fn name(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinatorError {
    #[error("Venue data is still loading")]
    Loading,
    #[error("Error loading venue: {0}")]
    LoadFailed(String),
    #[error("Seat '{0}' not found")]
    UnknownSeat(String),
    #[error("Seat '{0}' is not available")]
    NotAvailable(String),
}

pub struct Coordinator {
    load_state: RwLock<LoadState>,
    selection: SelectionStore,
    focused: RwLock<Option<FocusedSeat>>,
    renderer: SceneRenderer,
}

impl Coordinator {
    pub fn new(selection: SelectionStore, renderer: SceneRenderer) -> Self {
        Self {
            load_state: RwLock::new(LoadState::Loading),
            selection,
            focused: RwLock::new(None),
            renderer,
        }
    }

    /// Запустить единственную попытку загрузки в фоне.
    pub fn spawn_load(self: &Arc<Self>, loader: VenueLoader) -> JoinHandle<()> {
        let coordinator = self.clone();
        tokio::spawn(async move {
            let result = loader.load().await;
            coordinator.finish_load(result).await;
        })
    }

    /// Перевести сессию в Ready или Failed. Повторный вызов игнорируется.
    pub async fn finish_load(&self, result: Result<Venue, LoadFailure>) {
        let mut state = self.load_state.write().await;
        if !matches!(*state, LoadState::Loading) {
            warn!("Venue load already finished ({}), ignoring result", state.name());
            return;
        }

        *state = match result {
            Ok(venue) => {
                // восстановленный из кеша выбор мог устареть относительно документа
                self.selection.reconcile(&venue).await;
                info!("Session ready for venue '{}'", venue.name);
                LoadState::Ready(Arc::new(venue))
            }
            Err(e) => LoadState::Failed(e.to_string()),
        };
    }

    pub async fn load_state(&self) -> LoadState {
        self.load_state.read().await.clone()
    }

    pub async fn venue(&self) -> Result<Arc<Venue>, CoordinatorError> {
        match &*self.load_state.read().await {
            LoadState::Ready(venue) => Ok(venue.clone()),
            LoadState::Loading => Err(CoordinatorError::Loading),
            LoadState::Failed(message) => Err(CoordinatorError::LoadFailed(message.clone())),
        }
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// Клик по месту: рендерер решает, есть ли событие, хранилище решает, что с ним делать.
    pub async fn select_seat(&self, seat_id: &str) -> Result<ToggleOutcome, CoordinatorError> {
        let venue = self.venue().await?;
        match self.renderer.select(&venue, seat_id) {
            Some(event) => Ok(self.dispatch(event).await.unwrap_or(ToggleOutcome::Unavailable)),
            None => Err(self.rejection(&venue, seat_id)),
        }
    }

    pub async fn focus_seat(&self, seat_id: &str) -> Result<DetailPopover, CoordinatorError> {
        let venue = self.venue().await?;
        let event = self
            .renderer
            .focus(&venue, seat_id)
            .ok_or_else(|| self.rejection(&venue, seat_id))?;
        self.dispatch(event).await;

        self.popover()
            .await
            .ok_or_else(|| CoordinatorError::UnknownSeat(seat_id.to_string()))
    }

    /// Применить событие рендерера. Для выбора возвращает результат переключения.
    pub async fn dispatch(&self, event: SeatEvent) -> Option<ToggleOutcome> {
        match event {
            SeatEvent::Select { seat } => {
                let seat_id = seat.id().to_string();
                let outcome = self.selection.toggle(seat).await;
                debug!("Seat {} toggle: {:?}", seat_id, outcome);
                Some(outcome)
            }
            SeatEvent::Focus { seat, origin } => {
                *self.focused.write().await = Some(FocusedSeat { seat, origin });
                None
            }
        }
    }

    pub async fn blur(&self) {
        *self.focused.write().await = None;
    }

    pub async fn popover(&self) -> Option<DetailPopover> {
        DetailPopover::from_focus(self.focused.read().await.as_ref())
    }

    pub async fn remove_seat(&self, seat_id: &str) -> bool {
        self.selection.remove(seat_id).await
    }

    pub async fn clear_selection(&self) {
        self.selection.clear().await;
    }

    pub async fn selected_seats(&self) -> Vec<SelectedSeat> {
        self.selection.snapshot().await
    }

    pub async fn summary(&self) -> SummaryView {
        // снимок берём один раз, сумма считается по нему
        let seats = self.selection.snapshot().await;
        SummaryView::build(&seats, self.selection.max())
    }

    pub async fn scene(&self) -> Result<Scene, CoordinatorError> {
        let venue = self.venue().await?;
        let selected = self.selection.selected_ids().await;
        Ok(self.renderer.render(&venue, &selected))
    }

    pub async fn svg(&self) -> Result<String, CoordinatorError> {
        Ok(svg::to_svg(&self.scene().await?))
    }

    fn rejection(&self, venue: &Venue, seat_id: &str) -> CoordinatorError {
        if venue.find_seat(seat_id).is_some() {
            CoordinatorError::NotAvailable(seat_id.to_string())
        } else {
            CoordinatorError::UnknownSeat(seat_id.to_string())
        }
    }
}
