pub mod seats;
pub mod selection;
pub mod venue;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::coordinator::CoordinatorError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(venue::routes())
        .merge(seats::routes())
        .merge(selection::routes())
}

// --- Ошибки API ---

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    success: bool,
    message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<CoordinatorError> for ApiError {
    fn from(err: CoordinatorError) -> Self {
        let status = match &err {
            // Площадка ещё грузится
            CoordinatorError::Loading => StatusCode::SERVICE_UNAVAILABLE,
            // Загрузка провалилась, это терминальное состояние сессии
            CoordinatorError::LoadFailed(_) => StatusCode::BAD_GATEWAY,
            CoordinatorError::UnknownSeat(_) => StatusCode::NOT_FOUND,
            CoordinatorError::NotAvailable(_) => StatusCode::CONFLICT,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody { success: false, message: self.message };
        (self.status, Json(body)).into_response()
    }
}
