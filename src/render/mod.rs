//! Рендер схемы зала.
//!
//! Рендерер не хранит выбор: сцена это чистая функция от (площадка, выбранные id),
//! а взаимодействие с местом возвращается наружу как `SeatEvent`. Решение
//! принять/отклонить выбор остаётся за хранилищем выбора.

use serde::Serialize;

use crate::models::{SeatStatus, SelectedSeat};

pub mod scene;
pub mod svg;

pub use scene::{Scene, SceneRenderer, SeatNode, SectionNode, StageMarker};

/// Прямоугольник места в координатах карты (после трансформа секции).
/// По нему вызывающий ставит поповер рядом с местом.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OriginRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl OriginRect {
    /// Верх по центру: туда крепится поповер
    pub fn anchor(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SeatEvent {
    Select { seat: SelectedSeat },
    Focus { seat: SelectedSeat, origin: OriginRect },
}

impl SeatEvent {
    pub fn seat(&self) -> &SelectedSeat {
        match self {
            SeatEvent::Select { seat } | SeatEvent::Focus { seat, .. } => seat,
        }
    }
}

/// Стиль места. Зависит только от статуса и от того, выбрано ли место.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStyle {
    Available,
    Selected,
    Reserved,
    Sold,
    Held,
}

impl SeatStyle {
    pub fn for_seat(status: SeatStatus, selected: bool) -> Self {
        if selected {
            return SeatStyle::Selected;
        }
        match status {
            SeatStatus::Available => SeatStyle::Available,
            SeatStatus::Reserved => SeatStyle::Reserved,
            SeatStatus::Sold => SeatStyle::Sold,
            SeatStatus::Held => SeatStyle::Held,
        }
    }

    pub fn fill(&self) -> &'static str {
        match self {
            SeatStyle::Available => "#22c55e",
            SeatStyle::Selected => "#2563eb",
            SeatStyle::Reserved => "#eab308",
            SeatStyle::Sold => "#ef4444",
            SeatStyle::Held => "#f97316",
        }
    }

    pub fn opacity(&self) -> f64 {
        match self {
            SeatStyle::Available | SeatStyle::Selected => 1.0,
            _ => 0.6,
        }
    }

    pub fn stroke(&self) -> Option<(&'static str, f64)> {
        match self {
            SeatStyle::Selected => Some(("#1e40af", 2.0)),
            _ => None,
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            SeatStyle::Available => "seat seat-available",
            SeatStyle::Selected => "seat seat-selected",
            SeatStyle::Reserved => "seat seat-reserved",
            SeatStyle::Sold => "seat seat-sold",
            SeatStyle::Held => "seat seat-held",
        }
    }
}
