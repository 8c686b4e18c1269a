use serde::{Deserialize, Serialize};
use std::fmt;

/// Статус места. Приходит из документа площадки и не меняется в течение сессии.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Reserved,
    Sold,
    Held,
}

impl SeatStatus {
    pub const ALL: [SeatStatus; 4] = [
        SeatStatus::Available,
        SeatStatus::Reserved,
        SeatStatus::Sold,
        SeatStatus::Held,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeatStatus::Available => "available",
            SeatStatus::Reserved => "reserved",
            SeatStatus::Sold => "sold",
            SeatStatus::Held => "held",
        }
    }

    // Выбрать можно только свободное место
    pub fn is_available(&self) -> bool {
        matches!(self, SeatStatus::Available)
    }
}

impl fmt::Display for SeatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: String,
    pub col: i32,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "priceTier")]
    pub price_tier: i32,
    pub status: SeatStatus,
}

/// Место вместе с секцией и рядом. Самодостаточная запись,
/// хранилищу выбора не нужна ссылка обратно в дерево площадки.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedSeat {
    #[serde(flatten)]
    pub seat: Seat,
    pub section: String,
    pub row: i32,
}

impl SelectedSeat {
    pub fn new(seat: Seat, section: impl Into<String>, row: i32) -> Self {
        Self {
            seat,
            section: section.into(),
            row,
        }
    }

    pub fn id(&self) -> &str {
        &self.seat.id
    }

    pub fn price_tier(&self) -> i32 {
        self.seat.price_tier
    }

    pub fn status(&self) -> SeatStatus {
        self.seat.status
    }

    /// "Section A • Row 1 • Seat 2"
    pub fn title(&self) -> String {
        format!("Section {} • Row {} • Seat {}", self.section, self.row, self.seat.col)
    }
}
