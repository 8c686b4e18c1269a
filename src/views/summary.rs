use serde::Serialize;

use crate::models::SelectedSeat;
use crate::services::pricing::{price_for_tier, total_for};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryItem {
    pub seat_id: String,
    pub title: String,
    pub section: String,
    pub row: i32,
    pub col: i32,
    pub price_tier: i32,
    pub price: u64,
}

/// Сводка выбора. Полностью определяется списком мест и лимитом.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub count: usize,
    pub max: usize,
    pub remaining: usize,
    /// "3 / 8"
    pub count_label: String,
    pub remaining_hint: Option<String>,
    pub show_clear_all: bool,
    pub items: Vec<SummaryItem>,
    pub total: u64,
}

impl SummaryView {
    pub fn build(seats: &[SelectedSeat], max: usize) -> Self {
        let count = seats.len();
        let remaining = max.saturating_sub(count);

        let remaining_hint = if count > 0 && remaining > 0 {
            let noun = if remaining == 1 { "seat" } else { "seats" };
            Some(format!("You can select {} more {}", remaining, noun))
        } else {
            None
        };

        let items = seats
            .iter()
            .map(|seat| SummaryItem {
                seat_id: seat.id().to_string(),
                title: seat.title(),
                section: seat.section.clone(),
                row: seat.row,
                col: seat.seat.col,
                price_tier: seat.price_tier(),
                price: price_for_tier(seat.price_tier()),
            })
            .collect();

        Self {
            count,
            max,
            remaining,
            count_label: format!("{} / {}", count, max),
            remaining_hint,
            show_clear_all: count > 0,
            items,
            total: total_for(seats),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
