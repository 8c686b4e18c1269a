use serde::Serialize;

use crate::models::{SeatStatus, SelectedSeat};
use crate::render::OriginRect;
use crate::services::pricing::price_for_tier;

/// Место в фокусе и прямоугольник, от которого считается позиция поповера.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusedSeat {
    pub seat: SelectedSeat,
    pub origin: OriginRect,
}

/// Поповер с деталями места. Только для чтения, своего состояния нет.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPopover {
    pub seat_id: String,
    pub title: String,
    pub price_tier: i32,
    pub price: u64,
    /// "Price Tier 1 • $150"
    pub price_label: String,
    pub status: SeatStatus,
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl DetailPopover {
    pub fn from_focus(focused: Option<&FocusedSeat>) -> Option<Self> {
        let focused = focused?;
        let seat = &focused.seat;
        let price = price_for_tier(seat.price_tier());
        let (anchor_x, anchor_y) = focused.origin.anchor();

        Some(Self {
            seat_id: seat.id().to_string(),
            title: seat.title(),
            price_tier: seat.price_tier(),
            price,
            price_label: format!("Price Tier {} • ${}", seat.price_tier(), price),
            status: seat.status(),
            anchor_x,
            anchor_y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Seat;

    #[test]
    fn nothing_focused_means_no_popover() {
        assert_eq!(DetailPopover::from_focus(None), None);
    }

    #[test]
    fn popover_describes_focused_seat() {
        let focused = FocusedSeat {
            seat: SelectedSeat::new(
                Seat { id: "B-2-05".into(), col: 5, x: 0.0, y: 0.0, price_tier: 9, status: SeatStatus::Available },
                "B",
                2,
            ),
            origin: OriginRect { x: 100.0, y: 50.0, width: 24.0, height: 24.0 },
        };

        let popover = DetailPopover::from_focus(Some(&focused)).unwrap();
        assert_eq!(popover.title, "Section B • Row 2 • Seat 5");
        assert_eq!(popover.price, 50);
        assert_eq!(popover.price_label, "Price Tier 9 • $50");
        assert_eq!((popover.anchor_x, popover.anchor_y), (112.0, 50.0));
    }
}
