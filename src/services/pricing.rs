//! pricing.rs
//!
//! Цены по ценовым категориям мест и подсчёт итоговой суммы выбора.
//! Функция категория → цена тотальна: любая неизвестная категория
//! стоит `DEFAULT_PRICE`, ошибок здесь не бывает.

use crate::models::SelectedSeat;

/// Таблица категорий: (категория, цена).
pub const PRICE_TIERS: [(i32, u64); 3] = [(1, 150), (2, 100), (3, 75)];

/// Цена для категорий, которых нет в таблице.
pub const DEFAULT_PRICE: u64 = 50;

/// Всё, у чего есть ценовая категория.
pub trait Priced {
    fn price_tier(&self) -> i32;
}

impl Priced for SelectedSeat {
    fn price_tier(&self) -> i32 {
        self.seat.price_tier
    }
}

impl Priced for crate::models::Seat {
    fn price_tier(&self) -> i32 {
        self.price_tier
    }
}

impl Priced for i32 {
    fn price_tier(&self) -> i32 {
        *self
    }
}

pub fn price_for_tier(tier: i32) -> u64 {
    PRICE_TIERS
        .iter()
        .find(|(t, _)| *t == tier)
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_PRICE)
}

/// Сумма цен по последовательности. Пустая последовательность даёт 0.
pub fn total_for<T: Priced>(items: &[T]) -> u64 {
    items.iter().map(|item| price_for_tier(item.price_tier())).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_tiers() {
        assert_eq!(price_for_tier(1), 150);
        assert_eq!(price_for_tier(2), 100);
        assert_eq!(price_for_tier(3), 75);
    }

    #[test]
    fn unknown_tiers_fall_back_to_default() {
        assert_eq!(price_for_tier(7), DEFAULT_PRICE);
        assert_eq!(price_for_tier(0), DEFAULT_PRICE);
        assert_eq!(price_for_tier(-1), DEFAULT_PRICE);
    }

    #[test]
    fn empty_total_is_zero() {
        let empty: [i32; 0] = [];
        assert_eq!(total_for(&empty), 0);
    }

    #[test]
    fn total_sums_tier_prices() {
        assert_eq!(total_for(&[1, 2]), 250);
        assert_eq!(total_for(&[3, 3, 9]), 200);
    }

    proptest! {
        #[test]
        fn total_ignores_order(mut tiers in prop::collection::vec(-2i32..10, 0..32)) {
            let before = total_for(&tiers);
            tiers.reverse();
            prop_assert_eq!(total_for(&tiers), before);
            tiers.sort();
            prop_assert_eq!(total_for(&tiers), before);
        }

        #[test]
        fn price_is_always_defined(tier in any::<i32>()) {
            let price = price_for_tier(tier);
            prop_assert!(price == DEFAULT_PRICE || PRICE_TIERS.iter().any(|(_, p)| *p == price));
        }
    }
}
