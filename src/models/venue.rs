use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::seat::{Seat, SeatStatus, SelectedSeat};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Transform {
    // Сначала сдвиг, потом равномерный масштаб (как в SVG transform)
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.x + x * self.scale, self.y + y * self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub index: i32,
    pub seats: Vec<Seat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub label: String,
    pub transform: Transform,
    pub rows: Vec<Row>,
}

impl Section {
    pub fn first_seat(&self) -> Option<&Seat> {
        self.rows.first().and_then(|row| row.seats.first())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VenueMap {
    pub width: f64,
    pub height: f64,
}

/// Документ площадки. Создаётся один раз за сессию и дальше не меняется.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(rename = "venueId")]
    pub venue_id: String,
    pub name: String,
    pub map: VenueMap,
    pub sections: Vec<Section>,
}

/// Нарушения структуры документа, которые не ловит десериализация.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VenueError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    InvalidMap { width: f64, height: f64 },
    #[error("duplicate section id '{0}'")]
    DuplicateSection(String),
    #[error("section '{0}' has a non-positive scale")]
    InvalidScale(String),
    #[error("duplicate row index {row} in section '{section}'")]
    DuplicateRow { section: String, row: i32 },
    #[error("duplicate seat id '{0}'")]
    DuplicateSeat(String),
    #[error("row index {row} in section '{section}' must start at 1")]
    InvalidRowIndex { section: String, row: i32 },
    #[error("seat '{seat}' has a non-positive price tier {tier}")]
    InvalidPriceTier { seat: String, tier: i32 },
}

impl Venue {
    /// Все места площадки вместе с секцией и рядом, в порядке документа.
    pub fn seats(&self) -> impl Iterator<Item = (&Section, &Row, &Seat)> {
        self.sections.iter().flat_map(|section| {
            section
                .rows
                .iter()
                .flat_map(move |row| row.seats.iter().map(move |seat| (section, row, seat)))
        })
    }

    pub fn seat_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|section| section.rows.iter())
            .map(|row| row.seats.len())
            .sum()
    }

    /// Найти место и сразу денормализовать его в SelectedSeat.
    pub fn find_seat(&self, seat_id: &str) -> Option<SelectedSeat> {
        self.seats()
            .find(|(_, _, seat)| seat.id == seat_id)
            .map(|(section, row, seat)| SelectedSeat::new(seat.clone(), section.id.clone(), row.index))
    }

    pub fn status_counts(&self) -> HashMap<SeatStatus, usize> {
        let mut counts: HashMap<SeatStatus, usize> =
            SeatStatus::ALL.iter().map(|status| (*status, 0)).collect();
        for (_, _, seat) in self.seats() {
            *counts.entry(seat.status).or_insert(0) += 1;
        }
        counts
    }

    pub fn validate(&self) -> Result<(), VenueError> {
        if !(self.map.width > 0.0 && self.map.height > 0.0) {
            return Err(VenueError::InvalidMap {
                width: self.map.width,
                height: self.map.height,
            });
        }

        let mut section_ids = HashSet::new();
        let mut seat_ids = HashSet::new();

        for section in &self.sections {
            if !section_ids.insert(section.id.as_str()) {
                return Err(VenueError::DuplicateSection(section.id.clone()));
            }
            if !(section.transform.scale > 0.0) {
                return Err(VenueError::InvalidScale(section.id.clone()));
            }

            let mut row_indexes = HashSet::new();
            for row in &section.rows {
                if row.index < 1 {
                    return Err(VenueError::InvalidRowIndex {
                        section: section.id.clone(),
                        row: row.index,
                    });
                }
                if !row_indexes.insert(row.index) {
                    return Err(VenueError::DuplicateRow {
                        section: section.id.clone(),
                        row: row.index,
                    });
                }
                // id мест уникальны по всей площадке, а не только внутри секции
                for seat in &row.seats {
                    if !seat_ids.insert(seat.id.as_str()) {
                        return Err(VenueError::DuplicateSeat(seat.id.clone()));
                    }
                    if seat.price_tier < 1 {
                        return Err(VenueError::InvalidPriceTier {
                            seat: seat.id.clone(),
                            tier: seat.price_tier,
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
