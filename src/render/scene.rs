use serde::Serialize;
use std::collections::HashSet;

use super::{OriginRect, SeatEvent, SeatStyle};
use crate::models::{Row, Seat, Section, SelectedSeat, Transform, Venue};

/// Радиус кружка места в координатах секции.
pub const SEAT_RADIUS: f64 = 12.0;

const STAGE_WIDTH: f64 = 400.0;
const STAGE_HEIGHT: f64 = 40.0;
const STAGE_TOP: f64 = 20.0;
const SECTION_LABEL_OFFSET: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageMarker {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatNode {
    pub id: String,
    pub section: String,
    pub row: i32,
    pub col: i32,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub style: SeatStyle,
    pub interactive: bool,
    pub selected: bool,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionNode {
    pub id: String,
    pub label: String,
    pub transform: Transform,
    pub label_x: f64,
    pub label_y: f64,
    pub seats: Vec<SeatNode>,
}

/// Граф сцены для одного прохода рендера.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub venue_id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub stage: StageMarker,
    pub sections: Vec<SectionNode>,
}

impl Scene {
    pub fn seats(&self) -> impl Iterator<Item = &SeatNode> {
        self.sections.iter().flat_map(|section| section.seats.iter())
    }

    pub fn seat(&self, seat_id: &str) -> Option<&SeatNode> {
        self.seats().find(|seat| seat.id == seat_id)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SceneRenderer {
    seat_radius: f64,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self { seat_radius: SEAT_RADIUS }
    }
}

impl SceneRenderer {
    pub fn new(seat_radius: f64) -> Self {
        Self { seat_radius }
    }

    /// Построить сцену. `selected` пересчитывается на каждый проход,
    /// своего состояния выбора у рендерера нет.
    pub fn render(&self, venue: &Venue, selected: &HashSet<String>) -> Scene {
        let sections = venue
            .sections
            .iter()
            .map(|section| self.render_section(section, selected))
            .collect();

        Scene {
            venue_id: venue.venue_id.clone(),
            name: venue.name.clone(),
            width: venue.map.width,
            height: venue.map.height,
            stage: StageMarker {
                x: venue.map.width / 2.0 - STAGE_WIDTH / 2.0,
                y: STAGE_TOP,
                width: STAGE_WIDTH,
                height: STAGE_HEIGHT,
                label: "STAGE",
            },
            sections,
        }
    }

    /// Клик/Enter по месту. Событие есть только у свободных мест.
    pub fn select(&self, venue: &Venue, seat_id: &str) -> Option<SeatEvent> {
        let (section, row, seat) = locate(venue, seat_id)?;
        if !seat.status.is_available() {
            return None;
        }
        Some(SeatEvent::Select {
            seat: SelectedSeat::new(seat.clone(), section.id.clone(), row.index),
        })
    }

    /// Фокус на месте. Как и выбор, доступен только свободным местам.
    pub fn focus(&self, venue: &Venue, seat_id: &str) -> Option<SeatEvent> {
        let (section, row, seat) = locate(venue, seat_id)?;
        if !seat.status.is_available() {
            return None;
        }
        Some(SeatEvent::Focus {
            seat: SelectedSeat::new(seat.clone(), section.id.clone(), row.index),
            origin: self.origin_rect(&section.transform, seat),
        })
    }

    pub fn origin_rect(&self, transform: &Transform, seat: &Seat) -> OriginRect {
        let (cx, cy) = transform.apply(seat.x, seat.y);
        let r = self.seat_radius * transform.scale;
        OriginRect {
            x: cx - r,
            y: cy - r,
            width: r * 2.0,
            height: r * 2.0,
        }
    }

    fn render_section(&self, section: &Section, selected: &HashSet<String>) -> SectionNode {
        let (label_x, label_y) = section
            .first_seat()
            .map(|seat| (seat.x, seat.y - SECTION_LABEL_OFFSET))
            .unwrap_or((0.0, -SECTION_LABEL_OFFSET));

        let seats = section
            .rows
            .iter()
            .flat_map(|row| {
                row.seats
                    .iter()
                    .map(move |seat| self.render_seat(section, row, seat, selected.contains(&seat.id)))
            })
            .collect();

        SectionNode {
            id: section.id.clone(),
            label: section.label.clone(),
            transform: section.transform,
            label_x,
            label_y,
            seats,
        }
    }

    fn render_seat(&self, section: &Section, row: &Row, seat: &Seat, selected: bool) -> SeatNode {
        SeatNode {
            id: seat.id.clone(),
            section: section.id.clone(),
            row: row.index,
            col: seat.col,
            cx: seat.x,
            cy: seat.y,
            r: self.seat_radius,
            style: SeatStyle::for_seat(seat.status, selected),
            interactive: seat.status.is_available(),
            selected,
            label: format!(
                "Section {}, Row {}, Seat {}, {}, Price tier {}, {}",
                section.id,
                row.index,
                seat.col,
                seat.status,
                seat.price_tier,
                if selected { "selected" } else { "not selected" }
            ),
        }
    }
}

fn locate<'a>(venue: &'a Venue, seat_id: &str) -> Option<(&'a Section, &'a Row, &'a Seat)> {
    venue.seats().find(|(_, _, seat)| seat.id == seat_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SeatStatus, VenueMap};

    fn venue() -> Venue {
        let seats = vec![
            Seat { id: "A-1-01".into(), col: 1, x: 30.0, y: 30.0, price_tier: 1, status: SeatStatus::Available },
            Seat { id: "A-1-02".into(), col: 2, x: 60.0, y: 30.0, price_tier: 2, status: SeatStatus::Sold },
        ];
        Venue {
            venue_id: "v".into(),
            name: "Test".into(),
            map: VenueMap { width: 1000.0, height: 800.0 },
            sections: vec![Section {
                id: "A".into(),
                label: "Section A".into(),
                transform: Transform { x: 100.0, y: 200.0, scale: 0.5 },
                rows: vec![Row { index: 1, seats }],
            }],
        }
    }

    #[test]
    fn render_reflects_selection_and_status() {
        let selected: HashSet<String> = ["A-1-01".to_string()].into_iter().collect();
        let scene = SceneRenderer::default().render(&venue(), &selected);

        let first = scene.seat("A-1-01").unwrap();
        assert!(first.selected);
        assert!(first.interactive);
        assert_eq!(first.style, SeatStyle::Selected);

        let sold = scene.seat("A-1-02").unwrap();
        assert!(!sold.interactive);
        assert_eq!(sold.style, SeatStyle::Sold);
        assert!(sold.label.contains("sold"));
    }

    #[test]
    fn stage_is_centered_and_label_sits_above_first_seat() {
        let scene = SceneRenderer::default().render(&venue(), &HashSet::new());
        assert_eq!(scene.stage.x, 300.0);
        assert_eq!(scene.sections[0].label_x, 30.0);
        assert_eq!(scene.sections[0].label_y, 10.0);
    }

    #[test]
    fn select_is_gated_by_status() {
        let renderer = SceneRenderer::default();
        let v = venue();

        match renderer.select(&v, "A-1-01") {
            Some(SeatEvent::Select { seat }) => {
                assert_eq!(seat.section, "A");
                assert_eq!(seat.row, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(renderer.select(&v, "A-1-02").is_none());
        assert!(renderer.select(&v, "nope").is_none());
    }

    #[test]
    fn focus_origin_applies_section_transform() {
        let renderer = SceneRenderer::default();
        let event = renderer.focus(&venue(), "A-1-01").unwrap();

        let SeatEvent::Focus { origin, .. } = event else {
            panic!("expected focus event");
        };
        // центр (100 + 30*0.5, 200 + 30*0.5) = (115, 215), радиус 6
        assert_eq!(origin, OriginRect { x: 109.0, y: 209.0, width: 12.0, height: 12.0 });
        assert!(renderer.focus(&venue(), "A-1-02").is_none());
    }

    #[test]
    fn empty_section_label_falls_back_to_origin() {
        let mut v = venue();
        v.sections[0].rows.clear();
        let scene = SceneRenderer::default().render(&v, &HashSet::new());
        assert_eq!((scene.sections[0].label_x, scene.sections[0].label_y), (0.0, -20.0));
    }
}
