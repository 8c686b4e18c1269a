//! generate_venue.rs
//!
//! Генератор синтетической площадки для нагрузочной проверки рендера
//! (по умолчанию 10 секций × 50 рядов × 30 мест = 15 000 мест).
//! Сервисом не вызывается, это отдельный инструмент для фикстур.

use clap::Parser;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::path::PathBuf;

use seating_chart::models::{Row, Seat, SeatStatus, Section, Transform, Venue, VenueMap};

const SEAT_SPACING: f64 = 30.0;
const ROW_SPACING: f64 = 30.0;
const SECTION_SPACING: f64 = 500.0;
const SECTIONS_PER_BAND: usize = 5;
const BAND_GAP: f64 = 200.0;

// Свободных мест в среднем половина
const STATUSES: [SeatStatus; 6] = [
    SeatStatus::Available,
    SeatStatus::Available,
    SeatStatus::Available,
    SeatStatus::Reserved,
    SeatStatus::Sold,
    SeatStatus::Held,
];
const PRICE_TIERS: [i32; 5] = [1, 1, 2, 2, 3];

#[derive(Debug, Parser)]
#[command(name = "generate_venue", about = "Generate a large synthetic venue document")]
struct Args {
    /// Количество секций (не больше 26, id секции это буква)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..=26))]
    sections: u8,
    #[arg(long, default_value_t = 50)]
    rows: u32,
    #[arg(long, default_value_t = 30)]
    seats: u32,
    #[arg(long, short, default_value = "public/venue-large.json")]
    output: PathBuf,
    /// Зерно для воспроизводимого результата
    #[arg(long)]
    seed: Option<u64>,
}

fn generate(args: &Args, rng: &mut StdRng) -> Venue {
    let band_height = args.rows as f64 * ROW_SPACING + BAND_GAP;

    let sections = (0..args.sections as usize)
        .map(|s| {
            let letter = (b'A' + s as u8) as char;
            let section_x = (s % SECTIONS_PER_BAND) as f64 * SECTION_SPACING;
            let section_y = (s / SECTIONS_PER_BAND) as f64 * band_height;

            let rows = (1..=args.rows as i32)
                .map(|r| Row {
                    index: r,
                    seats: (1..=args.seats as i32)
                        .map(|c| Seat {
                            id: format!("{}-{}-{:02}", letter, r, c),
                            col: c,
                            x: section_x + c as f64 * SEAT_SPACING,
                            y: section_y + r as f64 * ROW_SPACING,
                            price_tier: *PRICE_TIERS.choose(rng).unwrap_or(&1),
                            status: *STATUSES.choose(rng).unwrap_or(&SeatStatus::Available),
                        })
                        .collect(),
                })
                .collect();

            Section {
                id: letter.to_string(),
                label: format!("Section {}", letter),
                transform: Transform::default(),
                rows,
            }
        })
        .collect();

    let bands = (args.sections as usize).div_ceil(SECTIONS_PER_BAND);

    Venue {
        venue_id: "arena-large".to_string(),
        name: "Metropolis Arena - Large".to_string(),
        map: VenueMap {
            width: SECTION_SPACING * SECTIONS_PER_BAND as f64 + SEAT_SPACING * args.seats as f64,
            height: bands as f64 * band_height,
        },
        sections,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let venue = generate(&args, &mut rng);
    venue.validate()?;

    println!("Generated venue with {} seats", venue.seat_count());
    println!("Map dimensions: {}x{}", venue.map.width, venue.map.height);

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&args.output, serde_json::to_string_pretty(&venue)?)?;

    println!("Saved to {}", args.output.display());
    Ok(())
}
