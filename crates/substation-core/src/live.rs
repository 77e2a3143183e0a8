//! Live frame: one complete refresh of the Live Data view.
//!
//! A [`LiveFrame`] bundles a fresh reading with its eight display tiles and
//! the alerts it raises. Frames are built whole and replace each other; no
//! frame ever looks at the one before it.
//!
//! The deltas shown next to some tiles are independent random offsets, not
//! the change since the previous frame.

use std::fmt;

use rand::Rng;

use crate::alert::{self, Alert};
use crate::generator::generate_with;
use crate::model::{Field, Reading};

/// Load current above which the diesel generator is reported running.
pub const GENERATOR_LOAD_THRESHOLD_A: u32 = 150;

/// Derived "Generator Status" tile value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum GeneratorStatus {
    #[strum(to_string = "ON")]
    On,
    #[strum(to_string = "OFF")]
    Off,
}

impl GeneratorStatus {
    pub fn for_load(load_current_a: u32) -> Self {
        if load_current_a > GENERATOR_LOAD_THRESHOLD_A {
            Self::On
        } else {
            Self::Off
        }
    }
}

/// A signed indicator rendered next to a tile value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta {
    pub value: i32,
    pub unit: &'static str,
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// One labeled metric on the Live Data screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub label: String,
    pub value: String,
    pub delta: Option<Delta>,
}

/// Everything one refresh cycle displays.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveFrame {
    pub reading: Reading,
    pub generator: GeneratorStatus,
    /// Eight tiles: the seven fields in canonical order, then Generator Status.
    pub tiles: Vec<Tile>,
    pub alerts: Vec<Alert>,
}

impl LiveFrame {
    pub const TILE_COUNT: usize = 8;

    /// Build a frame from a fresh thread-local draw.
    pub fn sample() -> Self {
        Self::sample_with(&mut rand::thread_rng())
    }

    /// Build a frame from a fresh draw on `rng`.
    pub fn sample_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let reading = generate_with(rng);
        Self::from_reading(reading, rng)
    }

    /// Derive tiles and alerts for `reading`; `rng` only feeds the deltas.
    pub fn from_reading<R: Rng + ?Sized>(reading: Reading, rng: &mut R) -> Self {
        let generator = GeneratorStatus::for_load(reading.load_current_a);

        let mut tiles: Vec<Tile> = reading
            .fields()
            .map(|(field, value)| Tile {
                label: field.to_string(),
                value: match field.unit() {
                    Some(unit) => format!("{value} {unit}"),
                    None => value.to_string(),
                },
                delta: delta_span(field).and_then(|span| {
                    field.unit().map(|unit| Delta {
                        value: rng.gen_range(-span..=span),
                        unit,
                    })
                }),
            })
            .collect();

        tiles.push(Tile {
            label: "Generator Status".into(),
            value: generator.to_string(),
            delta: None,
        });

        Self {
            reading,
            generator,
            tiles,
            alerts: alert::evaluate(&reading),
        }
    }

    /// Tiles grouped for display: rows of three, three, then two.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        let (first, rest) = self.tiles.split_at(3.min(self.tiles.len()));
        let (second, third) = rest.split_at(3.min(rest.len()));
        [first, second, third].into_iter()
    }
}

/// Half-width of the random delta drawn for a field, if it shows one.
fn delta_span(field: Field) -> Option<i32> {
    match field {
        Field::GridVoltage => Some(3),
        Field::LoadCurrent | Field::BatteryStatus => Some(5),
        Field::TransformerTemp => Some(2),
        Field::PowerFactor | Field::Frequency | Field::LineLoss => None,
    }
}
