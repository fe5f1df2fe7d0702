//! Building height calculation
//!
//! Heights are a base (half the screen) plus a variation of up to ±50%, clamped so
//! every rooftop stays reachable and no tower dwarfs the skyline.

use super::seed::{PcgSource, RandomSource, SeededHash};
use crate::consts::*;

/// Produces base and varied building heights
#[derive(Debug)]
pub struct HeightCalculator {
    source: Box<dyn RandomSource>,
    seeded: bool,
}

impl HeightCalculator {
    /// Seeded calculators are fully reproducible; `None` or an empty seed draws
    /// from entropy
    pub fn new(seed: Option<&str>) -> Self {
        match seed.filter(|s| !s.is_empty()) {
            Some(seed) => Self {
                source: Box::new(SeededHash::new(seed)),
                seeded: true,
            },
            None => Self {
                source: Box::new(PcgSource::from_entropy()),
                seeded: false,
            },
        }
    }

    /// Inject a custom random source
    pub fn with_source(source: Box<dyn RandomSource>) -> Self {
        Self {
            source,
            seeded: false,
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub fn base_height(&self, screen_height: u32) -> f64 {
        (f64::from(screen_height) * BASE_HEIGHT_RATIO).floor()
    }

    /// Signed variation in [-base/2, +base/2]
    pub fn height_variation(&mut self, base_height: f64) -> f64 {
        let max_variation = base_height * 0.5;
        (self.source.next_unit() - 0.5) * 2.0 * max_variation
    }

    /// Clamp to [MIN_BUILDING_HEIGHT, base * 2]; the floor wins if the two cross
    pub fn final_height(&self, base_height: f64, variation: f64) -> f64 {
        let max_height = base_height * 2.0;
        (base_height + variation).min(max_height).max(MIN_BUILDING_HEIGHT)
    }

    /// Scale a height authored for a 768px-tall screen
    pub fn scaled_height(&self, screen_height: u32, reference_height: f64) -> f64 {
        reference_height * (f64::from(screen_height) / REFERENCE_SCREEN_HEIGHT)
    }
}
