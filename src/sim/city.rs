//! Procedural city skyline
//!
//! Layout comes from the [`ResponsiveScaler`], heights from the
//! [`HeightCalculator`]. Buildings stand on the ground line and cover the full
//! screen width with no gaps.

use super::building::Building;
use super::height::HeightCalculator;
use super::scaler::ResponsiveScaler;
use crate::error::GameResult;

/// Building fill colors, cycled by index
pub const BUILDING_PALETTE: [&str; 5] = ["#808080", "#a0a0a0", "#909090", "#707070", "#b0b0b0"];

#[derive(Debug)]
pub struct CityGenerator {
    screen_width: u32,
    screen_height: u32,
    heights: HeightCalculator,
    scaler: ResponsiveScaler,
}

impl CityGenerator {
    pub fn new(screen_width: u32, screen_height: u32, seed: Option<&str>) -> Self {
        Self::with_heights(screen_width, screen_height, HeightCalculator::new(seed))
    }

    /// Use a preconfigured height calculator (e.g. with an injected random source)
    pub fn with_heights(screen_width: u32, screen_height: u32, heights: HeightCalculator) -> Self {
        Self {
            screen_width,
            screen_height,
            heights,
            scaler: ResponsiveScaler,
        }
    }

    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    pub fn ground_level(&self) -> f64 {
        self.scaler.ground_level(self.screen_height)
    }

    /// Generate a skyline using the screen-derived base height and ground line
    pub fn generate_city(&mut self) -> GameResult<Vec<Building>> {
        self.generate_city_with(None, None)
    }

    /// Generate with an explicit base height and/or ground line
    ///
    /// Fails if a building cannot be built, e.g. a screen so short that the 50px
    /// minimum height pokes above the top edge.
    pub fn generate_city_with(
        &mut self,
        base_height: Option<f64>,
        ground_level: Option<f64>,
    ) -> GameResult<Vec<Building>> {
        let count = self.scaler.building_count(self.screen_width);
        let slots = self.scaler.building_layout(self.screen_width, count);

        let base_height =
            base_height.unwrap_or_else(|| self.heights.base_height(self.screen_height));
        let ground_level = ground_level.unwrap_or_else(|| self.ground_level());

        let mut buildings = Vec::with_capacity(slots.len());
        for (index, slot) in slots.iter().enumerate() {
            let variation = self.heights.height_variation(base_height);
            let height = self.heights.final_height(base_height, variation);
            let color = BUILDING_PALETTE[index % BUILDING_PALETTE.len()];

            buildings.push(Building::new(
                f64::from(slot.x),
                ground_level - height,
                f64::from(slot.width),
                height,
                color,
            )?);
        }

        log::info!(
            "Generated city: {} buildings, {}x{}, ground at {}",
            buildings.len(),
            self.screen_width,
            self.screen_height,
            ground_level
        );

        Ok(buildings)
    }

    /// Base slot width for `count` buildings (defaults to the responsive count)
    pub fn building_width(&self, count: Option<u32>) -> u32 {
        let count = count.unwrap_or_else(|| self.scaler.building_count(self.screen_width));
        self.scaler.building_width(self.screen_width, count)
    }

    pub fn height_variation(&mut self, base_height: f64) -> f64 {
        self.heights.height_variation(base_height)
    }
}
