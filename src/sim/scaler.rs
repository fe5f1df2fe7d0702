//! Responsive horizontal layout
//!
//! Splits the screen width into contiguous building slots. Remainder pixels go to
//! the leftmost slots so the widths always sum to the screen width exactly.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Horizontal extent of one building slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSlot {
    pub x: u32,
    pub width: u32,
}

/// Derives building count and layout from the viewport
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsiveScaler;

impl ResponsiveScaler {
    /// One building per 80px, bounded to [6, 10]
    pub fn building_count(&self, screen_width: u32) -> u32 {
        (screen_width / MIN_BUILDING_WIDTH).clamp(MIN_BUILDINGS, MAX_BUILDINGS)
    }

    /// Base slot width, before remainder distribution
    pub fn building_width(&self, screen_width: u32, count: u32) -> u32 {
        if count == 0 {
            return 0;
        }
        screen_width / count
    }

    pub fn building_layout(&self, screen_width: u32, count: u32) -> Vec<BuildingSlot> {
        if count == 0 {
            return Vec::new();
        }
        let base_width = screen_width / count;
        let remainder = screen_width % count;

        let mut slots = Vec::with_capacity(count as usize);
        let mut x = 0;
        for i in 0..count {
            let width = base_width + u32::from(i < remainder);
            slots.push(BuildingSlot { x, width });
            x += width;
        }
        slots
    }

    pub fn base_height(&self, screen_height: u32) -> f64 {
        (f64::from(screen_height) * BASE_HEIGHT_RATIO).floor()
    }

    /// Ground sits 80% of the way down the screen
    pub fn ground_level(&self, screen_height: u32) -> f64 {
        (f64::from(screen_height) * GROUND_LEVEL_RATIO).floor()
    }

    pub fn scaled_height(&self, screen_height: u32, reference_height: f64) -> f64 {
        (reference_height * (f64::from(screen_height) / REFERENCE_SCREEN_HEIGHT)).floor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_count_bounds() {
        let scaler = ResponsiveScaler;
        assert_eq!(scaler.building_count(320), 6);
        assert_eq!(scaler.building_count(640), 8);
        assert_eq!(scaler.building_count(1024), 10);
        assert_eq!(scaler.building_count(2560), 10);
    }

    #[test]
    fn test_layout_distributes_remainder() {
        let scaler = ResponsiveScaler;
        let slots = scaler.building_layout(1003, 10);
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0].width, 101);
        assert_eq!(slots[2].width, 101);
        assert_eq!(slots[3].width, 100);
        assert_eq!(slots.iter().map(|s| s.width).sum::<u32>(), 1003);
    }

    #[test]
    fn test_layout_is_contiguous() {
        let scaler = ResponsiveScaler;
        let slots = scaler.building_layout(1366, 10);
        assert_eq!(slots[0].x, 0);
        for pair in slots.windows(2) {
            assert_eq!(pair[0].x + pair[0].width, pair[1].x);
        }
        let last = slots[slots.len() - 1];
        assert_eq!(last.x + last.width, 1366);
    }

    #[test]
    fn test_zero_count_is_empty() {
        let scaler = ResponsiveScaler;
        assert!(scaler.building_layout(800, 0).is_empty());
        assert_eq!(scaler.building_width(800, 0), 0);
    }

    #[test]
    fn test_ground_and_heights() {
        let scaler = ResponsiveScaler;
        assert_eq!(scaler.ground_level(768), 614.0);
        assert_eq!(scaler.base_height(768), 384.0);
        assert_eq!(scaler.scaled_height(1080, 100.0), 140.0);
    }
}
