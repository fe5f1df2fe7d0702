//! Destructible buildings
//!
//! A building is an axis-aligned rectangle that impacts perforate with circular
//! craters. Craters only accumulate; overlapping craters are kept as-is. The
//! disc approximates the destroyed silhouette, which is an accepted precision
//! limit rather than something to refine.

use serde::{Deserialize, Serialize};

use crate::error::{Dimension, GameError, GameResult};

/// A circular hole carved by an impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crater {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Crater {
    /// Distance <= radius counts as inside
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }
}

/// Edges of a building rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingBounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Cosmetic hints for the renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingStyle {
    /// Window grid (rows, cols)
    pub windows: Option<(u32, u32)>,
    pub roof_type: Option<String>,
}

/// Snapshot handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRenderData {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub craters: Vec<Crater>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BuildingRecord")]
pub struct Building {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    /// Fill color (hex string)
    pub color: String,
    craters: Vec<Crater>,
    #[serde(default)]
    style: BuildingStyle,
}

/// Wire shape of a building; loading goes back through [`Building::new`]
#[derive(Deserialize)]
struct BuildingRecord {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: String,
    #[serde(default)]
    craters: Vec<Crater>,
    #[serde(default)]
    style: BuildingStyle,
}

impl TryFrom<BuildingRecord> for Building {
    type Error = GameError;

    fn try_from(record: BuildingRecord) -> GameResult<Self> {
        let mut building =
            Building::new(record.x, record.y, record.width, record.height, record.color)?;
        building.craters = record.craters;
        building.style = record.style;
        Ok(building)
    }
}

impl Building {
    /// Rejects negative origins and non-positive sizes (NaN included)
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: impl Into<String>,
    ) -> GameResult<Self> {
        let checks = [
            (Dimension::X, x, x >= 0.0),
            (Dimension::Y, y, y >= 0.0),
            (Dimension::Width, width, width > 0.0),
            (Dimension::Height, height, height > 0.0),
        ];
        if let Some(&(dimension, value, _)) = checks.iter().find(|(_, _, ok)| !*ok) {
            return Err(GameError::InvalidBuilding { dimension, value });
        }

        Ok(Self {
            x,
            y,
            width,
            height,
            color: color.into(),
            craters: Vec::new(),
            style: BuildingStyle::default(),
        })
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bounds(&self) -> BuildingBounds {
        BuildingBounds {
            left: self.x,
            right: self.x + self.width,
            top: self.y,
            bottom: self.y + self.height,
        }
    }

    /// Inside the rectangle (edges included) and outside every crater
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let b = self.bounds();
        if x < b.left || x > b.right || y < b.top || y > b.bottom {
            return false;
        }
        !self.craters.iter().any(|c| c.contains(x, y))
    }

    pub fn create_crater(&mut self, x: f64, y: f64, radius: f64) {
        self.craters.push(Crater { x, y, radius });
    }

    /// Craters in creation order (read-only view)
    pub fn craters(&self) -> &[Crater] {
        &self.craters
    }

    pub fn render_data(&self) -> BuildingRenderData {
        BuildingRenderData {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            color: self.color.clone(),
            craters: self.craters.clone(),
        }
    }

    pub fn set_style(&mut self, style: BuildingStyle) {
        self.style = style;
    }

    pub fn style(&self) -> BuildingStyle {
        self.style.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Building {
        Building::new(100.0, 200.0, 80.0, 150.0, "#808080").unwrap()
    }

    #[test]
    fn test_rejects_invalid_dimensions() {
        assert!(matches!(
            Building::new(-1.0, 0.0, 10.0, 10.0, "#000"),
            Err(GameError::InvalidBuilding { dimension: Dimension::X, .. })
        ));
        assert!(matches!(
            Building::new(0.0, -5.0, 10.0, 10.0, "#000"),
            Err(GameError::InvalidBuilding { dimension: Dimension::Y, .. })
        ));
        assert!(matches!(
            Building::new(0.0, 0.0, 0.0, 10.0, "#000"),
            Err(GameError::InvalidBuilding { dimension: Dimension::Width, .. })
        ));
        assert!(matches!(
            Building::new(0.0, 0.0, 10.0, -3.0, "#000"),
            Err(GameError::InvalidBuilding { dimension: Dimension::Height, .. })
        ));
        assert!(Building::new(0.0, 0.0, f64::NAN, 10.0, "#000").is_err());
    }

    #[test]
    fn test_bounds() {
        let b = sample();
        let bounds = b.bounds();
        assert_eq!(bounds.left, 100.0);
        assert_eq!(bounds.right, 180.0);
        assert_eq!(bounds.top, 200.0);
        assert_eq!(bounds.bottom, 350.0);
    }

    #[test]
    fn test_contains_point_edges_inclusive() {
        let b = sample();
        assert!(b.contains_point(100.0, 200.0));
        assert!(b.contains_point(180.0, 350.0));
        assert!(!b.contains_point(99.9, 250.0));
        assert!(!b.contains_point(150.0, 350.1));
    }

    #[test]
    fn test_crater_removes_points() {
        let mut b = sample();
        b.create_crater(140.0, 250.0, 20.0);
        assert!(!b.contains_point(140.0, 250.0));
        assert!(!b.contains_point(160.0, 250.0)); // on the rim
        assert!(b.contains_point(110.0, 220.0));
        assert_eq!(b.craters().len(), 1);
    }

    #[test]
    fn test_craters_accumulate_and_overlap() {
        let mut b = sample();
        b.create_crater(140.0, 250.0, 20.0);
        b.create_crater(145.0, 250.0, 20.0);
        b.create_crater(140.0, 250.0, 20.0);
        assert_eq!(b.craters().len(), 3);
        assert_eq!(b.craters()[1].x, 145.0);
    }

    #[test]
    fn test_render_data_is_a_copy() {
        let mut b = sample();
        b.create_crater(140.0, 250.0, 20.0);
        let mut data = b.render_data();
        data.craters.clear();
        data.color.push_str("ff");
        assert_eq!(b.craters().len(), 1);
        assert_eq!(b.color, "#808080");
    }

    #[test]
    fn test_style_roundtrip() {
        let mut b = sample();
        assert_eq!(b.style(), BuildingStyle::default());
        b.set_style(BuildingStyle {
            windows: Some((4, 3)),
            roof_type: Some("flat".to_string()),
        });
        let mut style = b.style();
        style.windows = None;
        assert_eq!(b.style().windows, Some((4, 3)));
    }

    #[test]
    fn test_deserialize_validates() {
        let mut b = sample();
        b.create_crater(140.0, 250.0, 20.0);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(serde_json::from_str::<Building>(&json).unwrap(), b);

        let bad = r##"{"x":-50.0,"y":-10.0,"width":0.0,"height":-20.0,
                        "color":"#000","craters":[]}"##;
        let err = serde_json::from_str::<Building>(bad).unwrap_err();
        assert!(err.to_string().contains("invalid building x position"), "{err}");

        let flat = r##"{"x":0.0,"y":0.0,"width":10.0,"height":0.0,"color":"#000"}"##;
        assert!(serde_json::from_str::<Building>(flat).is_err());
    }
}
