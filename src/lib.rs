//! Gorillas - a skyline artillery duel
//!
//! Core modules:
//! - `sim`: Simulation core (city generation, ballistics, collisions, match state)
//! - `input`: Angle/velocity validation for the shot prompt
//! - `settings`: Serde-backed configuration and in-memory preferences
//! - `error`: Construction-time failures

pub mod error;
pub mod input;
pub mod settings;
pub mod sim;

pub use error::{GameError, GameResult};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame time fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Gravity presets (pixels/s²)
    pub const EARTH_GRAVITY: f64 = 9.81;
    pub const MOON_GRAVITY: f64 = 1.62;

    /// Trajectory preview limits (world space, not the live screen bounds)
    pub const MAX_TRAJECTORY_STEPS: usize = 1000;
    pub const PREVIEW_MAX_Y: f64 = 1000.0;
    pub const PREVIEW_MIN_X: f64 = -500.0;
    pub const PREVIEW_MAX_X: f64 = 2000.0;

    /// City layout
    pub const MIN_BUILDING_WIDTH: u32 = 80;
    pub const MIN_BUILDINGS: u32 = 6;
    pub const MAX_BUILDINGS: u32 = 10;
    pub const BASE_HEIGHT_RATIO: f64 = 0.5;
    pub const GROUND_LEVEL_RATIO: f64 = 0.8;
    pub const MIN_BUILDING_HEIGHT: f64 = 50.0;
    pub const REFERENCE_SCREEN_HEIGHT: f64 = 768.0;

    /// Gorilla sprite box and placement
    pub const GORILLA_WIDTH: f64 = 32.0;
    pub const GORILLA_HEIGHT: f64 = 32.0;
    pub const MIN_GORILLA_SEPARATION: f64 = 200.0;
    pub const GORILLA_REPOSITION_OFFSET: f64 = 250.0;

    /// Impact crater radius carved into buildings
    pub const CRATER_RADIUS: f64 = 25.0;
    /// Round wins needed to take the match
    pub const MATCH_POINTS_TO_WIN: u32 = 3;
    /// Wind is uniform in [-MAX_WIND, MAX_WIND]
    pub const MAX_WIND: f64 = 5.0;

    /// Accepted shot input ranges
    pub const MIN_ANGLE: f64 = 0.0;
    pub const MAX_ANGLE: f64 = 180.0;
    pub const MIN_VELOCITY: f64 = 1.0;
    pub const MAX_VELOCITY: f64 = 100.0;

    /// Live shot is discarded past these screen margins
    pub const OFFSCREEN_MARGIN_X: f64 = 100.0;
    pub const OFFSCREEN_MARGIN_BOTTOM: f64 = 32.0;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}
