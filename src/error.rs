//! Error types for the simulation core.

use std::fmt;

/// Building dimension rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    X,
    Y,
    Width,
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::X => write!(f, "x position"),
            Dimension::Y => write!(f, "y position"),
            Dimension::Width => write!(f, "width"),
            Dimension::Height => write!(f, "height"),
        }
    }
}

/// Failures surfaced by the core. All of them are construction-time or
/// input-boundary errors; the simulation itself never fails mid-step.
#[derive(Debug)]
pub enum GameError {
    /// A building was constructed with a negative origin or non-positive size.
    InvalidBuilding { dimension: Dimension, value: f64 },
    /// Player numbers are 1 or 2.
    InvalidPlayerNumber(u8),
    /// Placement needs two distinct buildings.
    NotEnoughBuildings(usize),
    /// Shot angle outside 0-180 degrees.
    AngleOutOfRange(f64),
    /// Shot velocity outside 1-100.
    VelocityOutOfRange(f64),
    /// Settings JSON could not be parsed or written.
    Settings(serde_json::Error),
    /// Settings file could not be read.
    Io(std::io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidBuilding { dimension, value } => {
                write!(f, "invalid building {dimension}: {value}")
            }
            GameError::InvalidPlayerNumber(n) => write!(f, "invalid player number: {n}"),
            GameError::NotEnoughBuildings(n) => {
                write!(f, "need at least 2 buildings to place gorillas, got {n}")
            }
            GameError::AngleOutOfRange(_) => write!(f, "Angle must be between 0 and 180 degrees"),
            GameError::VelocityOutOfRange(_) => write!(f, "Velocity must be between 1 and 100"),
            GameError::Settings(e) => write!(f, "settings: {e}"),
            GameError::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Settings(e) => Some(e),
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Settings(e)
    }
}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e)
    }
}

/// Result type for fallible core operations.
pub type GameResult<T> = Result<T, GameError>;
