//! Game settings and preferences
//!
//! Plain JSON; missing fields fall back to their defaults so a partial file
//! only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::error::GameResult;
use crate::sim::GravityPreset;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: u32,
    pub screen_height: u32,

    // === Simulation ===
    /// Makes the skyline, placement and wind reproducible
    pub seed: Option<String>,
    /// Gravity for live flight (the aim preview always uses Earth)
    pub gravity: GravityPreset,
    /// Fixed simulation step in seconds
    pub timestep: f64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1024,
            screen_height: 768,

            seed: None,
            gravity: GravityPreset::Earth,
            timestep: SIM_DT,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> GameResult<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> GameResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let settings = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> GameResult<()> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Clamp volumes into range and replace an unusable timestep
    fn sanitize(&mut self) {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            log::warn!("Invalid timestep {}, using {SIM_DT}", self.timestep);
            self.timestep = SIM_DT;
        }
        if self.seed.as_deref().is_some_and(str::is_empty) {
            self.seed = None;
        }
    }

    /// Effective sound effects volume (respects mute and master)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume (respects mute and master)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}
