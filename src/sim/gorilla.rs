//! Gorilla actors
//!
//! A gorilla's `(x, y)` is the top-left corner of its 32x32 hit box. Placement
//! puts that corner at the horizontal centre of the rooftop.

use serde::{Deserialize, Serialize};

use super::building::Building;
use crate::consts::*;
use crate::error::{GameError, GameResult};

/// Animation the renderer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationState {
    Idle,
    Throw,
    Celebrate,
    Dead,
}

impl AnimationState {
    /// Sprite key in the asset pack
    pub fn sprite(&self) -> &'static str {
        match self {
            AnimationState::Idle => "gorilla_idle",
            AnimationState::Throw => "gorilla_throw",
            AnimationState::Celebrate => "gorilla_celebrate",
            AnimationState::Dead => "gorilla_dead",
        }
    }
}

/// Axis-aligned hit box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GorillaBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl GorillaBounds {
    /// Edges included
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GorillaRenderData {
    pub x: f64,
    pub y: f64,
    pub player: u8,
    pub animation: AnimationState,
    pub is_alive: bool,
    pub is_current_player: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GorillaRecord")]
pub struct Gorilla {
    player: u8,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub is_alive: bool,
    pub is_celebrating: bool,
    pub is_current_player: bool,
    pub is_throw_animating: bool,
    pub is_playing_hit_animation: bool,
    /// Angle of the last throw (degrees)
    pub throw_angle: f64,
}

/// Wire shape of a gorilla; loading goes back through [`Gorilla::new`]
#[derive(Deserialize)]
struct GorillaRecord {
    player: u8,
    x: f64,
    y: f64,
    #[serde(default = "default_width")]
    width: f64,
    #[serde(default = "default_height")]
    height: f64,
    #[serde(default = "alive")]
    is_alive: bool,
    #[serde(default)]
    is_celebrating: bool,
    #[serde(default)]
    is_current_player: bool,
    #[serde(default)]
    is_throw_animating: bool,
    #[serde(default)]
    is_playing_hit_animation: bool,
    #[serde(default)]
    throw_angle: f64,
}

fn default_width() -> f64 {
    GORILLA_WIDTH
}

fn default_height() -> f64 {
    GORILLA_HEIGHT
}

fn alive() -> bool {
    true
}

impl TryFrom<GorillaRecord> for Gorilla {
    type Error = GameError;

    fn try_from(record: GorillaRecord) -> GameResult<Self> {
        Ok(Self {
            width: record.width,
            height: record.height,
            is_alive: record.is_alive,
            is_celebrating: record.is_celebrating,
            is_current_player: record.is_current_player,
            is_throw_animating: record.is_throw_animating,
            is_playing_hit_animation: record.is_playing_hit_animation,
            throw_angle: record.throw_angle,
            ..Gorilla::new(record.player, record.x, record.y)?
        })
    }
}

impl Gorilla {
    pub fn new(player: u8, x: f64, y: f64) -> GameResult<Self> {
        if !(1..=2).contains(&player) {
            return Err(GameError::InvalidPlayerNumber(player));
        }
        Ok(Self {
            player,
            x,
            y,
            width: GORILLA_WIDTH,
            height: GORILLA_HEIGHT,
            is_alive: true,
            is_celebrating: false,
            is_current_player: false,
            is_throw_animating: false,
            is_playing_hit_animation: false,
            throw_angle: 0.0,
        })
    }

    /// Stand on the roof, box corner at the roof's horizontal centre
    pub fn place_on_building(player: u8, building: &Building) -> GameResult<Self> {
        let x = building.x() + building.width() / 2.0;
        let y = building.y() - GORILLA_HEIGHT;
        Self::new(player, x, y)
    }

    #[inline]
    pub fn player(&self) -> u8 {
        self.player
    }

    pub fn bounds(&self) -> GorillaBounds {
        GorillaBounds {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Top centre of the box, where shots leave from
    pub fn launch_point(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y)
    }

    pub fn kill(&mut self) {
        self.is_alive = false;
    }

    pub fn celebrate(&mut self) {
        self.is_celebrating = true;
    }

    pub fn set_current_player(&mut self, is_current: bool) {
        self.is_current_player = is_current;
    }

    pub fn start_throw_animation(&mut self, angle: f64) {
        self.is_throw_animating = true;
        self.throw_angle = angle;
    }

    pub fn complete_throw_animation(&mut self) {
        self.is_throw_animating = false;
    }

    pub fn play_hit_animation(&mut self) {
        self.is_playing_hit_animation = true;
    }

    pub fn animation_state(&self) -> AnimationState {
        if !self.is_alive {
            AnimationState::Dead
        } else if self.is_throw_animating {
            AnimationState::Throw
        } else if self.is_celebrating {
            AnimationState::Celebrate
        } else {
            AnimationState::Idle
        }
    }

    pub fn render_data(&self) -> GorillaRenderData {
        GorillaRenderData {
            x: self.x,
            y: self.y,
            player: self.player,
            animation: self.animation_state(),
            is_alive: self.is_alive,
            is_current_player: self.is_current_player,
        }
    }
}
