//! Match state and the events it emits
//!
//! Everything here is plain serializable data. The manager owns the live copy
//! and hands out clones.

use serde::{Deserialize, Serialize};

/// Round wins per player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub player1: u32,
    pub player2: u32,
}

impl MatchScore {
    /// Credit a round to `player` (1 or 2)
    pub fn award(&mut self, player: u8) {
        if player == 1 {
            self.player1 += 1;
        } else {
            self.player2 += 1;
        }
    }

    pub fn for_player(&self, player: u8) -> u32 {
        if player == 1 { self.player1 } else { self.player2 }
    }

    pub fn leader(&self) -> u32 {
        self.player1.max(self.player2)
    }
}

/// Snapshot of the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// False before the first game and while paused
    pub is_active: bool,
    pub is_game_over: bool,
    /// Set only once the match is decided
    pub winner: Option<u8>,
    /// 1 or 2
    pub current_player: u8,
    /// 1-based
    pub round: u32,
    pub match_score: MatchScore,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            is_active: false,
            is_game_over: false,
            winner: None,
            current_player: 1,
            round: 1,
            match_score: MatchScore::default(),
        }
    }
}

/// What a projectile position resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    Gorilla { player_hit: u8 },
    /// Index into the building list
    Building { index: usize },
    Miss,
}

impl HitOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, HitOutcome::Miss)
    }
}

/// Fire-and-forget notifications for audio and effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired {
        player: u8,
        angle: f64,
        velocity: f64,
    },
    BuildingHit {
        index: usize,
        x: f64,
        y: f64,
    },
    GorillaHit {
        player_hit: u8,
        x: f64,
        y: f64,
    },
    /// Left the screen without hitting anything
    ProjectileLost { x: f64, y: f64 },
    ShotRejected { reason: String },
    RoundStarted { round: u32, wind: f64 },
    MatchOver { winner: u8, score: MatchScore },
}
