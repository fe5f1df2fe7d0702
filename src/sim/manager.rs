//! Match flow: rounds, turns, wind, scoring
//!
//! `idle -> active -> (round end) -> active (next round) -> game over`

use glam::DVec2;

use super::building::Building;
use super::gorilla_manager::GorillaManager;
use super::physics::{ProjectilePhysics, TrajectoryPoint};
use super::seed::{PcgSource, RandomSource};
use super::state::{GameEvent, GameState, HitOutcome};
use crate::consts::*;
use crate::error::GameResult;

#[derive(Debug)]
pub struct GameStateManager {
    state: GameState,
    gorillas: GorillaManager,
    buildings: Vec<Building>,
    physics: ProjectilePhysics,
    wind_strength: f64,
    wind_source: Box<dyn RandomSource>,
    events: Vec<GameEvent>,
}

impl Default for GameStateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStateManager {
    pub fn new() -> Self {
        Self::with_parts(GorillaManager::new(None), Box::new(PcgSource::from_entropy()))
    }

    /// Reproducible placement and wind
    ///
    /// An empty seed means unseeded.
    pub fn with_seed(seed: &str) -> Self {
        if seed.is_empty() {
            return Self::new();
        }
        Self::with_parts(
            GorillaManager::new(Some(seed)),
            Box::new(PcgSource::from_seed_str(seed)),
        )
    }

    /// Inject the random sources used for placement and wind
    pub fn with_sources(placement: Box<dyn RandomSource>, wind: Box<dyn RandomSource>) -> Self {
        Self::with_parts(GorillaManager::with_source(placement), wind)
    }

    fn with_parts(gorillas: GorillaManager, wind_source: Box<dyn RandomSource>) -> Self {
        Self {
            state: GameState::default(),
            gorillas,
            buildings: Vec::new(),
            physics: ProjectilePhysics::default(),
            wind_strength: 0.0,
            wind_source,
            events: Vec::new(),
        }
    }

    /// Fresh match on `buildings`: score 0-0, round 1, player 1 to throw
    pub fn start_new_game(&mut self, buildings: Vec<Building>) -> GameResult<()> {
        self.gorillas.place_gorillas(&buildings)?;
        self.buildings = buildings;
        self.generate_wind();

        self.state = GameState {
            is_active: true,
            ..GameState::default()
        };

        log::info!(
            "New game: {} buildings, wind {:.2}",
            self.buildings.len(),
            self.wind_strength
        );
        self.events.push(GameEvent::RoundStarted {
            round: self.state.round,
            wind: self.wind_strength,
        });
        Ok(())
    }

    /// Re-place the gorillas on the same skyline; craters stay
    ///
    /// Does nothing once the match is decided.
    pub fn start_new_round(&mut self) -> GameResult<()> {
        if self.state.is_game_over {
            return Ok(());
        }

        self.gorillas.place_gorillas(&self.buildings)?;
        self.generate_wind();
        self.state.round += 1;
        self.state.current_player = 1;

        log::info!(
            "Round {} (score {}-{}), wind {:.2}",
            self.state.round,
            self.state.match_score.player1,
            self.state.match_score.player2,
            self.wind_strength
        );
        self.events.push(GameEvent::RoundStarted {
            round: self.state.round,
            wind: self.wind_strength,
        });
        Ok(())
    }

    /// Resolve a projectile at `(x, y)`: gorillas first, then buildings
    pub fn process_projectile_hit(&mut self, x: f64, y: f64) -> HitOutcome {
        if let Some(player_hit) = self.gorillas.check_projectile_hit(x, y) {
            self.events.push(GameEvent::GorillaHit { player_hit, x, y });
            self.handle_gorilla_hit(player_hit);
            return HitOutcome::Gorilla { player_hit };
        }

        if let Some(index) = self.buildings.iter().position(|b| b.contains_point(x, y)) {
            self.buildings[index].create_crater(x, y, CRATER_RADIUS);
            log::debug!("Building {index} hit at ({x:.1}, {y:.1})");
            self.events.push(GameEvent::BuildingHit { index, x, y });
            return HitOutcome::Building { index };
        }

        HitOutcome::Miss
    }

    fn handle_gorilla_hit(&mut self, player_hit: u8) {
        let winner = if player_hit == 1 { 2 } else { 1 };
        self.state.match_score.award(winner);

        log::info!(
            "Player {player_hit} hit, round to player {winner} (score {}-{})",
            self.state.match_score.player1,
            self.state.match_score.player2
        );

        if self.state.match_score.leader() >= MATCH_POINTS_TO_WIN {
            self.state.is_game_over = true;
            self.state.winner = Some(winner);
            log::info!("Player {winner} wins the match");
            self.events.push(GameEvent::MatchOver {
                winner,
                score: self.state.match_score,
            });
        }

        if let Some(gorilla) = self.gorillas.winner_gorilla_mut() {
            gorilla.celebrate();
        }
    }

    /// Hand the throw to the other player; ignored once the match is over
    pub fn next_turn(&mut self) {
        if self.state.is_game_over {
            return;
        }
        self.gorillas.next_turn();
        self.state.current_player = self.gorillas.current_player();
    }

    /// Roll a new wind in [-MAX_WIND, MAX_WIND] (negative blows left)
    pub fn generate_wind(&mut self) {
        self.wind_strength = (self.wind_source.next_unit() - 0.5) * 2.0 * MAX_WIND;
    }

    /// Copy of the current state
    pub fn game_state(&self) -> GameState {
        self.state.clone()
    }

    pub fn wind_strength(&self) -> f64 {
        self.wind_strength
    }

    pub fn is_valid_shot(&self, angle: f64, velocity: f64) -> bool {
        (MIN_ANGLE..=MAX_ANGLE).contains(&angle)
            && (MIN_VELOCITY..=MAX_VELOCITY).contains(&velocity)
    }

    /// Aim preview under the current wind
    ///
    /// Always uses Earth gravity, whatever preset the live flight runs with.
    pub fn calculate_trajectory(
        &self,
        start: DVec2,
        angle: f64,
        velocity: f64,
    ) -> Vec<TrajectoryPoint> {
        self.physics.predict_trajectory(
            start,
            angle,
            velocity,
            EARTH_GRAVITY,
            self.wind_strength,
            SIM_DT,
        )
    }

    pub fn pause_game(&mut self) {
        self.state.is_active = false;
    }

    pub fn resume_game(&mut self) {
        self.state.is_active = true;
    }

    /// Back to the idle state; skyline and gorillas are left as they are
    pub fn reset_game(&mut self) {
        self.state = GameState::default();
        log::info!("Game reset");
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn gorilla_manager(&self) -> &GorillaManager {
        &self.gorillas
    }

    pub fn gorilla_manager_mut(&mut self) -> &mut GorillaManager {
        &mut self.gorillas
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
