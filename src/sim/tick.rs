//! Fixed timestep shot loop
//!
//! A [`Duel`] wraps the match manager with the one thing it lacks: a live
//! projectile advanced frame by frame. Physics runs before collision in every
//! tick, and turn state only moves once the shot in flight has resolved.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::city::CityGenerator;
use super::manager::GameStateManager;
use super::physics::{GravityPreset, Projectile, ProjectilePhysics, TrajectoryPoint};
use super::state::{GameEvent, HitOutcome};
use crate::consts::*;
use crate::error::GameResult;
use crate::input::{InputValidator, Shot};
use crate::settings::Settings;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Throw for the current player
    pub shot: Option<Shot>,
    /// Pause toggle
    pub pause: bool,
}

/// Live screen area; shots past its margins are discarded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub width: f64,
    pub height: f64,
}

impl ScreenBounds {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
        }
    }

    /// No limit above the screen; shots may arc out of view and come back
    pub fn is_offscreen(&self, pos: DVec2) -> bool {
        pos.x < -OFFSCREEN_MARGIN_X
            || pos.x > self.width + OFFSCREEN_MARGIN_X
            || pos.y > self.height + OFFSCREEN_MARGIN_BOTTOM
    }
}

/// The projectile in flight and who threw it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveShot {
    pub projectile: Projectile,
    pub owner: u8,
    /// Set once the projectile has left the thrower's own box
    pub armed: bool,
}

#[derive(Debug)]
pub struct Duel {
    manager: GameStateManager,
    physics: ProjectilePhysics,
    validator: InputValidator,
    screen: ScreenBounds,
    shot: Option<ActiveShot>,
    step_dt: f64,
    accumulator: f64,
    /// One-shot input consumed by the next tick
    input: TickInput,
    time_ticks: u64,
}

impl Duel {
    /// Wrap a started manager
    pub fn new(manager: GameStateManager, preset: GravityPreset, screen: ScreenBounds) -> Self {
        Self {
            manager,
            physics: ProjectilePhysics::new(preset),
            validator: InputValidator,
            screen,
            shot: None,
            step_dt: SIM_DT,
            accumulator: 0.0,
            input: TickInput::default(),
            time_ticks: 0,
        }
    }

    /// Build a city for the configured screen and start a match on it
    pub fn from_settings(settings: &Settings) -> GameResult<Self> {
        let seed = settings.seed.as_deref();
        let mut city = CityGenerator::new(settings.screen_width, settings.screen_height, seed);
        let buildings = city.generate_city()?;

        let mut manager = match seed {
            Some(seed) => GameStateManager::with_seed(seed),
            None => GameStateManager::new(),
        };
        manager.start_new_game(buildings)?;

        let screen = ScreenBounds::new(settings.screen_width, settings.screen_height);
        let mut duel = Self::new(manager, settings.gravity, screen);
        duel.step_dt = settings.timestep;
        Ok(duel)
    }

    pub fn with_timestep(mut self, dt: f64) -> Self {
        self.step_dt = dt;
        self
    }

    /// Queue a throw for the next tick
    pub fn queue_shot(&mut self, shot: Shot) {
        self.input.shot = Some(shot);
    }

    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    /// Run fixed ticks for `frame_dt` seconds of real time, returns the tick count
    pub fn update(&mut self, frame_dt: f64) -> u32 {
        let frame_dt = frame_dt.min(MAX_FRAME_DT);
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.step_dt && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.input);
            let dt = self.step_dt;
            tick(self, &input, dt);
            self.accumulator -= dt;
            substeps += 1;
        }
        substeps
    }

    /// Preview a throw from the current player under live gravity and wind
    pub fn preview(&self, shot: Shot) -> Vec<TrajectoryPoint> {
        let Some(start) = self.launch_point(self.manager.game_state().current_player) else {
            return Vec::new();
        };
        self.physics.predict_trajectory(
            start,
            shot.angle,
            shot.velocity,
            self.physics.gravity(),
            self.manager.wind_strength(),
            self.step_dt,
        )
    }

    fn launch_point(&self, player: u8) -> Option<DVec2> {
        let gorilla = self.manager.gorilla_manager().gorilla(player)?;
        let (x, y) = gorilla.launch_point();
        Some(DVec2::new(x, y))
    }

    pub fn manager(&self) -> &GameStateManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut GameStateManager {
        &mut self.manager
    }

    pub fn physics(&self) -> &ProjectilePhysics {
        &self.physics
    }

    pub fn screen(&self) -> ScreenBounds {
        self.screen
    }

    pub fn active_shot(&self) -> Option<&ActiveShot> {
        self.shot.as_ref()
    }

    pub fn is_shot_in_flight(&self) -> bool {
        self.shot.is_some()
    }

    pub fn is_paused(&self) -> bool {
        !self.manager.game_state().is_active
    }

    pub fn ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.manager.drain_events()
    }

    /// Spawn a projectile for the current player; busy or over means no-op
    fn fire(&mut self, shot: Shot) {
        let state = self.manager.game_state();
        if !state.is_active || state.is_game_over || self.shot.is_some() {
            return;
        }

        if let Err(errors) = self.validator.validate_shot(shot.angle, shot.velocity) {
            let reason = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            log::warn!("Shot rejected: {reason}");
            self.manager.push_event(GameEvent::ShotRejected { reason });
            return;
        }

        let player = state.current_player;
        let Some(start) = self.launch_point(player) else {
            return;
        };

        let projectile = self
            .physics
            .create_projectile(start.x, start.y, shot.angle, shot.velocity);
        self.shot = Some(ActiveShot {
            projectile,
            owner: player,
            armed: false,
        });

        let gorillas = self.manager.gorilla_manager_mut();
        if let Some(gorilla) = gorillas.gorilla_mut(player) {
            gorilla.start_throw_animation(shot.angle);
        }
        gorillas.set_animating(true);

        log::debug!(
            "Player {player} fires: angle {:.1}, velocity {:.1}",
            shot.angle,
            shot.velocity
        );
        self.manager.push_event(GameEvent::ShotFired {
            player,
            angle: shot.angle,
            velocity: shot.velocity,
        });
    }

    /// Integrate the shot in flight, then resolve it if it hit or left
    fn advance_shot(&mut self, dt: f64) {
        let Some(active) = self.shot.as_mut() else {
            return;
        };

        let gravity = self.physics.gravity();
        let wind = self.manager.wind_strength();
        self.physics.update(&mut active.projectile, dt, gravity, wind);
        let pos = active.projectile.pos;

        if !active.armed {
            active.armed = self
                .manager
                .gorilla_manager()
                .gorilla(active.owner)
                .is_none_or(|g| !g.bounds().contains(pos.x, pos.y));
        }

        let outcome = if active.armed {
            self.manager.process_projectile_hit(pos.x, pos.y)
        } else {
            HitOutcome::Miss
        };

        match outcome {
            HitOutcome::Gorilla { player_hit } => {
                if let Some(gorilla) = self.manager.gorilla_manager_mut().gorilla_mut(player_hit) {
                    gorilla.play_hit_animation();
                }
                self.finish_shot();
                if !self.manager.game_state().is_game_over {
                    if let Err(e) = self.manager.start_new_round() {
                        log::warn!("Could not start next round: {e}");
                    }
                }
            }
            HitOutcome::Building { .. } => {
                self.finish_shot();
                self.manager.next_turn();
            }
            HitOutcome::Miss if self.screen.is_offscreen(pos) => {
                log::debug!("Projectile lost at ({:.0}, {:.0})", pos.x, pos.y);
                self.manager
                    .push_event(GameEvent::ProjectileLost { x: pos.x, y: pos.y });
                self.finish_shot();
                self.manager.next_turn();
            }
            HitOutcome::Miss => {}
        }
    }

    /// Drop the projectile and release the turn lock
    fn finish_shot(&mut self) {
        let Some(mut active) = self.shot.take() else {
            return;
        };
        self.physics.explode(&mut active.projectile);

        let gorillas = self.manager.gorilla_manager_mut();
        if let Some(gorilla) = gorillas.gorilla_mut(active.owner) {
            gorilla.complete_throw_animation();
        }
        gorillas.set_animating(false);
    }
}

/// Advance the duel by one fixed timestep
pub fn tick(duel: &mut Duel, input: &TickInput, dt: f64) {
    if input.pause {
        if duel.manager.game_state().is_active {
            duel.manager.pause_game();
            log::info!("Paused");
        } else {
            duel.manager.resume_game();
            log::info!("Resumed");
        }
    }

    let state = duel.manager.game_state();
    if !state.is_active || state.is_game_over {
        return;
    }

    if let Some(shot) = input.shot {
        duel.fire(shot);
    }

    duel.advance_shot(dt);
    duel.time_ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::building::Building;
    use crate::sim::gorilla::AnimationState;
    use crate::sim::seed::ScriptedSource;

    fn city() -> Vec<Building> {
        (0..8)
            .map(|i| Building::new(i as f64 * 100.0, 400.0, 100.0, 214.0, "#808080").unwrap())
            .collect()
    }

    /// Player 1 on building 0 at x=50, player 2 on building 7 at x=750, no wind
    fn duel() -> Duel {
        let mut manager = GameStateManager::with_sources(
            Box::new(ScriptedSource::new(vec![0.0, 0.99])),
            Box::new(ScriptedSource::new(vec![0.5])),
        );
        manager.start_new_game(city()).unwrap();
        manager.drain_events();
        Duel::new(manager, GravityPreset::Earth, ScreenBounds::new(800, 768))
    }

    fn fire(duel: &mut Duel, angle: f64, velocity: f64) {
        let input = TickInput {
            shot: Some(Shot::new(angle, velocity)),
            ..Default::default()
        };
        tick(duel, &input, SIM_DT);
    }

    fn run_until_resolved(duel: &mut Duel) {
        let idle = TickInput::default();
        for _ in 0..10_000 {
            if !duel.is_shot_in_flight() {
                return;
            }
            tick(duel, &idle, SIM_DT);
        }
        panic!("shot never resolved");
    }

    #[test]
    fn test_fire_spawns_at_launch_point() {
        let mut duel = duel();
        // Fire without integrating to inspect the spawn
        duel.fire(Shot::new(45.0, 50.0));

        let active = duel.active_shot().unwrap();
        assert_eq!(active.owner, 1);
        assert!(!active.armed);
        assert_eq!(active.projectile.pos, DVec2::new(66.0, 368.0));

        let gorillas = duel.manager().gorilla_manager();
        assert!(gorillas.is_animating());
        assert_eq!(
            gorillas.gorilla(1).unwrap().animation_state(),
            AnimationState::Throw
        );
        assert!(matches!(
            duel.drain_events()[0],
            GameEvent::ShotFired { player: 1, .. }
        ));
    }

    #[test]
    fn test_second_shot_ignored_while_in_flight() {
        let mut duel = duel();
        fire(&mut duel, 45.0, 50.0);
        let first = *duel.active_shot().unwrap();
        fire(&mut duel, 135.0, 90.0);
        let current = duel.active_shot().unwrap();
        assert_eq!(current.owner, first.owner);
        assert!(current.projectile.vel.x > 0.0);
    }

    #[test]
    fn test_invalid_shot_rejected() {
        let mut duel = duel();
        fire(&mut duel, 200.0, 0.0);
        assert!(!duel.is_shot_in_flight());
        let events = duel.drain_events();
        let GameEvent::ShotRejected { reason } = &events[0] else {
            panic!("expected rejection, got {events:?}");
        };
        assert!(reason.contains("Angle must be between 0 and 180 degrees"));
        assert!(reason.contains("Velocity must be between 1 and 100"));
    }

    #[test]
    fn test_pause_blocks_ticks() {
        let mut duel = duel();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut duel, &pause, SIM_DT);
        assert!(duel.is_paused());

        fire(&mut duel, 45.0, 50.0);
        assert!(!duel.is_shot_in_flight());
        assert_eq!(duel.ticks(), 0);

        tick(&mut duel, &pause, SIM_DT);
        assert!(!duel.is_paused());
        assert_eq!(duel.ticks(), 1);
    }

    #[test]
    fn test_building_hit_passes_turn() {
        let mut duel = duel();
        // Flat throw drops onto the next roof
        fire(&mut duel, 0.0, 50.0);
        run_until_resolved(&mut duel);

        let manager = duel.manager();
        assert_eq!(manager.buildings()[1].craters().len(), 1);
        assert_eq!(manager.game_state().current_player, 2);
        assert!(!manager.gorilla_manager().is_animating());
        assert!(!manager.gorilla_manager().gorilla(1).unwrap().is_throw_animating);

        let events = duel.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::BuildingHit { index: 1, .. })));
    }

    #[test]
    fn test_offscreen_shot_is_lost() {
        let mut duel = duel();
        fire(&mut duel, 180.0, 100.0);
        run_until_resolved(&mut duel);

        assert_eq!(duel.manager().game_state().current_player, 2);
        let events = duel.drain_events();
        let Some(GameEvent::ProjectileLost { x, .. }) = events.last() else {
            panic!("expected lost projectile, got {events:?}");
        };
        assert!(*x < -100.0);
    }

    #[test]
    fn test_shot_falling_back_hits_thrower() {
        let mut duel = duel();
        fire(&mut duel, 90.0, 20.0);
        run_until_resolved(&mut duel);

        let state = duel.manager().game_state();
        assert_eq!(state.match_score.player2, 1);
        assert_eq!(state.round, 2);
        assert_eq!(state.current_player, 1);

        let events = duel.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::GorillaHit { player_hit: 1, .. })));
        assert!(matches!(
            events.last(),
            Some(GameEvent::RoundStarted { round: 2, .. })
        ));
    }

    #[test]
    fn test_match_over_stops_play() {
        let mut duel = duel();
        for _ in 0..3 {
            fire(&mut duel, 90.0, 20.0);
            run_until_resolved(&mut duel);
        }
        let state = duel.manager().game_state();
        assert!(state.is_game_over);
        assert_eq!(state.winner, Some(2));
        assert!(duel
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::MatchOver { winner: 2, .. })));

        let ticks = duel.ticks();
        fire(&mut duel, 45.0, 50.0);
        assert!(!duel.is_shot_in_flight());
        assert_eq!(duel.ticks(), ticks);
    }

    #[test]
    fn test_update_runs_fixed_substeps() {
        let mut coarse = duel();
        assert_eq!(coarse.update(SIM_DT * 2.5), 2);

        // Frame time is clamped, then capped by MAX_SUBSTEPS
        let mut fine = duel().with_timestep(1.0 / 120.0);
        assert_eq!(fine.update(0.5), MAX_SUBSTEPS);
    }

    #[test]
    fn test_queued_shot_fires_once() {
        let mut duel = duel();
        duel.queue_shot(Shot::new(45.0, 60.0));
        duel.update(SIM_DT * 3.5);
        let fired = duel
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ShotFired { .. }))
            .count();
        assert_eq!(fired, 1);
        assert!(duel.is_shot_in_flight());
    }

    #[test]
    fn test_preview_matches_live_flight() {
        let mut duel = duel();
        let shot = Shot::new(60.0, 45.0);
        let preview = duel.preview(shot);
        duel.fire(shot);
        let idle = TickInput::default();
        for expected in preview.iter().skip(1).take(20) {
            tick(&mut duel, &idle, SIM_DT);
            let live = duel.active_shot().unwrap().projectile.pos;
            assert!((live - *expected).length() < 1e-9);
        }
    }

    #[test]
    fn test_offscreen_bounds() {
        let screen = ScreenBounds::new(1024, 768);
        assert!(!screen.is_offscreen(DVec2::new(-100.0, 800.0)));
        assert!(screen.is_offscreen(DVec2::new(-100.1, 0.0)));
        assert!(screen.is_offscreen(DVec2::new(1124.1, 0.0)));
        assert!(screen.is_offscreen(DVec2::new(500.0, 800.1)));
        assert!(!screen.is_offscreen(DVec2::new(500.0, -5000.0)));
    }
}
