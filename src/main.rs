//! Gorillas headless demo
//!
//! Builds a skyline and lets two aiming bots play a full match. The first
//! argument, if given, is a JSON settings file (screen size, seed, gravity).

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::DVec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use gorillas::input::Shot;
    use gorillas::sim::seed::string_hash;
    use gorillas::sim::{Building, Duel, GameEvent, GorillaBounds};
    use gorillas::{GameResult, Settings};

    /// Real time fed to each update
    const FRAME_DT: f64 = 1.0 / 60.0;
    /// Give up on matches where nobody lands a hit
    const MAX_SHOTS: u32 = 200;
    /// Aim jitter so bots do not replay the same perfect shot
    const AIM_JITTER: f64 = 2.0;

    pub fn run(settings: &Settings) -> GameResult<()> {
        let mut duel = Duel::from_settings(settings)?;
        let mut rng = match settings.seed.as_deref().filter(|s| !s.is_empty()) {
            Some(seed) => Pcg32::seed_from_u64(u64::from(string_hash(seed) as u32)),
            None => Pcg32::from_rng(&mut rand::rng()),
        };

        log::info!(
            "Match on {}x{} with {} buildings, gravity {}",
            settings.screen_width,
            settings.screen_height,
            duel.manager().buildings().len(),
            duel.physics().preset().as_str()
        );

        let mut shots = 0;
        while !duel.manager().game_state().is_game_over && shots < MAX_SHOTS {
            if !duel.is_shot_in_flight() {
                duel.queue_shot(plan_shot(&duel, &mut rng));
                shots += 1;
            }
            duel.update(FRAME_DT);
            for event in duel.drain_events() {
                report(&event);
            }
        }

        let state = duel.manager().game_state();
        match state.winner {
            Some(winner) => println!(
                "Player {winner} wins {}-{} after {} rounds ({shots} shots)",
                state.match_score.player1, state.match_score.player2, state.round
            ),
            None => println!(
                "No winner after {shots} shots, score {}-{}",
                state.match_score.player1, state.match_score.player2
            ),
        }
        Ok(())
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::ShotFired {
                player,
                angle,
                velocity,
            } => log::info!("Player {player} throws: {angle:.1} deg at {velocity:.1}"),
            GameEvent::BuildingHit { index, x, y } => {
                log::info!("Building {index} hit at ({x:.0}, {y:.0})")
            }
            GameEvent::GorillaHit { player_hit, .. } => log::info!("Player {player_hit} is hit!"),
            GameEvent::ProjectileLost { .. } => log::info!("Shot left the screen"),
            GameEvent::ShotRejected { reason } => log::warn!("Shot rejected: {reason}"),
            GameEvent::RoundStarted { round, wind } => {
                log::info!("Round {round}, wind {wind:+.2}")
            }
            GameEvent::MatchOver { winner, score } => log::info!(
                "Match over: player {winner} ({}-{})",
                score.player1,
                score.player2
            ),
        }
    }

    /// Search a grid of throws with the live preview and take the closest miss
    pub fn plan_shot(duel: &Duel, rng: &mut Pcg32) -> Shot {
        let manager = duel.manager();
        let player = manager.game_state().current_player;
        let opponent = if player == 1 { 2 } else { 1 };
        let gorillas = manager.gorilla_manager();
        let (Some(me), Some(target)) = (gorillas.gorilla(player), gorillas.gorilla(opponent))
        else {
            return Shot::new(45.0, 50.0);
        };

        let own = me.bounds();
        let goal = target.bounds();
        let facing_right = goal.x >= own.x;

        let mut best = (f64::INFINITY, Shot::new(45.0, 50.0));
        for elevation in (10..=70).step_by(2) {
            let elevation = f64::from(elevation);
            let angle = if facing_right { elevation } else { 180.0 - elevation };
            for velocity in (10..=100).step_by(3) {
                let shot = Shot::new(angle, f64::from(velocity));
                let miss = miss_distance(&duel.preview(shot), &own, &goal, manager.buildings());
                if miss < best.0 {
                    best = (miss, shot);
                }
            }
        }

        Shot::new(
            (best.1.angle + rng.random_range(-AIM_JITTER..AIM_JITTER)).clamp(0.0, 180.0),
            (best.1.velocity + rng.random_range(-AIM_JITTER..AIM_JITTER)).clamp(1.0, 100.0),
        )
    }

    /// Closest approach to the target's centre before the shot hits a building
    pub fn miss_distance(
        trajectory: &[DVec2],
        own: &GorillaBounds,
        goal: &GorillaBounds,
        buildings: &[Building],
    ) -> f64 {
        let centre = DVec2::new(goal.x + goal.width / 2.0, goal.y + goal.height / 2.0);
        let mut armed = false;
        let mut closest = f64::INFINITY;
        for point in trajectory {
            if !armed {
                armed = !own.contains(point.x, point.y);
                if !armed {
                    continue;
                }
            }
            if goal.contains(point.x, point.y) {
                return 0.0;
            }
            closest = closest.min(point.distance(centre));
            if buildings.iter().any(|b| b.contains_point(point.x, point.y)) {
                break;
            }
        }
        closest
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use gorillas::Settings;

    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Could not load settings from {path}: {e}");
                return std::process::ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    match demo::run(&settings) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gorillas: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless demo on the web target
}
