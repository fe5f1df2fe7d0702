//! Gorilla placement and turn management

use super::building::Building;
use super::gorilla::{Gorilla, GorillaBounds};
use super::seed::{PcgSource, RandomSource, string_hash};
use crate::consts::*;
use crate::error::{GameError, GameResult};

/// Places the two gorillas and tracks whose turn it is
#[derive(Debug)]
pub struct GorillaManager {
    gorillas: Vec<Gorilla>,
    current_player_index: usize,
    is_animating: bool,
    seed: Option<String>,
    source: Box<dyn RandomSource>,
    /// Building indices picked by the last placement (player 1, player 2)
    building_indices: Option<(usize, usize)>,
}

impl Default for GorillaManager {
    fn default() -> Self {
        Self::new(None)
    }
}

impl GorillaManager {
    /// An empty seed counts as unseeded
    pub fn new(seed: Option<&str>) -> Self {
        Self {
            gorillas: Vec::new(),
            current_player_index: 0,
            is_animating: false,
            seed: seed.filter(|s| !s.is_empty()).map(str::to_owned),
            source: Box::new(PcgSource::from_entropy()),
            building_indices: None,
        }
    }

    /// Unseeded manager drawing placement from `source`
    pub fn with_source(source: Box<dyn RandomSource>) -> Self {
        Self {
            source,
            ..Self::new(None)
        }
    }

    /// Put one gorilla on each of two distinct buildings
    ///
    /// If the two land closer than 200px apart, player 2 is shifted to 250px
    /// right of player 1 even if that leaves it off its building.
    pub fn place_gorillas(&mut self, buildings: &[Building]) -> GameResult<&[Gorilla]> {
        if buildings.len() < 2 {
            return Err(GameError::NotEnoughBuildings(buildings.len()));
        }

        let first = self.select_building_index(buildings.len(), 0, None);
        let second = self.select_building_index(buildings.len(), 1, Some(first));

        let mut gorilla1 = Gorilla::place_on_building(1, &buildings[first])?;
        let mut gorilla2 = Gorilla::place_on_building(2, &buildings[second])?;

        if (gorilla1.x - gorilla2.x).abs() < MIN_GORILLA_SEPARATION {
            log::debug!(
                "Gorillas too close ({:.0}px), moving player 2 to x={:.0}",
                (gorilla1.x - gorilla2.x).abs(),
                gorilla1.x + GORILLA_REPOSITION_OFFSET
            );
            gorilla2.x = gorilla1.x + GORILLA_REPOSITION_OFFSET;
        }

        gorilla1.set_current_player(true);
        gorilla2.set_current_player(false);
        self.current_player_index = 0;
        self.building_indices = Some((first, second));

        log::info!(
            "Placed gorillas on buildings {} and {} (x={:.0}, x={:.0})",
            first,
            second,
            gorilla1.x,
            gorilla2.x
        );

        self.gorillas = vec![gorilla1, gorilla2];
        Ok(&self.gorillas)
    }

    fn select_building_index(
        &mut self,
        count: usize,
        gorilla_index: usize,
        exclude: Option<usize>,
    ) -> usize {
        let available: Vec<usize> = (0..count).filter(|&i| Some(i) != exclude).collect();
        let pick = match &self.seed {
            Some(seed) => {
                let hash = string_hash(&format!("{seed}{gorilla_index}")).unsigned_abs();
                hash as usize % available.len()
            }
            None => {
                let roll = self.source.next_unit() * available.len() as f64;
                (roll.floor() as usize).min(available.len() - 1)
            }
        };
        available[pick]
    }

    pub fn gorillas(&self) -> &[Gorilla] {
        &self.gorillas
    }

    pub fn gorilla(&self, player: u8) -> Option<&Gorilla> {
        self.gorillas.iter().find(|g| g.player() == player)
    }

    pub fn gorilla_mut(&mut self, player: u8) -> Option<&mut Gorilla> {
        self.gorillas.iter_mut().find(|g| g.player() == player)
    }

    pub fn building_indices(&self) -> Option<(usize, usize)> {
        self.building_indices
    }

    pub fn is_seeded(&self) -> bool {
        self.seed.is_some()
    }

    /// 1 or 2
    pub fn current_player(&self) -> u8 {
        if self.current_player_index == 0 { 1 } else { 2 }
    }

    /// Swap turns; ignored while an animation is running
    pub fn next_turn(&mut self) {
        if self.is_animating {
            return;
        }
        self.current_player_index = (self.current_player_index + 1) % 2;
        let current = self.current_player_index;
        for (index, gorilla) in self.gorillas.iter_mut().enumerate() {
            gorilla.set_current_player(index == current);
        }
    }

    pub fn set_animating(&mut self, animating: bool) {
        self.is_animating = animating;
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    /// A round is over once either gorilla is down
    pub fn is_game_over(&self) -> bool {
        self.gorillas.iter().any(|g| !g.is_alive)
    }

    pub fn winner(&self) -> Option<u8> {
        self.gorillas.iter().find(|g| g.is_alive).map(Gorilla::player)
    }

    pub fn winner_gorilla_mut(&mut self) -> Option<&mut Gorilla> {
        self.gorillas.iter_mut().find(|g| g.is_alive)
    }

    pub fn kill_gorilla(&mut self, player: u8) {
        if let Some(gorilla) = self.gorilla_mut(player) {
            gorilla.kill();
        }
    }

    /// Kill the first living gorilla whose box contains the point
    pub fn check_projectile_hit(&mut self, x: f64, y: f64) -> Option<u8> {
        let gorilla = self
            .gorillas
            .iter_mut()
            .find(|g| g.is_alive && g.bounds().contains(x, y))?;
        gorilla.kill();
        Some(gorilla.player())
    }

    /// Same test as [`Self::check_projectile_hit`] without killing anyone
    pub fn check_point_collision(&self, x: f64, y: f64) -> Option<u8> {
        self.gorillas
            .iter()
            .find(|g| g.is_alive && g.bounds().contains(x, y))
            .map(Gorilla::player)
    }

    pub fn gorilla_bounds(&self) -> Vec<GorillaBounds> {
        self.gorillas.iter().map(Gorilla::bounds).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::seed::ScriptedSource;

    fn city() -> Vec<Building> {
        (0..8)
            .map(|i| Building::new(i as f64 * 100.0, 400.0, 100.0, 214.0, "#808080").unwrap())
            .collect()
    }

    #[test]
    fn test_places_two_gorillas_on_distinct_buildings() {
        let mut manager = GorillaManager::new(None);
        let buildings = city();
        let gorillas = manager.place_gorillas(&buildings).unwrap();
        assert_eq!(gorillas.len(), 2);
        assert_eq!(gorillas[0].player(), 1);
        assert_eq!(gorillas[1].player(), 2);
        let (a, b) = manager.building_indices().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_requires_two_buildings() {
        let mut manager = GorillaManager::new(None);
        let one = vec![Building::new(0.0, 0.0, 10.0, 10.0, "#fff").unwrap()];
        assert!(matches!(
            manager.place_gorillas(&one),
            Err(GameError::NotEnoughBuildings(1))
        ));
    }

    #[test]
    fn test_minimum_separation_repositions_player_two() {
        // First roll picks building 0, second picks building 0 of the
        // remaining list (building 1) - adjacent, 100px apart
        let mut manager = GorillaManager::with_source(Box::new(ScriptedSource::new(vec![0.0])));
        let buildings = city();
        let gorillas = manager.place_gorillas(&buildings).unwrap();
        assert_eq!(gorillas[0].x, 50.0);
        assert_eq!(gorillas[1].x, 300.0);
    }

    #[test]
    fn test_far_apart_gorillas_stay_on_roofs() {
        let mut manager =
            GorillaManager::with_source(Box::new(ScriptedSource::new(vec![0.0, 0.99])));
        let buildings = city();
        let gorillas = manager.place_gorillas(&buildings).unwrap();
        assert_eq!(gorillas[0].x, 50.0);
        assert_eq!(gorillas[1].x, 750.0);
        assert_eq!(gorillas[1].y, 400.0 - 32.0);
    }

    #[test]
    fn test_seeded_placement_is_deterministic() {
        let buildings = city();
        let mut a = GorillaManager::new(Some("test123"));
        let mut b = GorillaManager::new(Some("test123"));
        let pa = a.place_gorillas(&buildings).unwrap().to_vec();
        let pb = b.place_gorillas(&buildings).unwrap().to_vec();
        assert_eq!(pa, pb);
        // Same seed gives the same spots round after round
        let again = a.place_gorillas(&buildings).unwrap().to_vec();
        assert_eq!(pa, again);
    }

    #[test]
    fn test_empty_seed_is_unseeded() {
        assert!(GorillaManager::new(Some("test123")).is_seeded());
        assert!(!GorillaManager::new(Some("")).is_seeded());
    }

    #[test]
    fn test_turns_toggle_unless_animating() {
        let mut manager = GorillaManager::new(None);
        manager.place_gorillas(&city()).unwrap();
        assert_eq!(manager.current_player(), 1);
        assert!(manager.gorilla(1).unwrap().is_current_player);

        manager.next_turn();
        assert_eq!(manager.current_player(), 2);
        assert!(manager.gorilla(2).unwrap().is_current_player);
        assert!(!manager.gorilla(1).unwrap().is_current_player);

        manager.set_animating(true);
        manager.next_turn();
        assert_eq!(manager.current_player(), 2);

        manager.set_animating(false);
        manager.next_turn();
        assert_eq!(manager.current_player(), 1);
    }

    #[test]
    fn test_placement_resets_turn() {
        let mut manager = GorillaManager::new(None);
        let buildings = city();
        manager.place_gorillas(&buildings).unwrap();
        manager.next_turn();
        manager.place_gorillas(&buildings).unwrap();
        assert_eq!(manager.current_player(), 1);
    }

    #[test]
    fn test_projectile_hit_kills_target() {
        let mut manager = GorillaManager::new(None);
        manager.place_gorillas(&city()).unwrap();
        let target = manager.gorilla(2).unwrap().bounds();

        assert_eq!(manager.check_point_collision(target.x + 1.0, target.y + 1.0), Some(2));
        assert!(!manager.is_game_over());

        assert_eq!(manager.check_projectile_hit(target.x + 1.0, target.y + 1.0), Some(2));
        assert!(manager.is_game_over());
        assert_eq!(manager.winner(), Some(1));

        // Dead gorillas no longer register hits
        assert_eq!(manager.check_projectile_hit(target.x + 1.0, target.y + 1.0), None);
    }

    #[test]
    fn test_miss_returns_none() {
        let mut manager = GorillaManager::new(None);
        manager.place_gorillas(&city()).unwrap();
        assert_eq!(manager.check_projectile_hit(-50.0, -50.0), None);
        assert_eq!(manager.gorilla_bounds().len(), 2);
    }
}
