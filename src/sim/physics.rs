//! Projectile kinematics
//!
//! Screen space, y grows downward: a negative `vy` moves the projectile up.
//! Integration is semi-implicit Euler - velocity first, then position with the
//! new velocity. Keep that order; trajectories must match step for step.
//!
//! Sampling is resolution-limited. A fast shot can step over a thin slice of a
//! building between two samples; that is accepted, not corrected.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::building::Building;
use crate::consts::*;
use crate::deg_to_rad;

/// A sampled trajectory position
pub type TrajectoryPoint = DVec2;

/// Gravity selected when the engine is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityPreset {
    #[default]
    Earth,
    Moon,
}

impl GravityPreset {
    pub fn gravity(&self) -> f64 {
        match self {
            GravityPreset::Earth => EARTH_GRAVITY,
            GravityPreset::Moon => MOON_GRAVITY,
        }
    }

    /// Unknown names fall back to Earth
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "moon" => GravityPreset::Moon,
            _ => GravityPreset::Earth,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GravityPreset::Earth => "earth",
            GravityPreset::Moon => "moon",
        }
    }
}

/// A shot in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: DVec2,
    pub vel: DVec2,
    pub is_active: bool,
    pub has_collided: bool,
}

/// Where a trajectory meets ground level
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GroundImpact {
    /// Interpolated crossing between two samples
    Crossing(TrajectoryPoint),
    /// No crossing within the sample cap; the last sample, impact uncertain
    Fallback(TrajectoryPoint),
}

impl GroundImpact {
    pub fn point(&self) -> TrajectoryPoint {
        match self {
            GroundImpact::Crossing(p) | GroundImpact::Fallback(p) => *p,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, GroundImpact::Crossing(_))
    }
}

/// First building a sampled trajectory enters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingCollision {
    pub building_index: usize,
    pub point: TrajectoryPoint,
    pub trajectory_index: usize,
}

/// Stateless kinematics engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectilePhysics {
    preset: GravityPreset,
}

impl Default for ProjectilePhysics {
    fn default() -> Self {
        Self::new(GravityPreset::Earth)
    }
}

impl ProjectilePhysics {
    pub fn new(preset: GravityPreset) -> Self {
        Self { preset }
    }

    pub fn preset(&self) -> GravityPreset {
        self.preset
    }

    pub fn gravity(&self) -> f64 {
        self.preset.gravity()
    }

    /// Split a launch into components; angle in degrees, 0 = right, 90 = up
    pub fn initial_velocity(&self, angle_deg: f64, speed: f64) -> DVec2 {
        let angle = deg_to_rad(angle_deg);
        DVec2::new(speed * angle.cos(), -speed * angle.sin())
    }

    #[inline]
    pub fn apply_gravity(&self, vy: f64, gravity: f64, dt: f64) -> f64 {
        vy + gravity * dt
    }

    #[inline]
    pub fn apply_wind(&self, vx: f64, wind: f64, dt: f64) -> f64 {
        vx + wind * dt
    }

    #[inline]
    pub fn update_position(&self, pos: DVec2, vel: DVec2, dt: f64) -> DVec2 {
        DVec2::new(pos.x + vel.x * dt, pos.y + vel.y * dt)
    }

    /// One integration step, returning the new (position, velocity)
    #[inline]
    pub fn step(
        &self,
        pos: DVec2,
        vel: DVec2,
        gravity: f64,
        wind: f64,
        dt: f64,
    ) -> (DVec2, DVec2) {
        let vel = DVec2::new(
            self.apply_wind(vel.x, wind, dt),
            self.apply_gravity(vel.y, gravity, dt),
        );
        (self.update_position(pos, vel, dt), vel)
    }

    /// Sample a full flight for preview
    ///
    /// Starts with `start`, then up to `MAX_TRAJECTORY_STEPS` steps. Stops after
    /// the first sample below y=1000 or outside x in [-500, 2000]; those limits
    /// are world-space preview bounds, not the live screen.
    pub fn predict_trajectory(
        &self,
        start: DVec2,
        angle_deg: f64,
        speed: f64,
        gravity: f64,
        wind: f64,
        dt: f64,
    ) -> Vec<TrajectoryPoint> {
        let mut pos = start;
        let mut vel = self.initial_velocity(angle_deg, speed);

        let mut trajectory = Vec::with_capacity(MAX_TRAJECTORY_STEPS + 1);
        trajectory.push(pos);

        for _ in 0..MAX_TRAJECTORY_STEPS {
            (pos, vel) = self.step(pos, vel, gravity, wind, dt);
            trajectory.push(pos);

            if pos.y > PREVIEW_MAX_Y || pos.x < PREVIEW_MIN_X || pos.x > PREVIEW_MAX_X {
                break;
            }
        }

        trajectory
    }

    /// First downward crossing of `ground_level`, linearly interpolated
    pub fn find_ground_impact(
        &self,
        trajectory: &[TrajectoryPoint],
        ground_level: f64,
    ) -> Option<GroundImpact> {
        for pair in trajectory.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            if prev.y <= ground_level && cur.y >= ground_level {
                let dy = cur.y - prev.y;
                let t = if dy == 0.0 { 0.0 } else { (ground_level - prev.y) / dy };
                return Some(GroundImpact::Crossing(DVec2::new(
                    prev.x + t * (cur.x - prev.x),
                    ground_level,
                )));
            }
        }
        trajectory.last().copied().map(GroundImpact::Fallback)
    }

    /// Earliest sample inside a building; ties go to the first building in the list
    pub fn check_building_collision(
        &self,
        trajectory: &[TrajectoryPoint],
        buildings: &[Building],
    ) -> Option<BuildingCollision> {
        trajectory.iter().enumerate().find_map(|(trajectory_index, point)| {
            buildings
                .iter()
                .position(|b| b.contains_point(point.x, point.y))
                .map(|building_index| BuildingCollision {
                    building_index,
                    point: *point,
                    trajectory_index,
                })
        })
    }

    pub fn create_projectile(&self, x: f64, y: f64, angle_deg: f64, speed: f64) -> Projectile {
        Projectile {
            pos: DVec2::new(x, y),
            vel: self.initial_velocity(angle_deg, speed),
            is_active: true,
            has_collided: false,
        }
    }

    /// Advance a live projectile one frame; inactive projectiles are left alone
    pub fn update(&self, projectile: &mut Projectile, dt: f64, gravity: f64, wind: f64) {
        if !projectile.is_active {
            return;
        }
        (projectile.pos, projectile.vel) =
            self.step(projectile.pos, projectile.vel, gravity, wind, dt);
    }

    /// Stop a projectile at its impact
    pub fn explode(&self, projectile: &mut Projectile) {
        projectile.is_active = false;
        projectile.has_collided = true;
    }
}
