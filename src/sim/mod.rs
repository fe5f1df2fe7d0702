//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Randomness through an injectable [`RandomSource`]; a seed string makes
//!   every draw reproducible
//! - No rendering, audio or platform dependencies

pub mod building;
pub mod city;
pub mod gorilla;
pub mod gorilla_manager;
pub mod height;
pub mod manager;
pub mod physics;
pub mod scaler;
pub mod seed;
pub mod state;
pub mod tick;

pub use building::{Building, BuildingBounds, BuildingRenderData, BuildingStyle, Crater};
pub use city::{BUILDING_PALETTE, CityGenerator};
pub use gorilla::{AnimationState, Gorilla, GorillaBounds, GorillaRenderData};
pub use gorilla_manager::GorillaManager;
pub use height::HeightCalculator;
pub use manager::GameStateManager;
pub use physics::{
    BuildingCollision, GravityPreset, GroundImpact, Projectile, ProjectilePhysics, TrajectoryPoint,
};
pub use scaler::{BuildingSlot, ResponsiveScaler};
pub use seed::{PcgSource, RandomSource, ScriptedSource, SeededHash};
pub use state::{GameEvent, GameState, HitOutcome, MatchScore};
pub use tick::{ActiveShot, Duel, ScreenBounds, TickInput, tick};
