//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies
//!
//! The host calls [`tick`] once per rendered frame with the elapsed
//! milliseconds, and forwards pointer events to [`state::GameState`].

pub mod collision;
pub mod flight;
pub mod level;
pub mod state;
pub mod tick;
pub mod wind;

pub use state::{
    ActiveEffects, Collectible, CollectibleKind, GameEvent, GamePhase, GameState, Glider, Hazard,
    HazardKind, Heart, Obstacle, PowerUpKind, WindZone,
};
pub use tick::tick;
pub use wind::WindController;
