//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No rendering or platform dependencies
//! - Mutated only through `tick`

pub mod body;
pub mod state;
pub mod tick;
pub mod world;

pub use body::{Body, Contacts, Rect};
pub use state::{GameEvent, SandbagPhase, SceneState, launch_distance};
pub use tick::tick;
pub use world::ArcadeWorld;
