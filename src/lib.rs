//! Sandbag Punch - walk, jump and punch a sandbag as far as it will fly
//!
//! Core modules:
//! - `sim`: Arcade physics and the player/sandbag encounter (pure, deterministic)
//! - `input`: Keyboard + touch button aggregation into per-tick intents
//! - `scene`: Scene lifecycle (setup, tick, reset)
//! - `runner`: Fixed timestep frame driver around a scene
//! - `renderer`: WebGPU rendering pipeline
//! - `tuning`: Data-driven gameplay constants
//! - `hud`: Distance readout text

pub mod hud;
pub mod input;
pub mod renderer;
pub mod runner;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use input::{InputEvent, InputQueue, InputState, Intents};
pub use runner::Runner;
pub use scene::{SandbagScene, Scene};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches display refresh)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World dimensions (pixels, y down)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Ground strip along the bottom of the world
    pub const PLATFORM_HEIGHT: f32 = 40.0;

    /// Player collision box and spawn point (center)
    pub const PLAYER_SIZE: (f32, f32) = (32.0, 64.0);
    pub const PLAYER_SPAWN: (f32, f32) = (100.0, WORLD_HEIGHT - 100.0);

    /// Sandbag collision box and spawn point (center)
    pub const SANDBAG_SIZE: (f32, f32) = (50.0, 80.0);
    pub const SANDBAG_SPAWN: (f32, f32) = (300.0, WORLD_HEIGHT - 100.0);

    /// Horizontal speed under which a launched sandbag counts as settled
    pub const SETTLE_SPEED: f32 = 1.0;
}

/// Build a `Vec2` from a `(x, y)` constant
#[inline]
pub fn vec2(xy: (f32, f32)) -> Vec2 {
    Vec2::new(xy.0, xy.1)
}
