//! Scene state and core simulation types
//!
//! Everything the encounter needs lives in `SceneState`; nothing is global.

use glam::Vec2;

use super::body::{Body, Rect};
use super::world::ArcadeWorld;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::vec2;

/// Lifecycle of the sandbag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SandbagPhase {
    /// Standing where it spawned, waiting for a punch
    Resting,
    /// Punched; `origin_x` is the sandbag's x at the instant of the hit
    Launched { origin_x: f32, settled: bool },
}

/// Notable things that happened during a tick (for logging and HUD)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player left the ground
    Jumped,
    /// Sandbag was punched at `origin_x`
    Launched { origin_x: f32 },
    /// Launched sandbag came to rest `distance` units away
    Settled { distance: f32 },
}

/// Distance in display units between `x` and `origin_x`
#[inline]
pub fn launch_distance(x: f32, origin_x: f32, pixels_per_unit: f32) -> f32 {
    (x - origin_x).abs() / pixels_per_unit
}

/// Complete scene state (deterministic, cloneable)
#[derive(Debug, Clone)]
pub struct SceneState {
    /// Physics settings and world bounds
    pub world: ArcadeWorld,
    /// Static colliders (the ground)
    pub platforms: Vec<Rect>,
    pub player: Body,
    pub sandbag: Body,
    pub sandbag_phase: SandbagPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SceneState {
    /// Build the scene at its initial coordinates
    pub fn new(tuning: &Tuning) -> Self {
        let ground = Rect::new(
            0.0,
            WORLD_HEIGHT - PLATFORM_HEIGHT,
            WORLD_WIDTH,
            PLATFORM_HEIGHT,
        );

        let player = Body::new(vec2(PLAYER_SPAWN), vec2(PLAYER_SIZE)).with_world_bounds();

        let sandbag = Body::new(vec2(SANDBAG_SPAWN), vec2(SANDBAG_SIZE))
            .with_bounce(tuning.sandbag_bounce)
            .with_drag_x(tuning.sandbag_drag_x)
            .with_world_bounds();

        Self {
            world: ArcadeWorld::new(WORLD_WIDTH, WORLD_HEIGHT, tuning.gravity),
            platforms: vec![ground],
            player,
            sandbag,
            sandbag_phase: SandbagPhase::Resting,
            time_ticks: 0,
        }
    }

    /// Whether the sandbag has been punched since the last reset
    pub fn is_hit(&self) -> bool {
        matches!(self.sandbag_phase, SandbagPhase::Launched { .. })
    }

    /// X coordinate captured at the moment of the hit
    pub fn origin_x(&self) -> Option<f32> {
        match self.sandbag_phase {
            SandbagPhase::Launched { origin_x, .. } => Some(origin_x),
            SandbagPhase::Resting => None,
        }
    }

    /// Launched sandbag has come to rest
    pub fn is_settled(&self) -> bool {
        matches!(
            self.sandbag_phase,
            SandbagPhase::Launched { settled: true, .. }
        )
    }

    /// Current launch distance in display units (None before the hit)
    pub fn distance(&self, pixels_per_unit: f32) -> Option<f32> {
        self.origin_x()
            .map(|origin_x| launch_distance(self.sandbag.pos.x, origin_x, pixels_per_unit))
    }

    /// Player and sandbag collision boxes intersect
    pub fn player_overlaps_sandbag(&self) -> bool {
        ArcadeWorld::overlaps(&self.player, &self.sandbag)
    }

    /// Punch the sandbag: set its velocity and record where it was hit
    ///
    /// Returns the origin if this call performed the transition.
    pub fn launch_sandbag(&mut self, velocity: Vec2) -> Option<f32> {
        if self.is_hit() {
            return None;
        }
        let origin_x = self.sandbag.pos.x;
        self.sandbag.vel = velocity;
        self.sandbag_phase = SandbagPhase::Launched {
            origin_x,
            settled: false,
        };
        Some(origin_x)
    }
}
