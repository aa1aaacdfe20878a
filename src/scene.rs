//! Scene lifecycle
//!
//! A scene is set up once, ticked at a fixed rate, and reset on demand.
//! The runner owns the scene and calls these hooks; nothing else does.

use crate::input::InputState;
use crate::sim::{GameEvent, SceneState, tick};
use crate::tuning::Tuning;

/// Lifecycle hooks invoked by the frame runner.
/// Constructors hand over a scene that is already set up.
pub trait Scene {
    /// Build all entities at their initial coordinates
    fn setup(&mut self);

    /// Advance one fixed timestep
    fn tick(&mut self, input: &mut InputState, dt: f32, events: &mut Vec<GameEvent>);

    /// Tear down and rebuild the scene
    fn reset(&mut self) {
        self.setup();
    }
}

/// The punch-the-sandbag scene
#[derive(Debug, Clone)]
pub struct SandbagScene {
    pub tuning: Tuning,
    pub state: SceneState,
}

impl SandbagScene {
    pub fn new(tuning: Tuning) -> Self {
        let state = SceneState::new(&tuning);
        Self { tuning, state }
    }

    /// Current distance readout value (None before the hit)
    pub fn distance(&self) -> Option<f32> {
        self.state.distance(self.tuning.pixels_per_unit)
    }
}

impl Scene for SandbagScene {
    fn setup(&mut self) {
        self.state = SceneState::new(&self.tuning);
    }

    fn tick(&mut self, input: &mut InputState, dt: f32, events: &mut Vec<GameEvent>) {
        tick(&mut self.state, input, &self.tuning, dt, events);
    }
}
