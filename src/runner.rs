//! Fixed timestep frame driver
//!
//! The host calls `frame` once per display refresh with the elapsed time.
//! Queued input is applied first, then the scene is ticked as many times as
//! the accumulated time allows.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::input::{InputEvent, InputState, SharedInputQueue};
use crate::scene::{SandbagScene, Scene};
use crate::sim::GameEvent;
use crate::tuning::Tuning;

/// Owns a scene plus everything needed to feed it input at a fixed rate
pub struct Runner<S: Scene> {
    pub scene: S,
    pub input: InputState,
    queue: SharedInputQueue,
    accumulator: f32,
    /// Total ticks run since the last restart
    pub ticks: u64,
}

impl Runner<SandbagScene> {
    /// Runner for the sandbag scene with the given tuning
    pub fn sandbag(tuning: Tuning) -> Self {
        let input = InputState::new(tuning.attack_window());
        Self::new(SandbagScene::new(tuning), input)
    }
}

impl<S: Scene> Runner<S> {
    /// Wrap a scene that has already been set up
    pub fn new(scene: S, input: InputState) -> Self {
        Self {
            scene,
            input,
            queue: SharedInputQueue::default(),
            accumulator: 0.0,
            ticks: 0,
        }
    }

    /// Queue an input event for the next frame
    pub fn push(&mut self, event: InputEvent) {
        self.queue.borrow_mut().push(event);
    }

    /// Handle for event handlers that must not borrow the runner
    pub fn queue(&self) -> SharedInputQueue {
        self.queue.clone()
    }

    /// Events waiting for the next frame
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Rebuild the scene and forget all input, including held buttons
    pub fn restart(&mut self) {
        self.scene.reset();
        self.input.reset();
        self.accumulator = 0.0;
        self.ticks = 0;
        log::info!("Scene restarted");
    }

    /// Apply pending input and run simulation ticks for `dt` seconds
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        let pending = self.queue.borrow_mut().drain();
        for event in pending {
            match event {
                InputEvent::Restart => self.restart(),
                other => self.input.apply(other),
            }
        }

        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.scene.tick(&mut self.input, SIM_DT, &mut events);
            self.accumulator -= SIM_DT;
            self.ticks += 1;
            substeps += 1;
        }

        events
    }
}
