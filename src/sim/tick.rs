//! Fixed timestep simulation tick
//!
//! Drives the player from intents, steps physics, and resolves the punch.

use super::state::{GameEvent, SandbagPhase, SceneState, launch_distance};
use crate::consts::SETTLE_SPEED;
use crate::input::InputState;
use crate::tuning::Tuning;
use crate::vec2;

/// Advance the scene by one fixed timestep
///
/// Reads intents from `input` and clears the edges it consumes. Anything
/// worth reporting is appended to `events`.
pub fn tick(
    state: &mut SceneState,
    input: &mut InputState,
    tuning: &Tuning,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    let intents = input.intents();
    state.time_ticks += 1;

    // Left wins when both directions are held
    state.player.vel.x = if intents.move_left {
        -tuning.walk_speed
    } else if intents.move_right {
        tuning.walk_speed
    } else {
        0.0
    };

    // Grounded comes from the previous step's contacts
    if intents.jump && state.player.is_grounded() {
        state.player.vel.y = -tuning.jump_speed;
        events.push(GameEvent::Jumped);
        log::debug!("Jump at x={:.1}", state.player.pos.x);
    }
    input.consume_jump();

    state.world.step(&mut state.player, &state.platforms, dt);
    state.world.step(&mut state.sandbag, &state.platforms, dt);

    if intents.attack && state.player_overlaps_sandbag() {
        if let Some(origin_x) = state.launch_sandbag(vec2(tuning.launch_velocity)) {
            input.consume_attack();
            events.push(GameEvent::Launched { origin_x });
            log::info!("Attack! Sandbag launched from x={:.1}", origin_x);
        }
    }

    update_settled(state, tuning, events);

    input.end_tick();
}

/// Flag the launched sandbag as settled the first tick it rests on the ground
fn update_settled(state: &mut SceneState, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let SandbagPhase::Launched { origin_x, settled } = state.sandbag_phase else {
        return;
    };
    if settled {
        return;
    }

    let sandbag = &state.sandbag;
    // A fresh launch has full speed, so this never fires on the punch tick
    if sandbag.vel.x.abs() < SETTLE_SPEED && sandbag.is_grounded() {
        let distance = launch_distance(sandbag.pos.x, origin_x, tuning.pixels_per_unit);
        state.sandbag_phase = SandbagPhase::Launched {
            origin_x,
            settled: true,
        };
        events.push(GameEvent::Settled { distance });
        log::info!("Sandbag settled at {:.1} {}", distance, tuning.readout_unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::input::{InputEvent, Key, TouchButton};
    use glam::Vec2;

    fn is_at_rest(vel: Vec2) -> bool {
        vel.x.abs() < SETTLE_SPEED && vel.y == 0.0
    }

    struct Harness {
        state: SceneState,
        input: InputState,
        tuning: Tuning,
        events: Vec<GameEvent>,
    }

    impl Harness {
        fn new() -> Self {
            let tuning = Tuning::default();
            Self {
                state: SceneState::new(&tuning),
                input: InputState::new(tuning.attack_window()),
                tuning,
                events: Vec::new(),
            }
        }

        /// Scene after both bodies have dropped onto the ground and stopped
        fn settled() -> Self {
            let mut h = Self::new();
            h.run(120);
            assert!(h.state.player.is_grounded());
            assert!(h.state.sandbag.is_grounded());
            assert!(is_at_rest(h.state.sandbag.vel));
            h.events.clear();
            h
        }

        fn step(&mut self) {
            tick(
                &mut self.state,
                &mut self.input,
                &self.tuning,
                SIM_DT,
                &mut self.events,
            );
        }

        fn run(&mut self, ticks: usize) {
            for _ in 0..ticks {
                self.step();
            }
        }

        fn press(&mut self, event: InputEvent) {
            self.input.apply(event);
        }

        /// Put the player right next to the sandbag, overlapping it
        fn move_player_into_sandbag(&mut self) {
            self.state.player.pos.x = self.state.sandbag.pos.x - 30.0;
        }

        fn launches(&self) -> usize {
            self.events
                .iter()
                .filter(|e| matches!(e, GameEvent::Launched { .. }))
                .count()
        }
    }

    #[test]
    fn test_idle_scene_comes_to_rest() {
        let h = Harness::settled();
        assert_eq!(h.state.player.bounds().bottom(), 560.0);
        assert_eq!(h.state.sandbag.bounds().bottom(), 560.0);
        assert_eq!(h.state.player.pos.x, 100.0);
        assert_eq!(h.state.sandbag.pos.x, 300.0);
        assert!(!h.state.is_hit());
    }

    #[test]
    fn test_walk_right_moves_by_speed_times_dt() {
        let mut h = Harness::settled();
        h.press(InputEvent::KeyDown(Key::Right));

        let mut last_x = h.state.player.pos.x;
        for _ in 0..30 {
            h.step();
            let x = h.state.player.pos.x;
            assert!((x - last_x - 200.0 * SIM_DT).abs() < 1e-3);
            last_x = x;
        }
    }

    #[test]
    fn test_walk_stops_at_world_bound() {
        let mut h = Harness::settled();
        h.press(InputEvent::ButtonDown(TouchButton::Right));
        h.run(300);
        assert_eq!(h.state.player.pos.x, 784.0);
        assert!(h.state.player.contacts.right);
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut h = Harness::settled();
        h.press(InputEvent::KeyDown(Key::Right));
        h.press(InputEvent::ButtonDown(TouchButton::Left));
        h.step();
        assert_eq!(h.state.player.vel.x, -200.0);
    }

    #[test]
    fn test_release_stops_player() {
        let mut h = Harness::settled();
        h.press(InputEvent::ButtonDown(TouchButton::Left));
        h.step();
        h.press(InputEvent::ButtonLeave(TouchButton::Left));
        h.step();
        assert_eq!(h.state.player.vel.x, 0.0);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut h = Harness::settled();
        h.press(InputEvent::KeyDown(Key::Up));
        h.step();

        let expected = -350.0 + 500.0 * SIM_DT;
        assert!((h.state.player.vel.y - expected).abs() < 1e-3);
        assert!(!h.state.player.is_grounded());
        assert!(!h.input.intents().jump);
        assert_eq!(h.events, vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_no_double_jump() {
        let mut h = Harness::settled();
        h.press(InputEvent::KeyDown(Key::Up));
        h.step();
        h.press(InputEvent::KeyUp(Key::Up));
        h.step();

        let vy_before = h.state.player.vel.y;
        h.press(InputEvent::KeyDown(Key::Up));
        assert!(h.input.intents().jump);
        h.step();

        // Only gravity acted; the airborne press was dropped
        assert!((h.state.player.vel.y - (vy_before + 500.0 * SIM_DT)).abs() < 1e-3);
        assert!(!h.input.intents().jump);
        assert_eq!(h.events, vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_held_jump_does_not_bounce_again() {
        let mut h = Harness::settled();
        h.press(InputEvent::KeyDown(Key::Up));
        h.run(180);
        assert!(h.state.player.is_grounded());
        let jumps = h.events.iter().filter(|e| **e == GameEvent::Jumped).count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_readout_zero_before_hit() {
        let mut h = Harness::settled();
        h.press(InputEvent::KeyDown(Key::Right));
        for _ in 0..90 {
            h.step();
            assert_eq!(h.state.distance(h.tuning.pixels_per_unit), None);
        }
    }

    #[test]
    fn test_walking_into_sandbag_without_attack_does_nothing() {
        let mut h = Harness::settled();
        h.move_player_into_sandbag();
        h.run(10);
        assert!(h.state.player_overlaps_sandbag());
        assert!(!h.state.is_hit());
        assert!(is_at_rest(h.state.sandbag.vel));
    }

    #[test]
    fn test_attack_launches_sandbag() {
        let mut h = Harness::settled();
        h.move_player_into_sandbag();
        h.press(InputEvent::KeyDown(Key::Space));
        h.step();

        assert_eq!(h.state.sandbag.vel, Vec2::new(800.0, -300.0));
        assert_eq!(h.state.origin_x(), Some(h.state.sandbag.pos.x));
        assert_eq!(h.state.origin_x(), Some(300.0));
        assert!(!h.input.intents().attack);
        assert_eq!(h.launches(), 1);
    }

    #[test]
    fn test_attack_from_touch_button() {
        let mut h = Harness::settled();
        h.move_player_into_sandbag();
        h.press(InputEvent::ButtonDown(TouchButton::Attack));
        h.step();
        assert!(h.state.is_hit());
    }

    #[test]
    fn test_sandbag_flies_away_from_origin() {
        let mut h = Harness::settled();
        h.move_player_into_sandbag();
        h.press(InputEvent::KeyDown(Key::Space));
        h.step();
        let origin_x = h.state.origin_x().unwrap();

        let mut last = 0.0;
        for _ in 0..30 {
            h.step();
            let distance = h.state.distance(10.0).unwrap();
            assert!(distance > last);
            assert_eq!(distance, launch_distance(h.state.sandbag.pos.x, origin_x, 10.0));
            last = distance;
        }
        // Drag bleeds horizontal speed
        assert!(h.state.sandbag.vel.x < 800.0);
    }

    #[test]
    fn test_repeat_attack_is_idempotent() {
        let mut h = Harness::settled();
        h.move_player_into_sandbag();
        h.press(InputEvent::KeyDown(Key::Space));
        h.step();
        let origin_x = h.state.origin_x();

        h.press(InputEvent::KeyUp(Key::Space));
        for _ in 0..20 {
            // Keep the player glued to the bag and keep punching
            h.state.player.pos = h.state.sandbag.pos;
            h.press(InputEvent::KeyDown(Key::Space));
            h.step();
            h.press(InputEvent::KeyUp(Key::Space));

            assert!(h.state.player_overlaps_sandbag());
            assert_ne!(h.state.sandbag.vel, Vec2::new(800.0, -300.0));
            assert_eq!(h.state.origin_x(), origin_x);
        }
        assert_eq!(h.launches(), 1);
    }

    #[test]
    fn test_buffered_attack_lands_within_window() {
        let mut h = Harness::settled();
        h.press(InputEvent::KeyDown(Key::Space));
        h.run(2);
        assert!(!h.state.is_hit());

        h.move_player_into_sandbag();
        h.step();
        assert!(h.state.is_hit());
    }

    #[test]
    fn test_stale_attack_does_not_fire_late() {
        let mut h = Harness::settled();
        h.press(InputEvent::KeyDown(Key::Space));
        h.run(10);
        assert!(!h.input.intents().attack);

        h.move_player_into_sandbag();
        h.run(5);
        assert!(!h.state.is_hit());
    }

    #[test]
    fn test_sandbag_eventually_settles_once() {
        let mut h = Harness::settled();
        h.move_player_into_sandbag();
        h.press(InputEvent::KeyDown(Key::Space));
        h.step();

        // Drag of 50 px/s² needs 16 s to cancel 800 px/s
        h.run(60 * 20);

        assert!(h.state.is_settled());
        let settles: Vec<_> = h
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Settled { distance } => Some(*distance),
                _ => None,
            })
            .collect();
        assert_eq!(settles.len(), 1);
        assert!(settles[0] > 0.0);
    }

    #[test]
    fn test_cloned_state_replays_identically() {
        let mut a = Harness::settled();
        a.move_player_into_sandbag();
        let mut b = Harness {
            state: a.state.clone(),
            input: InputState::new(a.tuning.attack_window()),
            tuning: a.tuning.clone(),
            events: Vec::new(),
        };

        for h in [&mut a, &mut b] {
            h.press(InputEvent::KeyDown(Key::Space));
            h.run(240);
        }

        assert_eq!(a.state.sandbag.pos, b.state.sandbag.pos);
        assert_eq!(a.state.sandbag_phase, b.state.sandbag_phase);
        assert_eq!(a.events, b.events);
    }
}
