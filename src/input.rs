//! Input aggregation
//!
//! Browser handlers never touch the scene. They push `InputEvent`s into an
//! `InputQueue`; the runner drains the queue into `InputState` once per frame,
//! and the scene reads a merged `Intents` snapshot each tick.
//!
//! Movement is level-triggered (held). Jump and attack are edge-triggered:
//! a press latches the intent until the scene consumes it or it expires.

use std::cell::RefCell;
use std::rc::Rc;

/// Keyboard keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(Key::Left),
            "ArrowRight" | "Right" => Some(Key::Right),
            "ArrowUp" | "Up" => Some(Key::Up),
            " " | "Spacebar" => Some(Key::Space),
            _ => None,
        }
    }
}

/// On-screen buttons for touch devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchButton {
    Left,
    Right,
    Jump,
    Attack,
}

impl TouchButton {
    pub const ALL: [TouchButton; 4] = [
        TouchButton::Left,
        TouchButton::Right,
        TouchButton::Jump,
        TouchButton::Attack,
    ];

    /// DOM id of the button element
    pub fn element_id(&self) -> &'static str {
        match self {
            TouchButton::Left => "btn-left",
            TouchButton::Right => "btn-right",
            TouchButton::Jump => "btn-jump",
            TouchButton::Attack => "btn-attack",
        }
    }

    /// Pointer events each button listens to
    pub const POINTER_EVENTS: [&'static str; 4] =
        ["pointerdown", "pointerup", "pointercancel", "pointerleave"];

    /// Translate a DOM pointer event on this button.
    /// A finger sliding off the button counts as a release.
    pub fn pointer_event(self, event_type: &str) -> Option<InputEvent> {
        match event_type {
            "pointerdown" => Some(InputEvent::ButtonDown(self)),
            "pointerup" | "pointercancel" => Some(InputEvent::ButtonUp(self)),
            "pointerleave" => Some(InputEvent::ButtonLeave(self)),
            _ => None,
        }
    }
}

/// Raw input events, in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer pressed on a touch button
    ButtonDown(TouchButton),
    /// Pointer released (or cancelled) on a touch button
    ButtonUp(TouchButton),
    /// Pointer slid off a touch button while pressed
    ButtonLeave(TouchButton),
    /// Window lost focus; key-ups will never arrive
    Blur,
    /// Reset button pressed (handled by the runner, not by `InputState`)
    Restart,
}

/// FIFO of input events.
/// Handlers push; the frame loop drains once per frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

/// Queue handle shared between DOM handlers and the frame loop
pub type SharedInputQueue = Rc<RefCell<InputQueue>>;

/// Logical intents for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub attack: bool,
}

/// Held state of the four controls from one source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Controls {
    left: bool,
    right: bool,
    jump: bool,
    attack: bool,
}

/// Merged keyboard + touch state with edge latches
#[derive(Debug, Clone)]
pub struct InputState {
    keys: Controls,
    buttons: Controls,
    jump_latched: bool,
    /// Ticks the attack stays armed (0 = not armed)
    attack_ticks_left: u32,
    attack_window: u32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl InputState {
    /// `attack_window` is how many ticks an unconsumed attack press stays armed
    pub fn new(attack_window: u32) -> Self {
        Self {
            keys: Controls::default(),
            buttons: Controls::default(),
            jump_latched: false,
            attack_ticks_left: 0,
            attack_window: attack_window.max(1),
        }
    }

    /// Apply one raw event
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                let pressed = !self.key_held(key);
                self.set_key(key, true);
                if pressed {
                    self.latch(key == Key::Up, key == Key::Space);
                }
            }
            InputEvent::KeyUp(key) => self.set_key(key, false),
            InputEvent::ButtonDown(button) => {
                let pressed = !self.button_held(button);
                self.set_button(button, true);
                if pressed {
                    self.latch(button == TouchButton::Jump, button == TouchButton::Attack);
                }
            }
            InputEvent::ButtonUp(button) | InputEvent::ButtonLeave(button) => {
                self.set_button(button, false);
            }
            InputEvent::Blur => self.release_all(),
            InputEvent::Restart => {}
        }
    }

    /// Current intents (keyboard OR touch)
    pub fn intents(&self) -> Intents {
        Intents {
            move_left: self.keys.left || self.buttons.left,
            move_right: self.keys.right || self.buttons.right,
            jump: self.jump_latched,
            attack: self.attack_ticks_left > 0,
        }
    }

    pub fn consume_jump(&mut self) {
        self.jump_latched = false;
    }

    pub fn consume_attack(&mut self) {
        self.attack_ticks_left = 0;
    }

    /// Per-tick housekeeping: drop the jump edge, age the attack latch
    pub fn end_tick(&mut self) {
        self.jump_latched = false;
        self.attack_ticks_left = self.attack_ticks_left.saturating_sub(1);
    }

    /// Forget every held control (latches survive)
    pub fn release_all(&mut self) {
        self.keys = Controls::default();
        self.buttons = Controls::default();
    }

    /// Clear everything, including latches and held touch buttons
    pub fn reset(&mut self) {
        self.release_all();
        self.jump_latched = false;
        self.attack_ticks_left = 0;
    }

    fn latch(&mut self, jump: bool, attack: bool) {
        if jump {
            self.jump_latched = true;
        }
        if attack {
            self.attack_ticks_left = self.attack_window;
        }
    }

    fn key_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.keys.left,
            Key::Right => self.keys.right,
            Key::Up => self.keys.jump,
            Key::Space => self.keys.attack,
        }
    }

    fn set_key(&mut self, key: Key, held: bool) {
        match key {
            Key::Left => self.keys.left = held,
            Key::Right => self.keys.right = held,
            Key::Up => self.keys.jump = held,
            Key::Space => self.keys.attack = held,
        }
    }

    fn button_held(&self, button: TouchButton) -> bool {
        match button {
            TouchButton::Left => self.buttons.left,
            TouchButton::Right => self.buttons.right,
            TouchButton::Jump => self.buttons.jump,
            TouchButton::Attack => self.buttons.attack,
        }
    }

    fn set_button(&mut self, button: TouchButton, held: bool) {
        match button {
            TouchButton::Left => self.buttons.left = held,
            TouchButton::Right => self.buttons.right = held,
            TouchButton::Jump => self.buttons.jump = held,
            TouchButton::Attack => self.buttons.attack = held,
        }
    }
}
