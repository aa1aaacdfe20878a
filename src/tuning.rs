//! Data-driven gameplay tuning
//!
//! Defaults reproduce the classic feel. The host page may override any
//! subset of fields with a JSON object in `<script id="tuning">`.

use serde::{Deserialize, Serialize};

/// Gameplay constants that are safe to tweak without touching code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Physics ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,

    // === Player ===
    /// Horizontal walk speed (pixels/s)
    pub walk_speed: f32,
    /// Upward jump impulse (pixels/s, applied as negative vy)
    pub jump_speed: f32,

    // === Sandbag ===
    /// Velocity given to the sandbag by a punch (pixels/s, y down)
    pub launch_velocity: (f32, f32),
    pub sandbag_bounce: f32,
    /// Horizontal drag (pixels/s²)
    pub sandbag_drag_x: f32,

    // === Attack ===
    /// Ticks an unconsumed attack press stays armed
    pub attack_buffer_ticks: u32,

    // === Readout ===
    /// World pixels per displayed distance unit
    pub pixels_per_unit: f32,
    pub readout_label: String,
    pub readout_unit: String,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 500.0,

            walk_speed: 200.0,
            jump_speed: 350.0,

            launch_velocity: (800.0, -300.0),
            sandbag_bounce: 0.3,
            sandbag_drag_x: 50.0,

            attack_buffer_ticks: 6,

            pixels_per_unit: 10.0,
            readout_label: "Distance".to_string(),
            readout_unit: "m".to_string(),
        }
    }
}

impl Tuning {
    /// DOM element holding the JSON overrides
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "tuning";

    /// Parse a (possibly partial) JSON override on top of the defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        tuning.sanitize();
        Ok(tuning)
    }

    /// Attack presses are always armed for at least the tick they land in
    pub fn attack_window(&self) -> u32 {
        self.attack_buffer_ticks.max(1)
    }

    fn sanitize(&mut self) {
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            log::warn!(
                "Invalid pixels_per_unit {}, using default",
                self.pixels_per_unit
            );
            self.pixels_per_unit = Self::default().pixels_per_unit;
        }
        self.sandbag_bounce = self.sandbag_bounce.clamp(0.0, 1.0);
        self.sandbag_drag_x = self.sandbag_drag_x.max(0.0);
    }

    /// Load tuning from the host page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides from page");
                    return tuning;
                }
                Err(e) => log::warn!("Ignoring invalid tuning JSON: {}", e),
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = Tuning::default();
        assert_eq!(t.walk_speed, 200.0);
        assert_eq!(t.jump_speed, 350.0);
        assert_eq!(t.launch_velocity, (800.0, -300.0));
        assert_eq!(t.pixels_per_unit, 10.0);
    }

    #[test]
    fn test_native_load_uses_defaults() {
        assert_eq!(Tuning::load(), Tuning::default());
    }

    #[test]
    fn test_partial_override() {
        let t = Tuning::from_json(r#"{ "gravity": 900.0, "readout_unit": "ft" }"#).unwrap();
        assert_eq!(t.gravity, 900.0);
        assert_eq!(t.readout_unit, "ft");
        assert_eq!(t.walk_speed, Tuning::default().walk_speed);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Tuning::from_json("{}").unwrap(), Tuning::default());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Tuning::from_json("{ gravity: ").is_err());
    }

    #[test]
    fn test_sanitize_bad_values() {
        let t = Tuning::from_json(r#"{ "pixels_per_unit": 0.0, "sandbag_bounce": 4.0 }"#).unwrap();
        assert_eq!(t.pixels_per_unit, 10.0);
        assert_eq!(t.sandbag_bounce, 1.0);
    }

    #[test]
    fn test_attack_window_never_zero() {
        let t = Tuning {
            attack_buffer_ticks: 0,
            ..Default::default()
        };
        assert_eq!(t.attack_window(), 1);
    }
}
