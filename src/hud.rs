//! Heads-up display text
//!
//! Pure formatting so the DOM glue in `main.rs` stays trivial.

use crate::scene::SandbagScene;

/// Distance readout: a bare zero before the hit, one decimal place after
pub fn format_readout(label: &str, unit: &str, distance: Option<f32>) -> String {
    match distance {
        Some(d) => format!("{}: {:.1} {}", label, d, unit),
        None => format!("{}: 0 {}", label, unit),
    }
}

/// Readout for the scene's current state
pub fn readout(scene: &SandbagScene) -> String {
    format_readout(
        &scene.tuning.readout_label,
        &scene.tuning.readout_unit,
        scene.distance(),
    )
}

/// CSS class for the readout element (highlighted once the bag settles)
pub fn readout_class(scene: &SandbagScene) -> &'static str {
    if scene.state.is_settled() {
        "readout final"
    } else {
        "readout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::launch_distance;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_zero_before_hit() {
        assert_eq!(format_readout("Distance", "m", None), "Distance: 0 m");
    }

    #[test]
    fn test_one_decimal_after_hit() {
        assert_eq!(format_readout("Distance", "m", Some(12.34)), "Distance: 12.3 m");
        assert_eq!(format_readout("Distance", "m", Some(0.0)), "Distance: 0.0 m");
    }

    #[test]
    fn test_scene_readout() {
        let mut scene = SandbagScene::new(Tuning::default());
        assert_eq!(readout(&scene), "Distance: 0 m");
        assert_eq!(readout_class(&scene), "readout");

        scene.state.launch_sandbag(Vec2::ZERO);
        scene.state.sandbag.pos.x = 425.0;
        assert_eq!(readout(&scene), "Distance: 12.5 m");
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric_and_non_negative(
            origin in 0.0f32..800.0,
            offset in 0.0f32..800.0,
        ) {
            let ahead = launch_distance(origin + offset, origin, 10.0);
            let behind = launch_distance(origin - offset, origin, 10.0);
            prop_assert!(ahead >= 0.0);
            prop_assert!((ahead - behind).abs() < 1e-3);
            prop_assert!((ahead - offset / 10.0).abs() < 1e-3);
        }
    }
}
