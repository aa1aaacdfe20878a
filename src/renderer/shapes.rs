//! Shape generation for 2D primitives
//!
//! Everything is drawn straight from physics bodies each frame, so visuals
//! can never drift from their collision boxes.

use super::vertex::{Vertex, colors};
use crate::sim::{Rect, SceneState};

/// Two triangles covering `rect`
pub fn rect(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// All vertices for one frame, back to front, in world pixels
pub fn scene_vertices(state: &SceneState) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((state.platforms.len() + 2) * 6);

    for platform in &state.platforms {
        vertices.extend_from_slice(&rect(platform, colors::PLATFORM));
    }
    vertices.extend_from_slice(&rect(&state.sandbag.bounds(), colors::SANDBAG));
    vertices.extend_from_slice(&rect(&state.player.bounds(), colors::PLAYER));

    vertices
}
