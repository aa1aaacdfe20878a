//! Arcade physics step and overlap queries
//!
//! Gravity, horizontal drag, semi-implicit Euler
//! integration, separation from static platforms and world bounds clamping.
//! Bodies never rotate and never push each other.

use glam::Vec2;

use super::body::{Body, Rect};

/// Rebounds slower than this (pixels/s) are zeroed so bodies come to rest
pub const MIN_REBOUND_SPEED: f32 = 10.0;

/// Global physics settings
#[derive(Debug, Clone)]
pub struct ArcadeWorld {
    /// World rectangle bodies are clamped to
    pub bounds: Rect,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
}

impl ArcadeWorld {
    pub fn new(width: f32, height: f32, gravity: f32) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            gravity,
        }
    }

    /// Advance one body by `dt`, colliding it with static platforms and the world
    pub fn step(&self, body: &mut Body, platforms: &[Rect], dt: f32) {
        body.contacts = Default::default();

        body.vel.y += self.gravity * dt;
        body.vel.x = apply_drag(body.vel.x, body.drag_x, dt);
        body.pos += body.vel * dt;

        for platform in platforms {
            separate_from_static(body, platform);
        }

        if body.collide_world_bounds {
            self.clamp_to_bounds(body);
        }
    }

    /// Non-blocking intersection test between two bodies
    pub fn overlaps(a: &Body, b: &Body) -> bool {
        a.bounds().intersects(&b.bounds())
    }

    fn clamp_to_bounds(&self, body: &mut Body) {
        let half = body.half_size();
        let b = &self.bounds;

        if body.pos.x - half.x < b.left() {
            body.pos.x = b.left() + half.x;
            if body.vel.x < 0.0 {
                body.vel.x = rebound(body.vel.x, body.bounce);
            }
            body.contacts.left = true;
        } else if body.pos.x + half.x > b.right() {
            body.pos.x = b.right() - half.x;
            if body.vel.x > 0.0 {
                body.vel.x = rebound(body.vel.x, body.bounce);
            }
            body.contacts.right = true;
        }

        if body.pos.y - half.y < b.top() {
            body.pos.y = b.top() + half.y;
            if body.vel.y < 0.0 {
                body.vel.y = rebound(body.vel.y, body.bounce);
            }
            body.contacts.up = true;
        } else if body.pos.y + half.y > b.bottom() {
            body.pos.y = b.bottom() - half.y;
            if body.vel.y > 0.0 {
                body.vel.y = rebound(body.vel.y, body.bounce);
            }
            body.contacts.down = true;
        }
    }
}

/// Linear deceleration toward zero, never overshooting
fn apply_drag(vx: f32, drag: f32, dt: f32) -> f32 {
    if drag <= 0.0 {
        return vx;
    }
    let dv = drag * dt;
    if vx - dv > 0.0 {
        vx - dv
    } else if vx + dv < 0.0 {
        vx + dv
    } else {
        0.0
    }
}

/// Reflect a velocity component, keeping `bounce` of its magnitude
fn rebound(v: f32, bounce: f32) -> f32 {
    let r = -v * bounce;
    if r.abs() < MIN_REBOUND_SPEED { 0.0 } else { r }
}

/// Push a body out of a static rectangle along the axis of least penetration
///
/// Returns true if the body was touching the platform.
fn separate_from_static(body: &mut Body, platform: &Rect) -> bool {
    let bounds = body.bounds();
    if !bounds.intersects(platform) {
        return false;
    }

    let overlap = Vec2::new(
        (bounds.right().min(platform.right()) - bounds.left().max(platform.left())).max(0.0),
        (bounds.bottom().min(platform.bottom()) - bounds.top().max(platform.top())).max(0.0),
    );
    let half = body.half_size();
    let center = platform.center();

    if overlap.y <= overlap.x {
        if body.pos.y < center.y {
            // Landed on top
            body.pos.y = platform.top() - half.y;
            if body.vel.y > 0.0 {
                body.vel.y = rebound(body.vel.y, body.bounce);
            }
            body.contacts.down = true;
        } else {
            body.pos.y = platform.bottom() + half.y;
            if body.vel.y < 0.0 {
                body.vel.y = rebound(body.vel.y, body.bounce);
            }
            body.contacts.up = true;
        }
    } else if body.pos.x < center.x {
        body.pos.x = platform.left() - half.x;
        if body.vel.x > 0.0 {
            body.vel.x = rebound(body.vel.x, body.bounce);
        }
        body.contacts.right = true;
    } else {
        body.pos.x = platform.right() + half.x;
        if body.vel.x < 0.0 {
            body.vel.x = rebound(body.vel.x, body.bounce);
        }
        body.contacts.left = true;
    }

    true
}
