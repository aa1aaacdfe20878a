//! Axis-aligned box bodies for arcade physics
//!
//! A body is a rectangle described by its center and size:
//! - pos: center in world pixels (y down)
//! - size: full width/height of the collision box
//! - bounce: fraction of speed kept when rebounding off a surface
//! - drag_x: horizontal deceleration (pixels/s²) applied every step

use glam::Vec2;

/// An axis-aligned rectangle (top-left + size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of size `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict intersection (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Which sides of a body touched something during the last step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub down: bool,
    pub up: bool,
    pub left: bool,
    pub right: bool,
}

/// A dynamic arcade body
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub bounce: f32,
    pub drag_x: f32,
    /// Clamp to the world rectangle
    pub collide_world_bounds: bool,
    /// Contact flags from the most recent step
    pub contacts: Contacts,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
            bounce: 0.0,
            drag_x: 0.0,
            collide_world_bounds: false,
            contacts: Contacts::default(),
        }
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_drag_x(mut self, drag_x: f32) -> Self {
        self.drag_x = drag_x;
        self
    }

    pub fn with_world_bounds(mut self) -> Self {
        self.collide_world_bounds = true;
        self
    }

    /// Current collision box
    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Resting on a supporting surface (platform or world floor)
    pub fn is_grounded(&self) -> bool {
        self.contacts.down
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }
}
