//! Axis-aligned collision boxes
//!
//! Entities are stored bottom-anchored (`pos.y` is the distance from the
//! arena floor) but boxes are expressed in top-down screen space, the
//! same space the renderer lays sprites out in.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Collision rectangle in top-down screen coordinates (inclusive edges)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BoundingBox {
    /// Box of a sprite whose bottom-left corner sits at `pos`, shrunk by
    /// `margin` on every side.
    ///
    /// The shrink is a forgiveness margin: sprites may visibly touch by up
    /// to `2 * margin` before they count as colliding.
    pub fn of(pos: Vec2, size: Vec2, arena_height: f32, margin: f32) -> Self {
        let top = arena_height - pos.y - size.y;
        Self {
            left: pos.x + margin,
            right: pos.x + size.x - margin,
            top: top + margin,
            bottom: top + size.y - margin,
        }
    }
}

/// Check whether two boxes overlap on both axes
///
/// Touching edges count as a hit.
#[inline]
pub fn is_collision(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}
