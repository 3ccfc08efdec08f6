//! Axis-aligned collision boxes.

use serde::{Deserialize, Serialize};

use crate::components::Transform;
use crate::types::Vector2;

/// Bounding rectangle in play-field space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn center(&self) -> Vector2 {
        Vector2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Strict overlap: rectangles that only touch along an edge do not
    /// overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

/// Hit box tagged friendly (player side) or hostile.
///
/// The box is centred on the entity's sprite, a fixed offset from its
/// Transform position, so it moves rigidly with the entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionBox {
    pub width: f32,
    pub height: f32,
    pub is_friendly: bool,
    /// Transform position to visual centre.
    offset: Vector2,
}

impl CollisionBox {
    /// Box of `size` centred on a sprite of `sprite_size` whose top-left
    /// corner sits at the Transform position.
    pub fn for_sprite(sprite_size: (f32, f32), size: (f32, f32), is_friendly: bool) -> Self {
        Self {
            width: size.0,
            height: size.1,
            is_friendly,
            offset: Vector2::new(sprite_size.0 * 0.5, sprite_size.1 * 0.5),
        }
    }

    pub fn offset(&self) -> Vector2 {
        self.offset
    }

    pub fn center(&self, transform: &Transform) -> Vector2 {
        transform.position + self.offset
    }

    pub fn bounds(&self, transform: &Transform) -> Bounds {
        let center = self.center(transform);
        let half_w = self.width * 0.5;
        let half_h = self.height * 0.5;
        Bounds {
            left: center.x - half_w,
            top: center.y - half_h,
            right: center.x + half_w,
            bottom: center.y + half_h,
        }
    }

    /// Boxes on the same side never collide; otherwise they collide when
    /// their current rectangles overlap.
    pub fn detect_collision(
        &self,
        transform: &Transform,
        other: &CollisionBox,
        other_transform: &Transform,
    ) -> bool {
        if self.is_friendly == other.is_friendly {
            return false;
        }
        self.bounds(transform).overlaps(&other.bounds(other_transform))
    }
}
