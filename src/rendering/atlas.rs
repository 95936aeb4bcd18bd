use cgmath::Vector2;
use serde::{Deserialize, Serialize};

/// The rectangle a texture occupies inside a texture atlas.
///
/// Coordinates are normalized atlas coordinates. `top` is the row local
/// `v = 0` maps to and `bottom` the row `v = 1` maps to.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AtlasRect {
    /// Column local `u = 0` maps to
    pub left: f32,
    /// Column local `u = 1` maps to
    pub right: f32,
    /// Row local `v = 0` maps to
    pub top: f32,
    /// Row local `v = 1` maps to
    pub bottom: f32,
}

impl AtlasRect {
    /// The whole atlas; maps every coordinate to itself.
    pub const FULL: AtlasRect = AtlasRect {
        left: 0.0,
        right: 1.0,
        top: 0.0,
        bottom: 1.0,
    };

    /// Creates a rectangle from its edges.
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        AtlasRect {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Maps a local `[0, 1]` texture coordinate into this rectangle.
    pub fn map(&self, uv: Vector2<f32>) -> [f32; 2] {
        [
            self.left + (self.right - self.left) * uv.x,
            self.top + (self.bottom - self.top) * uv.y,
        ]
    }
}

impl Default for AtlasRect {
    fn default() -> Self {
        AtlasRect::FULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_corners_into_rectangle() {
        let rect = AtlasRect::new(0.25, 0.75, 0.0, 0.5);
        assert_eq!(rect.map(Vector2::new(0.0, 0.0)), [0.25, 0.0]);
        assert_eq!(rect.map(Vector2::new(1.0, 1.0)), [0.75, 0.5]);
        assert_eq!(rect.map(Vector2::new(0.5, 0.5)), [0.5, 0.25]);
    }

    #[test]
    fn full_rect_is_identity() {
        let uv = Vector2::new(0.3, 0.9);
        assert_eq!(AtlasRect::FULL.map(uv), [0.3, 0.9]);
    }
}
