//! 2-D vector helpers on top of [`glam::Vec2`].
//!
//! glam already covers add / sub / scale / dot / length / normalize and
//! `perp()` (which returns `(-y, x)`); only rotation by an angle is missing.

pub use glam::Vec2;

pub trait Vec2Ext {
    /// Rotate by `rad` radians. With the map's y axis pointing down a
    /// positive angle turns clockwise on screen.
    fn rotated(self, rad: f32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn rotated(self, rad: f32) -> Vec2 {
        let (s, c) = rad.sin_cos();
        Vec2::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }
}
