use glam::Vec2;

use super::texture::TextureId;

/// World-space billboard.
///
/// `scale` multiplies the projected size, `z` raises (+) or lowers (-) the
/// sprite in units of half a wall height. Owned by game logic; the render
/// core only reads it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub pos: Vec2,
    pub tex: TextureId,
    pub scale: f32,
    pub z: f32,
    pub hidden: bool,
}

impl Sprite {
    pub fn new(pos: Vec2, tex: TextureId) -> Self {
        Self {
            pos,
            tex,
            scale: 1.0,
            z: 0.0,
            hidden: false,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }
}
