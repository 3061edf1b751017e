mod camera;
mod grid;
pub mod math;
mod sprite;
mod texture;

pub use camera::Camera;

pub use grid::{Grid, GridError, TILE_EMPTY, TileId};

pub use sprite::Sprite;

pub use texture::{FIRST_SPRITE_ID, Texture, TextureBank, TextureError, TextureId};
