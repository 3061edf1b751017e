//! Raycast render core.
//!
//! [`Raycaster`] owns the per-viewport scratch (depth buffer, camera-X
//! table, visible sprites) and runs one frame as
//! ceiling/floor → walls → sprites against any [`Renderer`].

pub mod dda;
pub mod sprites;
pub mod types;
pub mod walls;

pub use dda::{RayHit, Side, cast};
pub use types::{DepthBuffer, FrameStats, RenderStyle, Screen};

use crate::{
    renderer::Renderer,
    world::{Camera, Grid, Sprite, TextureBank},
};
use sprites::VisSprite;

/// Everything a frame reads. Borrowed, never modified.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub camera: &'a Camera,
    pub grid: &'a Grid,
    pub sprites: &'a [Sprite],
    pub textures: &'a TextureBank,
}

pub struct Raycaster {
    screen: Screen,
    style: RenderStyle,
    depth: DepthBuffer,
    camera_x: Vec<f32>,
    vis: Vec<VisSprite>,
}

impl Raycaster {
    pub fn new(w: usize, h: usize, style: RenderStyle) -> Self {
        let mut rc = Self {
            screen: Screen::default(),
            style,
            depth: DepthBuffer::default(),
            camera_x: Vec::new(),
            vis: Vec::new(),
        };
        rc.resize(w, h);
        rc
    }

    /// Re-allocate scratch for a new viewport size. No-op if unchanged.
    pub fn resize(&mut self, w: usize, h: usize) {
        if self.screen.w == w && self.screen.h == h && self.camera_x.len() == w {
            return;
        }
        self.screen = Screen::new(w, h);
        self.depth.resize(w);
        self.camera_x.clear();
        self.camera_x.extend((0..w).map(|x| Camera::camera_x(x, w)));
    }

    #[inline]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    #[inline]
    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    /// Wall distances of the last rendered frame.
    #[inline]
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Draw the 3-D view into the top `screen.h` rows of `renderer`.
    /// The caller owns `begin_frame` / `end_frame`.
    pub fn render<R: Renderer>(&mut self, renderer: &mut R, scene: &Scene) -> FrameStats {
        let Screen { w, h, .. } = self.screen;
        let half = h as i32 / 2;
        renderer.fill_rect(0, 0, w as i32, half, self.style.ceiling);
        renderer.fill_rect(0, half, w as i32, h as i32 - half, self.style.floor);

        self.depth.reset();
        let wall_columns = walls::draw_walls(
            renderer,
            &self.screen,
            scene.camera,
            &self.camera_x,
            scene.grid,
            scene.textures,
            &self.style,
            &mut self.depth,
        );

        sprites::collect(scene.camera, &self.screen, scene.sprites, &mut self.vis);
        let sprite_columns =
            sprites::draw_sprites(renderer, &self.screen, &self.vis, scene.textures, &self.depth);

        FrameStats {
            wall_columns,
            sprite_columns,
            sprites_visible: self.vis.len(),
        }
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recorder::Recorder;
    use crate::world::Texture;
    use glam::Vec2;

    fn bank() -> TextureBank {
        let mut bank = TextureBank::new();
        bank.insert(1, Texture::from_rows("WALL", 4, 4, &[0xFF_AA0000; 16]).unwrap())
            .unwrap();
        bank.insert(200, Texture::from_rows("SPR", 4, 4, &[0xFF_00AA00; 16]).unwrap())
            .unwrap();
        bank
    }

    fn room() -> Grid {
        Grid::parse(
            "\
1111111
1.....1
1.....1
1..1..1
1.....1
1.....1
1111111
",
        )
        .unwrap()
    }

    #[test]
    fn resize_only_when_changed() {
        let mut rc = Raycaster::new(32, 24, RenderStyle::default());
        assert_eq!(rc.depth().len(), 32);
        rc.resize(32, 24);
        assert_eq!(rc.screen().w, 32);
        rc.resize(40, 30);
        assert_eq!(rc.depth().len(), 40);
        assert_eq!(rc.screen().h, 30);
    }

    #[test]
    fn ceiling_and_floor_come_first() {
        let mut rc = Raycaster::new(16, 12, RenderStyle::default());
        let cam = Camera::new(Vec2::new(1.5, 1.5), Vec2::X, 1.2);
        let grid = room();
        let textures = bank();
        let scene = Scene {
            camera: &cam,
            grid: &grid,
            sprites: &[],
            textures: &textures,
        };
        let mut rec = Recorder::default();
        let stats = rc.render(&mut rec, &scene);
        assert!(matches!(rec.calls[0], crate::renderer::recorder::Call::Rect { y: 0, .. }));
        assert!(matches!(rec.calls[1], crate::renderer::recorder::Call::Rect { y: 6, .. }));
        assert_eq!(stats.wall_columns, 16);
        assert_eq!(stats.sprites_visible, 0);
    }

    #[test]
    fn sprite_behind_pillar_is_not_drawn() {
        // camera west of the pillar at (3,3), sprite directly east of it
        let cam = Camera::new(Vec2::new(1.5, 3.5), Vec2::X, 1.0);
        let sprite = Sprite::new(Vec2::new(5.0, 3.5), 200).with_scale(0.2);
        let grid = room();
        let textures = bank();
        let sprites = [sprite];
        let scene = Scene {
            camera: &cam,
            grid: &grid,
            sprites: &sprites,
            textures: &textures,
        };
        let mut rc = Raycaster::new(64, 48, RenderStyle::default());
        let mut rec = Recorder::default();
        let stats = rc.render(&mut rec, &scene);
        assert_eq!(stats.sprites_visible, 1);
        assert_eq!(stats.sprite_columns, 0);
        assert!(rec.masked_columns().is_empty());
    }

    #[test]
    fn sprite_in_open_view_is_drawn() {
        let cam = Camera::new(Vec2::new(1.5, 1.5), Vec2::X, 1.0);
        let sprites = [Sprite::new(Vec2::new(4.5, 1.5), 200)];
        let grid = room();
        let textures = bank();
        let scene = Scene {
            camera: &cam,
            grid: &grid,
            sprites: &sprites,
            textures: &textures,
        };
        let mut rc = Raycaster::new(64, 48, RenderStyle::default());
        let mut rec = Recorder::default();
        let stats = rc.render(&mut rec, &scene);
        assert!(stats.sprite_columns > 0);
        assert_eq!(rec.masked_columns().len(), stats.sprite_columns);
        assert!(rec.masked_texels().iter().all(|&t| t == 0xFF_00AA00));
    }

    #[test]
    fn sprites_at_or_behind_camera_never_drawn() {
        let cam = Camera::new(Vec2::new(3.5, 1.5), Vec2::X, 1.2);
        let sprites = [
            Sprite::new(cam.pos(), 200),
            Sprite::new(Vec2::new(2.0, 1.5), 200),
            Sprite::new(Vec2::new(1.5, 1.2), 200),
        ];
        let grid = room();
        let textures = bank();
        let scene = Scene {
            camera: &cam,
            grid: &grid,
            sprites: &sprites,
            textures: &textures,
        };
        let mut rc = Raycaster::new(48, 32, RenderStyle::default());
        let mut rec = Recorder::default();
        for _ in 0..3 {
            let stats = rc.render(&mut rec, &scene);
            assert_eq!(stats.sprites_visible, 0);
            assert_eq!(stats.sprite_columns, 0);
            assert!(rec.masked_columns().is_empty());
        }
    }

    #[test]
    fn same_scene_same_draw_calls() {
        let cam = Camera::new(Vec2::new(1.7, 4.2), Vec2::new(0.8, -0.6), 1.3);
        let sprites = [
            Sprite::new(Vec2::new(4.5, 2.0), 200),
            Sprite::new(Vec2::new(5.0, 4.5), 200).with_z(-0.5).with_scale(0.5),
        ];
        let grid = room();
        let textures = bank();
        let scene = Scene {
            camera: &cam,
            grid: &grid,
            sprites: &sprites,
            textures: &textures,
        };
        let mut rc = Raycaster::new(80, 60, RenderStyle::default());
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        let a = rc.render(&mut first, &scene);
        let b = rc.render(&mut second, &scene);
        assert_eq!(a, b);
        assert_eq!(first.calls, second.calls);
    }
}
