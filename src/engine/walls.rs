use crate::{
    engine::{
        dda::{self, Side},
        types::{DepthBuffer, RenderStyle, Screen},
    },
    renderer::{ColumnSpan, Renderer},
    world::{Camera, Grid, TextureBank},
};

/// Projected wall height in pixels for a hit at `distance`.
#[inline]
pub fn wall_height(screen_h: f32, distance: f32) -> f32 {
    screen_h / distance
}

/// Brightness multiplier: 1 at distance 0, halved at `falloff`, never 0.
#[inline]
pub fn shade(distance: f32, falloff: f32) -> f32 {
    if !(falloff > 0.0) {
        return 1.0;
    }
    1.0 / (1.0 + distance.max(0.0) / falloff)
}

/// Strip index for a fraction in `[0, 1)`, clamped to `[0, count - 1]`.
/// `count` must be non-zero.
#[inline]
pub fn strip_index(fraction: f32, count: usize) -> usize {
    let i = (fraction * count as f32).floor();
    if i > 0.0 { (i as usize).min(count - 1) } else { 0 }
}

/// Cast one ray per screen column and draw the textured wall slices.
///
/// Fills `depth` for every column (`+inf` where nothing was drawn) and
/// returns the number of columns that produced a draw call.
#[allow(clippy::too_many_arguments)]
pub fn draw_walls<R: Renderer>(
    renderer: &mut R,
    screen: &Screen,
    cam: &Camera,
    camera_x: &[f32],
    grid: &Grid,
    bank: &TextureBank,
    style: &RenderStyle,
    depth: &mut DepthBuffer,
) -> usize {
    let max_steps = grid.max_ray_steps();
    let plane = cam.plane();
    let h = screen.h as f32;
    let mut drawn = 0;

    for (x, &cx) in camera_x.iter().enumerate().take(screen.w) {
        depth.set(x, f32::INFINITY);

        let ray = cam.dir() + plane * cx;
        let hit = dda::cast(cam.pos(), ray, grid, max_steps);
        if !hit.hit || !(hit.distance > 0.0) || !hit.distance.is_finite() {
            continue;
        }
        depth.set(x, hit.distance);

        let Ok(tex) = bank.texture(hit.tile) else {
            continue;
        };
        let n = tex.strip_count();
        if n == 0 {
            continue;
        }
        let Some(strip) = tex.strip(strip_index(hit.wall_fraction, n)) else {
            continue;
        };

        let height = wall_height(h, hit.distance);
        let mut s = shade(hit.distance, style.falloff);
        if hit.side == Side::Horizontal {
            s *= style.side_dim;
        }

        renderer.draw_column(
            &ColumnSpan {
                x: x as i32,
                y_top: screen.half_h - height * 0.5,
                height,
                shade: s,
                masked: false,
            },
            strip,
        );
        drawn += 1;
    }
    drawn
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

    fn bank_with(id: u8, w: usize) -> TextureBank {
        let mut bank = TextureBank::new();
        let px: Vec<u32> = (0..w * 4).map(|i| 0xFF00_0000 | (i % w) as u32).collect();
        bank.insert(id, Texture::from_rows("WALL", w, 4, &px).unwrap())
            .unwrap();
        bank
    }

    fn table(w: usize) -> Vec<f32> {
        (0..w).map(|x| Camera::camera_x(x, w)).collect()
    }

    #[test]
    fn height_is_screen_at_unit_distance_and_decreasing() {
        assert_eq!(wall_height(600.0, 1.0), 600.0);
        let mut prev = f32::INFINITY;
        for i in 1..100 {
            let h = wall_height(600.0, i as f32 * 0.25);
            assert!(h < prev);
            prev = h;
        }
    }

    #[test]
    fn shade_is_monotonic_and_positive() {
        assert_eq!(shade(0.0, 10.0), 1.0);
        assert!((shade(10.0, 10.0) - 0.5).abs() < 1e-6);
        let mut prev = 1.1;
        for i in 0..200 {
            let s = shade(i as f32 * 0.5, 10.0);
            assert!(s > 0.0 && s < prev);
            prev = s;
        }
        assert!(shade(1e30, 10.0) > 0.0);
    }

    #[test]
    fn strip_index_clamps() {
        assert_eq!(strip_index(0.0, 64), 0);
        assert_eq!(strip_index(0.5, 64), 32);
        assert_eq!(strip_index(0.999_999_9, 64), 63);
        assert_eq!(strip_index(1.0, 64), 63);
        assert_eq!(strip_index(-0.1, 64), 0);
        assert_eq!(strip_index(f32::NAN, 64), 0);
    }

    #[test]
    fn closed_room_fills_every_column() {
        let grid = Grid::parse("111\n1.1\n111\n").unwrap();
        let cam = Camera::new(Vec2::new(1.5, 1.5), Vec2::X, 1.2);
        let screen = Screen::new(32, 24);
        let mut depth = DepthBuffer::new(32);
        let mut rec = Recorder::default();
        let drawn = draw_walls(
            &mut rec,
            &screen,
            &cam,
            &table(32),
            &grid,
            &bank_with(1, 8),
            &RenderStyle::default(),
            &mut depth,
        );
        assert_eq!(drawn, 32);
        let cols = rec.columns();
        assert_eq!(cols.len(), 32);
        for (x, span) in cols.iter().enumerate() {
            assert_eq!(span.x, x as i32);
            assert!(!span.masked);
            // slice is centred on the horizon
            let mid = span.y_top + span.height * 0.5;
            assert!((mid - 12.0).abs() < 1e-3);
            assert!((span.height - 24.0 / depth.get(x)).abs() < 1e-3);
        }
        // centre column looks straight at the wall half a tile away
        assert!((depth.get(16) - 0.5).abs() < 0.05);
    }

    #[test]
    fn open_map_draws_nothing() {
        let grid = Grid::parse("...\n...\n...\n").unwrap();
        let cam = Camera::new(Vec2::new(1.5, 1.5), Vec2::X, 1.2);
        let mut depth = DepthBuffer::new(8);
        let mut rec = Recorder::default();
        let drawn = draw_walls(
            &mut rec,
            &Screen::new(8, 8),
            &cam,
            &table(8),
            &grid,
            &bank_with(1, 8),
            &RenderStyle::default(),
            &mut depth,
        );
        assert_eq!(drawn, 0);
        assert!(rec.calls.is_empty());
        assert!(depth.as_slice().iter().all(|d| d.is_infinite()));
    }

    #[test]
    fn missing_texture_skips_column_but_keeps_depth() {
        let grid = Grid::parse("222\n2.2\n222\n").unwrap();
        let cam = Camera::new(Vec2::new(1.5, 1.5), Vec2::X, 1.2);
        let mut depth = DepthBuffer::new(4);
        let mut rec = Recorder::default();
        let drawn = draw_walls(
            &mut rec,
            &Screen::new(4, 4),
            &cam,
            &table(4),
            &grid,
            &bank_with(1, 8),
            &RenderStyle::default(),
            &mut depth,
        );
        assert_eq!(drawn, 0);
        assert!(depth.as_slice().iter().all(|d| d.is_finite()));
    }

    #[test]
    fn horizontal_sides_are_dimmed() {
        // looking down +Y hits a horizontal face
        let grid = Grid::parse("111\n1.1\n111\n").unwrap();
        let style = RenderStyle {
            side_dim: 0.5,
            ..RenderStyle::default()
        };
        let mut rec = Recorder::default();
        let mut depth = DepthBuffer::new(1);
        let cam = Camera::new(Vec2::new(1.5, 1.5), Vec2::Y, 1.2);
        draw_walls(
            &mut rec,
            &Screen::new(1, 10),
            &cam,
            &table(1),
            &grid,
            &bank_with(1, 4),
            &style,
            &mut depth,
        );
        let span = rec.columns()[0];
        assert!((span.shade - 0.5 * shade(0.5, style.falloff)).abs() < 1e-6);
    }
}
