//! Billboard sprites: camera-space projection, far-to-near ordering and
//! per-column occlusion against the wall depth buffer.

use crate::{
    engine::{
        types::{DepthBuffer, Screen},
        walls::strip_index,
    },
    renderer::{ColumnSpan, Renderer},
    world::{Camera, Sprite, TextureBank, TextureId},
};

/// A sprite that survived projection, ready to be rasterised.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisSprite {
    /// Left edge in screen pixels (may be negative).
    pub left: f32,
    /// Width and height in pixels.
    pub size: f32,
    pub y_top: f32,
    /// Camera-space depth.
    pub depth: f32,
    /// Squared world distance to the camera, the sort key.
    pub dist2: f32,
    pub tex: TextureId,
    /// Position in the input slice.
    pub index: usize,
}

/// Project one sprite; `None` when it is hidden, behind the camera, too
/// small or entirely off-screen.
pub fn project(cam: &Camera, screen: &Screen, sprite: &Sprite, index: usize) -> Option<VisSprite> {
    if sprite.hidden {
        return None;
    }
    let t = cam.to_cam(sprite.pos)?;
    if !t.is_finite() || !(t.y > 0.0) {
        return None;
    }

    let screen_x = screen.half_w * (1.0 + t.x / t.y);
    let size = (screen.h as f32 / t.y).abs() * sprite.scale;
    if !size.is_finite() || !screen_x.is_finite() || size < 1.0 {
        return None;
    }

    let left = screen_x - size * 0.5;
    if left + size < 0.0 || left >= screen.w as f32 {
        return None;
    }

    let centre_y = screen.half_h - sprite.z / t.y * screen.half_h;
    Some(VisSprite {
        left,
        size,
        y_top: centre_y - size * 0.5,
        depth: t.y,
        dist2: (sprite.pos - cam.pos()).length_squared(),
        tex: sprite.tex,
        index,
    })
}

/// Project every sprite into `out`, sorted far to near.
///
/// The sort is stable: equidistant sprites keep their input order, so
/// the later one is drawn on top.
pub fn collect(cam: &Camera, screen: &Screen, sprites: &[Sprite], out: &mut Vec<VisSprite>) {
    out.clear();
    out.extend(
        sprites
            .iter()
            .enumerate()
            .filter_map(|(i, s)| project(cam, screen, s, i)),
    );
    out.sort_by(|a, b| b.dist2.total_cmp(&a.dist2));
}

/// Draw projected sprites in order. A column is skipped wherever the wall
/// is at least as near as the sprite. Returns the number of columns drawn.
pub fn draw_sprites<R: Renderer>(
    renderer: &mut R,
    screen: &Screen,
    vis: &[VisSprite],
    bank: &TextureBank,
    depth: &DepthBuffer,
) -> usize {
    let mut drawn = 0;
    for vs in vis {
        let Ok(tex) = bank.texture(vs.tex) else {
            continue;
        };
        let n = tex.strip_count();
        if n == 0 {
            continue;
        }

        let x0 = vs.left.floor().max(0.0) as usize;
        let x1 = ((vs.left + vs.size).ceil().max(0.0) as usize).min(screen.w);
        for x in x0..x1 {
            if depth.get(x) <= vs.depth {
                continue;
            }
            let u = (x as f32 - vs.left) / vs.size;
            let Some(strip) = tex.strip(strip_index(u, n)) else {
                continue;
            };
            renderer.draw_column(
                &ColumnSpan {
                    x: x as i32,
                    y_top: vs.y_top,
                    height: vs.size,
                    shade: 1.0,
                    masked: true,
                },
                strip,
            );
            drawn += 1;
        }
    }
    drawn
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
