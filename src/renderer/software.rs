//! ---------------------------------------------------------------------------
//! Software (CPU) frame-buffer back-end
//!
//! * Fills a `Vec<u32>` in **0xAARRGGBB** format, reused across frames.
//! * Every primitive clips against the frame; nothing here can index out
//!   of bounds, whatever the caller passes in.
//! ---------------------------------------------------------------------------

use crate::renderer::{ColumnSpan, Renderer, Rgba, alpha};

/// Colour the frame is cleared to.
pub const CLEAR_COLOR: Rgba = 0xFF_1E1E1E;

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.scratch[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y) {
            self.scratch[y as usize * self.width + x as usize] = color;
        }
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, 0);
        }
        self.scratch.fill(CLEAR_COLOR);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let a = alpha(color);
        for row in y0 as usize..y1 as usize {
            let line = &mut self.scratch[row * self.width..(row + 1) * self.width];
            for px in &mut line[x0 as usize..x1 as usize] {
                *px = match a {
                    0xFF => color,
                    0 => *px,
                    _ => blend(*px, color, a),
                };
            }
        }
    }

    fn draw_column(&mut self, span: &ColumnSpan, strip: &[Rgba]) {
        if strip.is_empty()
            || span.x < 0
            || span.x >= self.width as i32
            || !(span.height > 0.0)
            || !span.y_top.is_finite()
        {
            return;
        }

        /* clip to integer pixel rows */
        let y_bot = span.y_top + span.height;
        let y0 = span.y_top.max(0.0).floor() as i32;
        let y1 = y_bot.min(self.height as f32).ceil() as i32;
        if y0 >= y1 {
            return;
        }

        let col = span.x as usize;
        let texels = strip.len();
        let step = texels as f32 / span.height;
        let shade = span.shade.clamp(0.0, 1.0);

        for y in y0..y1 {
            let v = ((y as f32 + 0.5 - span.y_top) * step) as isize;
            let texel = strip[v.clamp(0, texels as isize - 1) as usize];
            if span.masked && alpha(texel) == 0 {
                continue;
            }
            self.scratch[y as usize * self.width + col] = shade_rgb(texel, shade);
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: Rgba) {
        let mut x0 = x0;
        let mut y0 = y0;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, col);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

/*──────────────────────── colour helpers ─────────────────────────────*/

/// Scale the RGB channels by `shade`, forcing the result opaque.
#[inline]
fn shade_rgb(c: Rgba, shade: f32) -> Rgba {
    if shade >= 1.0 {
        return c | 0xFF00_0000;
    }
    let ch = |s: u32| (((c >> s) & 0xFF) as f32 * shade) as u32;
    0xFF00_0000 | ch(16) << 16 | ch(8) << 8 | ch(0)
}

/// `dst` blended towards `src` by alpha `a`.
#[inline]
fn blend(dst: Rgba, src: Rgba, a: u8) -> Rgba {
    let a = a as u32;
    let ch = |s: u32| {
        let d = (dst >> s) & 0xFF;
        let c = (src >> s) & 0xFF;
        (c * a + d * (255 - a)) / 255
    };
    0xFF00_0000 | ch(16) << 16 | ch(8) << 8 | ch(0)
}

/*──────────────────────────────── Tests ───────────────────────────────*/
