//! Rendering abstraction layer.
//!
//! *The raycaster and the game never touch a pixel buffer directly.*
//! They issue a handful of primitive draw calls against a type that
//! implements [`Renderer`].
//!
//! * [`software::Software`] is the CPU back-end that owns a `u32` frame.
//! * A helper blanket-impl [`RendererExt`] adds compound shapes so
//!   call-sites stay short.

use crate::world::Texture;

/// Pixel format of the frame-buffer (0xAARRGGBB).
pub type Rgba = u32;

/// Alpha channel of a pixel.
#[inline(always)]
pub fn alpha(c: Rgba) -> u8 {
    (c >> 24) as u8
}

/// One textured, 1-pixel-wide vertical slice.
///
/// `strip` texels are stretched over `height` pixels starting at `y_top`
/// (both may extend past the screen; the back-end clips).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpan {
    pub x: i32,
    pub y_top: f32,
    pub height: f32,
    /// Brightness multiplier in `(0, 1]`.
    pub shade: f32,
    /// Skip texels whose alpha is zero (sprites, icons).
    pub masked: bool,
}

/// A draw target that owns an internal scratch buffer for the whole frame.
///
/// `end_frame` hands the finished buffer to a user-supplied closure.
pub trait Renderer {
    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Fill an axis-aligned rectangle; colours with alpha below 0xFF blend.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba);

    /// Rasterise one textured column.
    fn draw_column(&mut self, span: &ColumnSpan, strip: &[Rgba]);

    /// One-pixel line between two points.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba);

    /// Finish the frame and **loan** the finished buffer to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize);
}

/// Convenience blanket-impl with compound shapes.
pub trait RendererExt: Renderer {
    /// Rectangle outline `border` pixels thick, drawn inside the bounds.
    fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, border: i32, color: Rgba) {
        self.fill_rect(x, y, w, border, color);
        self.fill_rect(x, y + h - border, w, border, color);
        self.fill_rect(x, y, border, h, color);
        self.fill_rect(x + w - border, y, border, h, color);
    }

    /// Square of side `size` centred on `(cx, cy)`.
    fn fill_square_centered(&mut self, cx: i32, cy: i32, size: i32, color: Rgba) {
        self.fill_rect(cx - size / 2, cy - size / 2, size, size, color);
    }

    /// Draw a whole texture as a `size`×`size` icon with its top-left at `(x, y)`.
    fn draw_texture(&mut self, tex: &Texture, x: i32, y: i32, size: i32) {
        let n = tex.strip_count();
        if n == 0 || size <= 0 {
            return;
        }
        for col in 0..size {
            let i = (col as usize * n / size as usize).min(n - 1);
            if let Some(strip) = tex.strip(i) {
                let span = ColumnSpan {
                    x: x + col,
                    y_top: y as f32,
                    height: size as f32,
                    shade: 1.0,
                    masked: true,
                };
                self.draw_column(&span, strip);
            }
        }
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod software;
pub use software::Software;

#[cfg(test)]
pub(crate) mod recorder;
