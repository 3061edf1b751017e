use crate::renderer::Rgba;

/// Constants that depend on the *frame-buffer*, not on the map.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_h: f32, // pre-derived for speed
    pub half_w: f32, // pre-derived for speed
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            half_w: w as f32 * 0.5,
            half_h: h as f32 * 0.5,
        }
    }
}

/// Per-column wall distance for the current frame, `+inf` where no wall
/// was drawn. Written by the wall pass, read by the sprite pass.
#[derive(Clone, Debug, Default)]
pub struct DepthBuffer {
    depth: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(w: usize) -> Self {
        Self {
            depth: vec![f32::INFINITY; w],
        }
    }

    /// Resize to `w` columns; everything becomes `+inf`.
    pub fn resize(&mut self, w: usize) {
        self.depth.clear();
        self.depth.resize(w, f32::INFINITY);
    }

    pub fn reset(&mut self) {
        self.depth.fill(f32::INFINITY);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Depth of column `x`; `+inf` outside the buffer.
    #[inline]
    pub fn get(&self, x: usize) -> f32 {
        self.depth.get(x).copied().unwrap_or(f32::INFINITY)
    }

    #[inline]
    pub fn set(&mut self, x: usize, d: f32) {
        if let Some(slot) = self.depth.get_mut(x) {
            *slot = d;
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depth
    }
}

/// Look of the 3-D view that is independent of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    /// Distance at which walls are drawn at half brightness.
    pub falloff: f32,
    /// Extra multiplier for walls hit on a horizontal grid line.
    pub side_dim: f32,
    pub ceiling: Rgba,
    pub floor: Rgba,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            falloff: 10.0,
            side_dim: 0.8,
            ceiling: 0xFF_19191E,
            floor: 0xFF_141212,
        }
    }
}

/// What one call to `Raycaster::render` produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub wall_columns: usize,
    pub sprite_columns: usize,
    pub sprites_visible: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_buffer_resets_to_infinity() {
        let mut db = DepthBuffer::new(3);
        db.set(1, 2.5);
        assert_eq!(db.get(1), 2.5);
        db.reset();
        assert!(db.as_slice().iter().all(|d| d.is_infinite()));
        // writes past the end are dropped
        db.set(10, 1.0);
        assert_eq!(db.len(), 3);
        assert!(db.get(10).is_infinite());
    }

    #[test]
    fn screen_halves() {
        let s = Screen::new(640, 480);
        assert_eq!((s.half_w, s.half_h), (320.0, 240.0));
    }
}
