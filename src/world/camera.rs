use glam::Vec2;

/// Player view-point on the grid.
///
/// * `dir` is kept normalized; the camera plane is `perp(dir) * k` with
///   `k = tan(fov / 2)`.
/// * Map y grows downwards, so `perp(dir)` points to the viewer's right.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pos: Vec2, // grid units
    dir: Vec2, // unit facing
    fov: f32,  // horizontal FoV (radians)
}

impl Camera {
    /// Create a camera at `pos` looking along `dir` (normalized here; a zero
    /// vector falls back to +X) with horizontal FoV `fov`.
    pub fn new(pos: Vec2, dir: Vec2, fov: f32) -> Self {
        Self {
            pos,
            dir: dir.try_normalize().unwrap_or(Vec2::X),
            fov,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /*──────────────────────── projection helpers ─────────────────────*/

    /// Camera plane coefficient `k = tan(fov / 2)`.
    #[inline]
    pub fn k(&self) -> f32 {
        (self.fov * 0.5).tan()
    }

    /// Camera plane: perpendicular to `dir`, scaled by `k`.
    #[inline]
    pub fn plane(&self) -> Vec2 {
        self.dir.perp() * self.k()
    }

    /// Map screen column `x` of a `w`-wide view to `[-1, 1]`.
    ///
    /// ```text
    /// camera_x = 2x / (w - 1) - 1
    /// ```
    #[inline]
    pub fn camera_x(x: usize, w: usize) -> f32 {
        if w <= 1 {
            return 0.0;
        }
        2.0 * x as f32 / (w - 1) as f32 - 1.0
    }

    /// Direction of the ray through camera-plane coordinate `camera_x`.
    #[inline]
    pub fn ray_dir(&self, camera_x: f32) -> Vec2 {
        self.dir + self.plane() * camera_x
    }

    /// Transform world point `p` into camera space with the inverse of the
    /// `[plane; dir]` basis:
    ///  .x = lateral offset in plane units (+ right)
    ///  .y = depth along `dir`
    ///
    /// `None` when the basis is singular (zero FoV).
    #[inline]
    pub fn to_cam(&self, p: Vec2) -> Option<Vec2> {
        let plane = self.plane();
        let dir = self.dir;
        let rel = p - self.pos;

        let det = plane.x * dir.y - dir.x * plane.y;
        let inv_det = 1.0 / det;
        if !inv_det.is_finite() {
            return None;
        }

        let tx = inv_det * (dir.y * rel.x - dir.x * rel.y);
        let ty = inv_det * (-plane.y * rel.x + plane.x * rel.y);
        Some(Vec2::new(tx, ty))
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn plane_is_perpendicular_and_scaled() {
        let cam = Camera::new(Vec2::ZERO, Vec2::new(0.6, 0.8), FRAC_PI_2);
        let p = cam.plane();
        assert!(p.dot(cam.dir()).abs() < 1e-6);
        assert!((p.length() - 1.0).abs() < 1e-5); // tan(45°) = 1
    }

    #[test]
    fn dir_is_normalized() {
        let cam = Camera::new(Vec2::ZERO, Vec2::new(3.0, 4.0), 1.0);
        assert!((cam.dir().length() - 1.0).abs() < 1e-6);
        let cam = Camera::new(Vec2::ZERO, Vec2::ZERO, 1.0);
        assert_eq!(cam.dir(), Vec2::X);
    }

    #[test]
    fn camera_x_spans_unit_range() {
        assert_eq!(Camera::camera_x(0, 640), -1.0);
        assert_eq!(Camera::camera_x(639, 640), 1.0);
        assert_eq!(Camera::camera_x(0, 1), 0.0);
    }

    #[test]
    fn ray_dir_center_and_edge() {
        let cam = Camera::new(Vec2::ZERO, Vec2::X, FRAC_PI_2);
        assert!((cam.ray_dir(0.0) - Vec2::new(1.0, 0.0)).length() < 1e-6);
        assert!((cam.ray_dir(1.0) - Vec2::new(1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn to_cam_axes_align() {
        let cam = Camera::new(Vec2::ZERO, Vec2::X, FRAC_PI_2);
        // straight ahead → (lateral 0, depth 10)
        let ahead = cam.to_cam(Vec2::new(10.0, 0.0)).unwrap();
        assert!((ahead - Vec2::new(0.0, 10.0)).length() < 1e-5);
        // on the right edge of the frustum → lateral == depth
        let edge = cam.to_cam(Vec2::new(2.0, 2.0)).unwrap();
        assert!((edge - Vec2::new(2.0, 2.0)).length() < 1e-5);
        // behind → negative depth
        assert!(cam.to_cam(Vec2::new(-1.0, 0.0)).unwrap().y < 0.0);
    }

    #[test]
    fn to_cam_zero_fov_is_none() {
        let cam = Camera::new(Vec2::ZERO, Vec2::X, 0.0);
        assert_eq!(cam.to_cam(Vec2::ONE), None);
    }
}
