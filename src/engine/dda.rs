//! Digital differential analyser: walk a ray cell by cell through the grid
//! until it enters a wall, leaves the grid or runs out of steps.

use glam::Vec2;

use crate::world::{Grid, TILE_EMPTY, TileId};

/// Which family of grid lines the ray crossed last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Side {
    /// A vertical line (`x = const`) was crossed: the wall faces ±X.
    #[default]
    Vertical,
    /// A horizontal line (`y = const`) was crossed: the wall faces ±Y.
    Horizontal,
}

/// Result of one cast. `distance` is along `direction` in units of
/// `|direction|`, which makes it the perpendicular (fish-eye free) distance
/// when `direction = dir + plane * camera_x`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub hit: bool,
    pub cell_x: i32,
    pub cell_y: i32,
    pub distance: f32,
    /// Position along the hit face in `[0, 1)`.
    pub wall_fraction: f32,
    pub side: Side,
    pub tile: TileId,
}

impl RayHit {
    pub const MISS: RayHit = RayHit {
        hit: false,
        cell_x: 0,
        cell_y: 0,
        distance: f32::INFINITY,
        wall_fraction: 0.0,
        side: Side::Vertical,
        tile: TILE_EMPTY,
    };
}

/// Cast a ray from `origin` along `direction` through `grid`.
///
/// Never panics; empty grids, zero or non-finite vectors, origins outside
/// the grid and `max_steps == 0` all yield [`RayHit::MISS`].
pub fn cast(origin: Vec2, direction: Vec2, grid: &Grid, max_steps: usize) -> RayHit {
    if grid.is_empty()
        || max_steps == 0
        || !origin.is_finite()
        || !direction.is_finite()
        || direction == Vec2::ZERO
        || origin.x < 0.0
        || origin.y < 0.0
    {
        return RayHit::MISS;
    }

    let mut map_x = origin.x.floor() as i32;
    let mut map_y = origin.y.floor() as i32;
    if !grid.contains(map_x, map_y) {
        return RayHit::MISS;
    }

    // 1/0 is +inf for an axis-parallel ray
    let delta = Vec2::new((1.0 / direction.x).abs(), (1.0 / direction.y).abs());

    let (step_x, mut side_x) = first_crossing(origin.x, map_x, direction.x, delta.x);
    let (step_y, mut side_y) = first_crossing(origin.y, map_y, direction.y, delta.y);

    for _ in 0..max_steps {
        let side = if side_x < side_y {
            side_x += delta.x;
            map_x += step_x;
            Side::Vertical
        } else {
            side_y += delta.y;
            map_y += step_y;
            Side::Horizontal
        };

        let tile = match grid.tile(map_x, map_y) {
            None => return RayHit::MISS,
            Some(TILE_EMPTY) => continue,
            Some(t) => t,
        };

        let (distance, along) = match side {
            Side::Vertical => (side_x - delta.x, origin.y + (side_x - delta.x) * direction.y),
            Side::Horizontal => (side_y - delta.y, origin.x + (side_y - delta.y) * direction.x),
        };
        let wall_fraction = along - along.floor();

        return RayHit {
            hit: true,
            cell_x: map_x,
            cell_y: map_y,
            distance,
            wall_fraction: if wall_fraction < 1.0 { wall_fraction } else { 0.0 },
            side,
            tile,
        };
    }
    RayHit::MISS
}

/// Step sign and distance to the first grid line on one axis.
#[inline]
fn first_crossing(o: f32, cell: i32, d: f32, delta: f32) -> (i32, f32) {
    if delta.is_infinite() {
        return (0, f32::INFINITY);
    }
    if d < 0.0 {
        (-1, (o - cell as f32) * delta)
    } else {
        (1, (cell as f32 + 1.0 - o) * delta)
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
