use glam::Vec2;

/// Tile value stored in a grid cell. `0` is walkable floor, anything else is
/// a wall whose value doubles as its wall texture id.
pub type TileId = u8;

pub const TILE_EMPTY: TileId = 0;

/// Things that can go wrong when building a grid.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid of {width}x{height} needs {expected} tiles, got {got}")]
    Size {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    #[error("row {row} has {got} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid tile `{ch}` at row {row}, column {col}")]
    BadTile { ch: char, row: usize, col: usize },

    #[error("map contains no rows")]
    Empty,
}

/// Occupancy grid in flat row-major order.
///
/// Read-only while a frame renders; the raycaster's per-column loop indexes
/// straight into `tiles`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<TileId>,
}

impl Grid {
    pub fn new(width: usize, height: usize, tiles: Vec<TileId>) -> Result<Self, GridError> {
        let expected = width * height;
        if tiles.len() != expected {
            return Err(GridError::Size {
                width,
                height,
                expected,
                got: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// A 0×0 grid. Every ray cast against it misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from nested rows (handy for tests and the built-in map).
    pub fn from_rows<R: AsRef<[TileId]>>(rows: &[R]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    got: r.len(),
                });
            }
            tiles.extend_from_slice(r);
        }
        Self::new(width, rows.len(), tiles)
    }

    /// Parse the text map format: one row per line, `0`-`9` are tile ids,
    /// `.` is floor. Blank lines and `;` comments are skipped.
    pub fn parse(src: &str) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<TileId>> = Vec::new();
        for line in src.lines() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }
            let row = rows.len();
            let parsed = line
                .chars()
                .enumerate()
                .map(|(col, ch)| match ch {
                    '.' => Ok(TILE_EMPTY),
                    d if d.is_ascii_digit() => Ok(d as u8 - b'0'),
                    ch => Err(GridError::BadTile { ch, row, col }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(parsed);
        }
        if rows.is_empty() {
            return Err(GridError::Empty);
        }
        Self::from_rows(&rows)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Upper bound on DDA steps: enough to cross the whole map once.
    #[inline]
    pub fn max_ray_steps(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Tile at `(x, y)`, `None` when outside the grid.
    #[inline]
    pub fn tile(&self, x: i32, y: i32) -> Option<TileId> {
        if self.contains(x, y) {
            Some(self.tiles[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// True if `pos` lies inside the grid on a floor tile.
    pub fn is_walkable(&self, pos: Vec2) -> bool {
        if !pos.is_finite() || pos.x < 0.0 || pos.y < 0.0 {
            return false;
        }
        self.tile(pos.x as i32, pos.y as i32) == Some(TILE_EMPTY)
    }

    /// Every wall cell as `(x, y, tile)`, row by row.
    pub fn walls(&self) -> impl Iterator<Item = (usize, usize, TileId)> + '_ {
        let w = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| **t != TILE_EMPTY)
            .map(move |(i, t)| (i % w, i / w, *t))
    }

    /// The 22×22 arena: nine 6×6 rooms on a 7-tile stride joined by doorways.
    pub fn arena() -> Self {
        Self::parse(ARENA).unwrap_or_default()
    }
}

const ARENA: &str = "\
1111111111131111211111
1......1......1......1
1......1......1......2
1....................1
1....................1
1......1......1......1
1......1......1......1
111..12111..11211..111
1......1......1......2
1......1......1......1
1....................1
1....................3
1......1......1......1
1......1......1......1
111..11111..11111..111
1......1......1......1
1......1......1......1
1....................1
1....................1
1......1......1......1
1......1......1......1
1111111113111111111111
";
