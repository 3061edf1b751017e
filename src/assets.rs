//! Asset stage: turns a [`TextureManifest`] into a [`TextureBank`] and
//! loads the occupancy grid.
//!
//! Textures are synthesised procedurally, so the game ships without image
//! files. Each recipe draws into a square canvas which is then sliced into
//! strips like any other texture.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::{
    config::{ROOM_STRIDE, SPAWN_O, SPAWN_X},
    game::board::{BOARD_SIZE, Mark},
    renderer::Rgba,
    world::{Grid, GridError, Texture, TextureBank, TextureError, TextureId, TileId},
};

/// Width (and height) of every raycast texture.
pub const TEXTURE_SIZE: usize = 64;

/// Texture ids used by the game. Walls match the tile ids in the map.
pub mod tex {
    use crate::world::TextureId;

    pub const WALL_BRICK: TextureId = 1;
    pub const WALL_BRICK_HOLE: TextureId = 2;
    pub const WALL_BRICK_BANNER: TextureId = 3;

    pub const MARK_X: TextureId = 128;
    pub const AVATAR_X: TextureId = 129;
    pub const MARK_O: TextureId = 130;
    pub const AVATAR_O: TextureId = 131;
    pub const SKULL: TextureId = 132;
    pub const CHAINS: TextureId = 133;
    pub const LANTERN: TextureId = 134;
}

pub const COLOR_X: Rgba = 0xFF_F94D00;
pub const COLOR_O: Rgba = 0xFF_56E5FC;

pub fn mark_color(mark: Mark) -> Rgba {
    match mark {
        Mark::X => COLOR_X,
        Mark::O => COLOR_O,
    }
}

/// Billboard texture for a placed mark.
pub fn mark_texture(mark: Mark) -> TextureId {
    match mark {
        Mark::X => tex::MARK_X,
        Mark::O => tex::MARK_O,
    }
}

/// Billboard texture other players see.
pub fn avatar_texture(mark: Mark) -> TextureId {
    match mark {
        Mark::X => tex::AVATAR_X,
        Mark::O => tex::AVATAR_O,
    }
}

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("cannot read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad map `{path}`")]
    Grid {
        path: PathBuf,
        #[source]
        source: GridError,
    },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/*──────────────────────────── Manifest ─────────────────────────────*/

/// How to paint one texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recipe {
    Brick,
    BrickHole,
    BrickBanner,
    MarkX(Rgba),
    MarkO(Rgba),
    Avatar(Rgba),
    Skull,
    Chains,
    Lantern,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub id: TextureId,
    pub name: &'static str,
    pub recipe: Recipe,
}

/// Id → texture recipe table. Built once and handed to [`load_textures`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextureManifest {
    entries: Vec<ManifestEntry>,
}

impl TextureManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything the game draws.
    pub fn standard() -> Self {
        let mut m = Self::new();
        m.add(tex::WALL_BRICK, "wall-brick", Recipe::Brick);
        m.add(tex::WALL_BRICK_HOLE, "wall-brick-hole", Recipe::BrickHole);
        m.add(tex::WALL_BRICK_BANNER, "wall-brick-banner", Recipe::BrickBanner);
        m.add(tex::MARK_X, "x", Recipe::MarkX(COLOR_X));
        m.add(tex::AVATAR_X, "x-player", Recipe::Avatar(COLOR_X));
        m.add(tex::MARK_O, "o", Recipe::MarkO(COLOR_O));
        m.add(tex::AVATAR_O, "o-player", Recipe::Avatar(COLOR_O));
        m.add(tex::SKULL, "skeleton-skull", Recipe::Skull);
        m.add(tex::CHAINS, "chains", Recipe::Chains);
        m.add(tex::LANTERN, "lantern", Recipe::Lantern);
        m
    }

    pub fn add(&mut self, id: TextureId, name: &'static str, recipe: Recipe) -> &mut Self {
        self.entries.push(ManifestEntry { id, name, recipe });
        self
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/*──────────────────────────── Loading ──────────────────────────────*/

/// Paint every manifest entry at `size`×`size` and collect the results.
///
/// Fails if `size` differs from [`TEXTURE_SIZE`] or an id repeats.
pub fn load_textures(manifest: &TextureManifest, size: usize) -> Result<TextureBank, AssetError> {
    let mut bank = TextureBank::new();
    for e in manifest.entries() {
        let px = paint(e.recipe, size);
        let texture = Texture::from_rows(e.name, size, size, &px)?;
        if texture.strip_count() != TEXTURE_SIZE {
            return Err(TextureError::WrongWidth {
                name: e.name.to_string(),
                expected: TEXTURE_SIZE,
                got: texture.strip_count(),
            }
            .into());
        }
        bank.insert(e.id, texture)?;
    }
    log::info!("{} textures ready", bank.len());
    Ok(bank)
}

/// The built-in arena, or the map file at `path`.
pub fn load_grid(path: Option<&Path>) -> Result<Grid, AssetError> {
    let Some(path) = path else {
        return Ok(Grid::arena());
    };
    log::info!("loading map at {}", path.display());
    let src = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Grid::parse(&src).map_err(|source| AssetError::Grid {
        path: path.to_path_buf(),
        source,
    })
}

/// Warn about wall ids without a texture; returns them sorted.
pub fn check_grid_textures(grid: &Grid, bank: &TextureBank) -> Vec<TileId> {
    let mut missing: Vec<TileId> = grid
        .walls()
        .map(|(_, _, t)| t)
        .filter(|t| !bank.contains(*t))
        .collect();
    missing.sort_unstable();
    missing.dedup();
    for t in &missing {
        log::warn!("wall id {t} has no texture, those walls will not be drawn");
    }
    missing
}

/// Warn when a player would spawn off the floor or the map does not reach
/// every board room; returns the marks whose spawn is not walkable.
pub fn check_spawns(grid: &Grid) -> Vec<Mark> {
    let rooms = BOARD_SIZE as f32 * ROOM_STRIDE;
    if (grid.width() as f32) < rooms || (grid.height() as f32) < rooms {
        log::warn!(
            "map is {}x{}, some board rooms lie outside it",
            grid.width(),
            grid.height()
        );
    }
    let mut stuck = Vec::new();
    for (mark, pos) in [(Mark::X, SPAWN_X), (Mark::O, SPAWN_O)] {
        if !grid.is_walkable(pos) {
            log::warn!("{mark} spawns at ({}, {}) which is not floor", pos.x, pos.y);
            stuck.push(mark);
        }
    }
    stuck
}

/*──────────────────────────── Painting ─────────────────────────────*/

const CLEAR: Rgba = 0x00_000000;

/// Square RGBA canvas with a few shape primitives in unit coordinates.
struct Canvas {
    size: usize,
    px: Vec<Rgba>,
}

impl Canvas {
    fn new(size: usize, fill: Rgba) -> Self {
        Self {
            size,
            px: vec![fill; size * size],
        }
    }

    /// Call `f(u, v)` with the pixel centre in `[0, 1)²`; paint when it
    /// returns a colour.
    fn shade(&mut self, mut f: impl FnMut(f32, f32) -> Option<Rgba>) {
        let n = self.size as f32;
        for y in 0..self.size {
            for x in 0..self.size {
                let u = (x as f32 + 0.5) / n;
                let v = (y as f32 + 0.5) / n;
                if let Some(c) = f(u, v) {
                    self.px[y * self.size + x] = c;
                }
            }
        }
    }

    fn rect(&mut self, u0: f32, v0: f32, u1: f32, v1: f32, c: Rgba) {
        self.shade(|u, v| (u >= u0 && u < u1 && v >= v0 && v < v1).then_some(c));
    }

    fn disc(&mut self, cu: f32, cv: f32, r: f32, c: Rgba) {
        self.shade(|u, v| ((u - cu).powi(2) + (v - cv).powi(2) <= r * r).then_some(c));
    }

    fn ring(&mut self, cu: f32, cv: f32, r_in: f32, r_out: f32, c: Rgba) {
        self.shade(|u, v| {
            let d2 = (u - cu).powi(2) + (v - cv).powi(2);
            (d2 >= r_in * r_in && d2 <= r_out * r_out).then_some(c)
        });
    }

    fn into_pixels(self) -> Vec<Rgba> {
        self.px
    }
}

fn paint(recipe: Recipe, size: usize) -> Vec<Rgba> {
    match recipe {
        Recipe::Brick => brick(size).into_pixels(),
        Recipe::BrickHole => {
            let mut c = brick(size);
            c.disc(0.5, 0.45, 0.2, 0xFF_3A2A22);
            c.disc(0.5, 0.45, 0.16, 0xFF_0A0A0A);
            c.into_pixels()
        }
        Recipe::BrickBanner => {
            let mut c = brick(size);
            c.rect(0.28, 0.0, 0.72, 0.78, 0xFF_C9A227);
            c.rect(0.32, 0.0, 0.68, 0.74, 0xFF_7A1020);
            c.disc(0.5, 0.36, 0.1, 0xFF_C9A227);
            c.into_pixels()
        }
        Recipe::MarkX(col) => {
            let mut c = Canvas::new(size, CLEAR);
            c.shade(|u, v| {
                let (du, dv) = (u - 0.5, v - 0.5);
                let inside = du.abs() < 0.36 && dv.abs() < 0.36;
                let on_diag = (du - dv).abs() < 0.1 || (du + dv).abs() < 0.1;
                (inside && on_diag).then_some(col)
            });
            c.into_pixels()
        }
        Recipe::MarkO(col) => {
            let mut c = Canvas::new(size, CLEAR);
            c.ring(0.5, 0.5, 0.24, 0.36, col);
            c.into_pixels()
        }
        Recipe::Avatar(col) => {
            let mut c = Canvas::new(size, CLEAR);
            c.rect(0.3, 0.42, 0.7, 0.95, col);
            c.disc(0.5, 0.26, 0.16, col);
            c.disc(0.44, 0.24, 0.035, 0xFF_101010);
            c.disc(0.56, 0.24, 0.035, 0xFF_101010);
            c.into_pixels()
        }
        Recipe::Skull => {
            let mut c = Canvas::new(size, CLEAR);
            c.disc(0.5, 0.45, 0.3, 0xFF_E6E0CF);
            c.rect(0.33, 0.6, 0.67, 0.86, 0xFF_E6E0CF);
            c.disc(0.39, 0.45, 0.08, 0xFF_141414);
            c.disc(0.61, 0.45, 0.08, 0xFF_141414);
            c.rect(0.47, 0.56, 0.53, 0.64, 0xFF_141414);
            for i in 0..4 {
                let u = 0.38 + i as f32 * 0.08;
                c.rect(u, 0.74, u + 0.02, 0.86, 0xFF_3C3C3C);
            }
            c.into_pixels()
        }
        Recipe::Chains => {
            let mut c = Canvas::new(size, CLEAR);
            for (cu, n) in [(0.35, 6), (0.65, 4)] {
                for i in 0..n {
                    let cv = 0.08 + i as f32 * 0.16;
                    c.ring(cu, cv, 0.04, 0.08, 0xFF_8C8C94);
                }
            }
            c.into_pixels()
        }
        Recipe::Lantern => {
            let mut c = Canvas::new(size, CLEAR);
            c.rect(0.46, 0.0, 0.54, 0.2, 0xFF_2A2A2A);
            c.rect(0.3, 0.2, 0.7, 0.26, 0xFF_2A2A2A);
            c.rect(0.33, 0.26, 0.67, 0.6, 0xFF_2A2A2A);
            c.rect(0.37, 0.29, 0.63, 0.57, 0xFF_FFD25A);
            c.disc(0.5, 0.43, 0.07, 0xFF_FFF6C8);
            c.rect(0.3, 0.6, 0.7, 0.65, 0xFF_2A2A2A);
            c.into_pixels()
        }
    }
}

/// Running bond: 4 courses, half-brick offset on odd rows.
fn brick(size: usize) -> Canvas {
    const MORTAR: Rgba = 0xFF_4B4B4B;
    let mut c = Canvas::new(size, MORTAR);
    c.shade(|u, v| {
        let row = (v * 4.0).floor();
        let shift = if row as i32 % 2 == 1 { 0.25 } else { 0.0 };
        let bu = (u + shift) * 2.0;
        let col = bu.floor();
        let (fu, fv) = (bu.fract(), (v * 4.0).fract());
        if fu < 0.04 || fv < 0.08 {
            return None;
        }
        // cheap per-brick tint
        let k = (row as u32 * 7 + col as u32 * 13) % 5;
        let r = 0x8C + k * 6;
        let g = 0x3C + k * 3;
        let b = 0x2C + k * 2;
        Some(0xFF00_0000 | r << 16 | g << 8 | b)
    });
    c
}

/*──────────────────────────────── Tests ───────────────────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::alpha;

    #[test]
    fn standard_manifest_loads() {
        let manifest = TextureManifest::standard();
        let bank = load_textures(&manifest, TEXTURE_SIZE).unwrap();
        assert_eq!(bank.len(), manifest.len());
        for e in manifest.entries() {
            let t = bank.texture(e.id).unwrap();
            assert_eq!(t.strip_count(), TEXTURE_SIZE);
            assert_eq!(t.height(), TEXTURE_SIZE);
            assert_eq!(t.name, e.name);
        }
        for m in Mark::BOTH {
            assert!(bank.contains(mark_texture(m)));
            assert!(bank.contains(avatar_texture(m)));
        }
    }

    #[test]
    fn walls_opaque_sprites_have_holes() {
        let bank = load_textures(&TextureManifest::standard(), TEXTURE_SIZE).unwrap();
        let brick = bank.texture(tex::WALL_BRICK).unwrap();
        for i in 0..brick.strip_count() {
            assert!(brick.strip(i).unwrap().iter().all(|&p| alpha(p) == 0xFF));
        }
        let x = bank.texture(tex::MARK_X).unwrap();
        // corners are see-through, the centre is painted
        assert_eq!(alpha(x.strip(0).unwrap()[0]), 0);
        assert_eq!(x.strip(32).unwrap()[32], COLOR_X);
    }

    #[test]
    fn wrong_size_is_rejected() {
        let err = load_textures(&TextureManifest::standard(), 32).unwrap_err();
        assert!(matches!(
            err,
            AssetError::Texture(TextureError::WrongWidth { got: 32, .. })
        ));
    }

    #[test]
    fn duplicate_manifest_id_is_rejected() {
        let mut m = TextureManifest::new();
        m.add(1, "a", Recipe::Brick).add(1, "b", Recipe::Skull);
        let err = load_textures(&m, TEXTURE_SIZE).unwrap_err();
        assert!(matches!(err, AssetError::Texture(TextureError::Duplicate(1))));
    }

    #[test]
    fn builtin_grid_has_textures() {
        let grid = load_grid(None).unwrap();
        let bank = load_textures(&TextureManifest::standard(), TEXTURE_SIZE).unwrap();
        assert!(check_grid_textures(&grid, &bank).is_empty());
    }

    #[test]
    fn unknown_wall_ids_reported_once() {
        let grid = Grid::parse("171\n9.9\n111\n").unwrap();
        let bank = load_textures(&TextureManifest::standard(), TEXTURE_SIZE).unwrap();
        assert_eq!(check_grid_textures(&grid, &bank), vec![7, 9]);
    }

    #[test]
    fn spawns_checked_against_map() {
        assert!(check_spawns(&Grid::arena()).is_empty());

        let tiny = Grid::parse("111\n1.1\n111\n").unwrap();
        assert_eq!(check_spawns(&tiny), vec![Mark::X, Mark::O]);

        // wall on X's spawn cell only
        let mut rows = vec![vec![0u8; 21]; 21];
        rows[SPAWN_X.y as usize][SPAWN_X.x as usize] = 1;
        let grid = Grid::from_rows(&rows).unwrap();
        assert_eq!(check_spawns(&grid), vec![Mark::X]);
    }

    #[test]
    fn missing_map_file_is_io_error() {
        let err = load_grid(Some(Path::new("/definitely/not/here.map"))).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn map_file_is_parsed() {
        let path = std::env::temp_dir().join(format!("raycastoe-test-{}.map", std::process::id()));
        fs::write(&path, "; tiny\n111\n1.1\n111\n").unwrap();
        let grid = load_grid(Some(&path)).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!((grid.width(), grid.height()), (3, 3));
        assert!(grid.is_walkable(glam::Vec2::new(1.5, 1.5)));
    }
}
