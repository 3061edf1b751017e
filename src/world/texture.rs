// Format-agnostic repository of textures produced by the asset stage.
// The renderer and game logic interact through `TextureId` only.

use std::collections::HashMap;

use crate::renderer::Rgba;

/// Runtime handle for a texture in the bank.
///
/// * `1 ..= 127`  – wall textures (equal to the grid tile id).
/// * `128 ..= 255` – sprite textures.
pub type TextureId = u8;

/// First id of the sprite range.
pub const FIRST_SPRITE_ID: TextureId = 128;

/// Things that can go wrong when building or using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Width or height of zero, or a pixel count that does not match.
    #[error("texture `{name}` has bad dimensions {w}x{h} for {len} pixels")]
    BadSize {
        name: String,
        w: usize,
        h: usize,
        len: usize,
    },

    /// Raycast textures must have exactly the configured number of strips.
    #[error("texture `{name}` is {got} px wide, expected {expected}")]
    WrongWidth {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Attempted to insert a second texture under an existing id.
    #[error("texture id {0} already present in bank")]
    Duplicate(TextureId),

    /// Requested id was never loaded.
    #[error("texture id {0} not in bank")]
    Missing(TextureId),
}

/// A texture pre-sliced into 1-pixel-wide vertical strips.
///
/// Pixels are 0xAARRGGBB and stored **column-major**, so strip `i` is the
/// contiguous slice `columns[i*h .. (i+1)*h]` and the renderer can pick it
/// in O(1).
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    w: usize,
    h: usize,
    columns: Vec<Rgba>,
}

impl Texture {
    /// Slice a row-major image into vertical strips.
    pub fn from_rows<S: Into<String>>(
        name: S,
        w: usize,
        h: usize,
        rows: &[Rgba],
    ) -> Result<Self, TextureError> {
        let name = name.into();
        if w == 0 || h == 0 || rows.len() != w * h {
            return Err(TextureError::BadSize {
                name,
                w,
                h,
                len: rows.len(),
            });
        }

        let mut columns = Vec::with_capacity(w * h);
        for x in 0..w {
            columns.extend((0..h).map(|y| rows[y * w + x]));
        }
        Ok(Self { name, w, h, columns })
    }

    /// Number of vertical strips (= width in pixels).
    #[inline]
    pub fn strip_count(&self) -> usize {
        self.w
    }

    /// Height of every strip.
    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Strip `i`, or `None` when out of range.
    #[inline]
    pub fn strip(&self, i: usize) -> Option<&[Rgba]> {
        if i < self.w {
            Some(&self.columns[i * self.h..(i + 1) * self.h])
        } else {
            None
        }
    }
}

/// Immutable id → texture cache handed from the asset stage to the renderer.
///
/// * Does **not** know where pixels came from – that's the loader's job.
/// * Lookups of unknown ids fail softly with [`TextureError::Missing`].
#[derive(Debug, Default)]
pub struct TextureBank {
    data: HashMap<TextureId, Texture>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of textures stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, id: TextureId) -> bool {
        self.data.contains_key(&id)
    }

    /// Borrow a texture by id.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(&id).ok_or(TextureError::Missing(id))
    }

    /// Insert a texture under `id`; fails if the id is taken.
    pub fn insert(&mut self, id: TextureId, tex: Texture) -> Result<(), TextureError> {
        if self.data.contains_key(&id) {
            return Err(TextureError::Duplicate(id));
        }
        self.data.insert(id, tex);
        Ok(())
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(w: usize, h: usize) -> Texture {
        let rows: Vec<Rgba> = (0..w * h).map(|i| i as Rgba).collect();
        Texture::from_rows("GRADIENT", w, h, &rows).unwrap()
    }

    #[test]
    fn strips_are_columns() {
        let tex = gradient(3, 2);
        // rows: [0 1 2] / [3 4 5]
        assert_eq!(tex.strip_count(), 3);
        assert_eq!(tex.strip(0).unwrap(), &[0, 3]);
        assert_eq!(tex.strip(2).unwrap(), &[2, 5]);
        assert_eq!(tex.strip(3), None);
    }

    #[test]
    fn bad_size_rejected() {
        let err = Texture::from_rows("X", 2, 2, &[0; 3]).unwrap_err();
        assert!(matches!(err, TextureError::BadSize { len: 3, .. }));
        assert!(Texture::from_rows("X", 0, 0, &[]).is_err());
    }

    #[test]
    fn insert_and_lookup() {
        let mut bank = TextureBank::new();
        bank.insert(1, gradient(2, 2)).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.texture(1).unwrap().strip_count(), 2);
        assert_eq!(bank.texture(7).unwrap_err(), TextureError::Missing(7));
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut bank = TextureBank::new();
        bank.insert(3, gradient(1, 1)).unwrap();
        let err = bank.insert(3, gradient(1, 1)).unwrap_err();
        assert_eq!(err, TextureError::Duplicate(3));
        assert_eq!(bank.len(), 1);
    }
}
