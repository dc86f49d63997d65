use crate::api::quad_arrow::QuadKeysToArrow;
use crate::core::codec::{
    digit_mask, digit_offset, quadint_to_quadkey, quadkey_to_quadint, zoom_level,
};
use crate::core::constants::{MAX_ZOOM_LEVEL, ZOOM_MASK};
use crate::core::tile::{TileCoord, tile_to_quadkey, validated_quadkey_to_tile};
use crate::util::error::QuadError;
use arrow_array::RecordBatch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated quadtree tile address.
///
/// Holds both the quadkey text and its packed quadint, so either form is
/// available without re-encoding.
///
/// # Example
///
/// ```
/// use quadint_rs::QuadKey;
///
/// # fn main() -> Result<(), quadint_rs::QuadError> {
/// let key = QuadKey::new("023")?;
/// assert_eq!(key.zoom_level(), 3);
///
/// let restored = QuadKey::from_quadint(key.to_quadint());
/// assert_eq!(key, restored);
///
/// let parent = key.parent().unwrap();
/// assert_eq!(parent.as_str(), "02");
/// assert_eq!(parent.is_ancestor_of(&key), Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuadKey {
    key: String,
    quadint: u64,
}

impl QuadKey {
    /// Parses and validates a quadkey (digits '0'-'3', at most 31 of them).
    pub fn new(key: impl Into<String>) -> Result<Self, QuadError> {
        let key = key.into();
        let quadint = quadkey_to_quadint(&key)?;
        Ok(Self { key, quadint })
    }

    /// Builds a quadkey from a packed quadint. Reserved bits are dropped.
    ///
    /// Above [`MAX_LOSSLESS_ZOOM_LEVEL`](crate::MAX_LOSSLESS_ZOOM_LEVEL) the
    /// finest digits share bits with the zoom field, so distinct keys can pack
    /// to the same quadint and `from_quadint(k.to_quadint())` may differ from `k`.
    pub fn from_quadint(quadint: u64) -> Self {
        let zoom = zoom_level(quadint);
        Self {
            key: quadint_to_quadkey(quadint),
            quadint: quadint & (digit_mask(zoom) | ZOOM_MASK),
        }
    }

    /// Builds the quadkey addressing a tile column/row.
    ///
    /// # Example
    /// ```
    /// use quadint_rs::{QuadKey, TileCoord};
    ///
    /// # fn main() -> Result<(), quadint_rs::QuadError> {
    /// let key = QuadKey::from_tile(&TileCoord::new(3, 5, 3))?;
    /// assert_eq!(key.as_str(), "213");
    /// assert_eq!(key.to_tile(), TileCoord::new(3, 5, 3));
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_tile(tile: &TileCoord) -> Result<Self, QuadError> {
        Self::new(tile_to_quadkey(tile)?)
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn zoom_level(&self) -> u8 {
        self.key.len() as u8
    }

    /// Packed form of this key. Not unique at zoom 30 and 31, see [`QuadKey::from_quadint`].
    pub fn to_quadint(&self) -> u64 {
        self.quadint
    }

    /// Tile column/row, computed from the key text so it is exact at every zoom.
    pub fn to_tile(&self) -> TileCoord {
        validated_quadkey_to_tile(&self.key)
    }

    /// The four children one level down, in digit order. Empty at zoom 31.
    pub fn children(&self) -> Vec<QuadKey> {
        let zoom = self.zoom_level();
        if zoom >= MAX_ZOOM_LEVEL {
            return Vec::new();
        }

        let base = self.quadint & !ZOOM_MASK;
        let offset = digit_offset(zoom as usize);
        (0..4u64)
            .map(|digit| {
                let mut key = String::with_capacity(zoom as usize + 1);
                key.push_str(&self.key);
                key.push(char::from(b'0' + digit as u8));
                QuadKey {
                    key,
                    quadint: base | (digit << offset) | (zoom as u64 + 1),
                }
            })
            .collect()
    }

    pub fn parent(&self) -> Option<QuadKey> {
        self.ancestor_at(self.zoom_level().checked_sub(1)?)
    }

    /// The ancestor (or self) at `level`, `None` if `level` is deeper than self.
    pub fn ancestor_at(&self, level: u8) -> Option<QuadKey> {
        if level > self.zoom_level() {
            return None;
        }
        Some(QuadKey {
            key: self.key[..level as usize].to_string(),
            quadint: (self.quadint & digit_mask(level)) | level as u64,
        })
    }

    /// If `self` is a strict ancestor of `other`, the number of levels between them.
    pub fn is_ancestor_of(&self, other: &QuadKey) -> Option<u8> {
        if self.zoom_level() >= other.zoom_level() || !other.key.starts_with(&self.key) {
            return None;
        }
        Some(other.zoom_level() - self.zoom_level())
    }

    pub fn is_descendant_of(&self, other: &QuadKey) -> Option<u8> {
        other.is_ancestor_of(self)
    }

    /// Self followed by each ancestor in descending level, stopping at level 1.
    pub fn unwind(&self) -> Vec<QuadKey> {
        (1..=self.zoom_level())
            .rev()
            .filter_map(|level| self.ancestor_at(level))
            .collect()
    }

    /// Converts this key to a single-row Arrow RecordBatch.
    pub fn to_record_batch(&self) -> Result<RecordBatch, QuadError> {
        std::slice::from_ref(self).to_record_batch()
    }
}

impl fmt::Display for QuadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl FromStr for QuadKey {
    type Err = QuadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for QuadKey {
    type Error = QuadError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        Self::new(key)
    }
}

impl From<QuadKey> for String {
    fn from(key: QuadKey) -> Self {
        key.key
    }
}

impl From<QuadKey> for u64 {
    fn from(key: QuadKey) -> Self {
        key.quadint
    }
}

impl AsRef<str> for QuadKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}
