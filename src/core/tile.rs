use crate::core::codec::{digit_offset, quadkey_to_quadint, quadrant_at, zoom_level};
use crate::core::constants::MAX_ZOOM_LEVEL;
use crate::util::error::QuadError;
use serde::{Deserialize, Serialize};

/// Tile column/row in a `2^zoom x 2^zoom` grid, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, zoom: u8) -> Self {
        Self { x, y, zoom }
    }

    fn validate(&self) -> Result<(), QuadError> {
        if self.zoom > MAX_ZOOM_LEVEL {
            return Err(QuadError::ZoomOutOfRange(self.zoom as usize));
        }
        if (self.x as u64) >> self.zoom != 0 || (self.y as u64) >> self.zoom != 0 {
            return Err(QuadError::TileOutOfRange {
                x: self.x,
                y: self.y,
                zoom: self.zoom,
            });
        }
        Ok(())
    }

    /// Quadrant digit at `index` (0 = coarsest): x bit + 2 * y bit.
    fn digit(&self, index: usize) -> u8 {
        let bit = self.zoom as usize - index - 1;
        let x_bit = (self.x >> bit) & 1;
        let y_bit = (self.y >> bit) & 1;
        (x_bit | (y_bit << 1)) as u8
    }

    fn push_digit(&mut self, digit: u8) {
        self.x = (self.x << 1) | (digit & 1) as u32;
        self.y = (self.y << 1) | ((digit >> 1) & 1) as u32;
        self.zoom += 1;
    }
}

/// Packs a tile coordinate directly into a quadint.
///
/// # Example
/// ```
/// use quadint_rs::{tile_to_quadint, quadint_to_quadkey, TileCoord};
///
/// let quadint = tile_to_quadint(&TileCoord::new(3, 5, 3))?;
/// assert_eq!(quadint_to_quadkey(quadint), "213");
/// # Ok::<(), quadint_rs::QuadError>(())
/// ```
///
/// # Errors
///
/// - [`QuadError::ZoomOutOfRange`] - zoom above 31
/// - [`QuadError::TileOutOfRange`] - x or y not below `2^zoom`
pub fn tile_to_quadint(tile: &TileCoord) -> Result<u64, QuadError> {
    tile.validate()?;

    let quadint = (0..tile.zoom as usize).fold(0u64, |acc, index| {
        acc | (tile.digit(index) as u64) << digit_offset(index)
    });

    Ok(quadint | tile.zoom as u64)
}

/// Unpacks a quadint into a tile coordinate.
///
/// At zoom 30 and 31 the finest digits are read through the zoom field, see
/// [`MAX_LOSSLESS_ZOOM_LEVEL`](crate::MAX_LOSSLESS_ZOOM_LEVEL).
pub fn quadint_to_tile(quadint: u64) -> TileCoord {
    let zoom = zoom_level(quadint);
    let mut tile = TileCoord::new(0, 0, 0);
    for index in 0..zoom as usize {
        tile.push_digit(quadrant_at(quadint, index));
    }
    tile
}

/// Builds the quadkey for a tile coordinate.
///
/// # Errors
///
/// Same as [`tile_to_quadint`].
pub fn tile_to_quadkey(tile: &TileCoord) -> Result<String, QuadError> {
    tile.validate()?;
    Ok((0..tile.zoom as usize)
        .map(|index| char::from(b'0' + tile.digit(index)))
        .collect())
}

/// Parses a quadkey into its tile coordinate.
///
/// # Errors
///
/// Same as [`quadkey_to_quadint`].
pub fn quadkey_to_tile(quadkey: &str) -> Result<TileCoord, QuadError> {
    quadkey_to_quadint(quadkey)?;
    Ok(validated_quadkey_to_tile(quadkey))
}

/// Caller guarantees every byte is '0'-'3' and the length is at most 31.
pub(crate) fn validated_quadkey_to_tile(quadkey: &str) -> TileCoord {
    let mut tile = TileCoord::new(0, 0, 0);
    for byte in quadkey.bytes() {
        tile.push_digit(byte - b'0');
    }
    tile
}
