pub mod codec;
pub mod constants;
pub mod tile;

pub use codec::{
    CodecConfig, DigitPolicy, digit_mask, digit_offset, quadint_to_quadkey, quadkey_to_quadint,
    quadrant_at, zoom_level,
};
pub use constants::{
    MAX_LOSSLESS_ZOOM_LEVEL, MAX_ZOOM_LEVEL, QUADRANT_BITS, QUADRANT_MASK, ZOOM_BITS, ZOOM_MASK,
};
pub use tile::{TileCoord, quadint_to_tile, quadkey_to_tile, tile_to_quadint, tile_to_quadkey};
