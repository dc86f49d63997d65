//! # quadint-rs
//!
//! Converts quadtree tile addresses between a packed 64-bit "quadint" and its
//! "quadkey" string form.
//!
//! A quadint keeps the zoom level in its low 5 bits and one 2-bit quadrant digit
//! per level in its high bits, coarsest first. A quadkey is the same digits
//! written as '0'-'3', one character per level.
//!
//! ### 1. Free functions - the codec itself
//!
//! ```
//! use quadint_rs::{quadint_to_quadkey, quadkey_to_quadint};
//!
//! # fn main() -> Result<(), quadint_rs::QuadError> {
//! let quadint = quadkey_to_quadint("023")?;
//! assert_eq!(quadint & 0b11111, 3);
//! assert_eq!(quadint_to_quadkey(quadint), "023");
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `QuadKey` - validated addresses and tree navigation
//!
//! ```
//! use quadint_rs::QuadKey;
//!
//! # fn main() -> Result<(), quadint_rs::QuadError> {
//! let key: QuadKey = "1203".parse()?;
//! let parent = key.parent().unwrap();
//! assert_eq!(parent.to_string(), "120");
//! assert_eq!(key.children().len(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Arrow columns - bulk conversion
//!
//! ```
//! use arrow_array::UInt64Array;
//! use quadint_rs::quadints_to_quadkeys;
//!
//! let ints = UInt64Array::from(vec![(1u64 << 62) | 1, 0]);
//! let keys = quadints_to_quadkeys(&ints);
//! assert_eq!(keys.value(0), "1");
//! assert_eq!(keys.value(1), "");
//! ```
//!

pub mod api;
pub mod core;
pub mod util;

pub use api::{QuadKey, QuadKeysToArrow, quadints_to_quadkeys, quadkeys_to_quadints};
pub use core::{
    CodecConfig, DigitPolicy, MAX_LOSSLESS_ZOOM_LEVEL, MAX_ZOOM_LEVEL, QUADRANT_BITS,
    QUADRANT_MASK, TileCoord, ZOOM_BITS, ZOOM_MASK, digit_mask, digit_offset, quadint_to_quadkey,
    quadint_to_tile, quadkey_to_quadint, quadkey_to_tile, quadrant_at, tile_to_quadint,
    tile_to_quadkey, zoom_level,
};
pub use util::QuadError;

pub use arrow_array;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_workflow() -> Result<(), QuadError> {
        let tile = TileCoord::new(3, 5, 3);
        let key = QuadKey::from_tile(&tile)?;
        assert_eq!(key.as_str(), "213");

        let quadint = quadkey_to_quadint(key.as_str())?;
        assert_eq!(quadint, key.to_quadint());
        assert_eq!(zoom_level(quadint), 3);
        assert_eq!(quadint_to_quadkey(quadint), "213");
        assert_eq!(quadint_to_tile(quadint), tile);
        Ok(())
    }

    #[test]
    fn test_scenarios() -> Result<(), QuadError> {
        let one = (0b01u64 << 62) | 0b00001;
        assert_eq!(quadint_to_quadkey(one), "1");
        assert_eq!(quadkey_to_quadint("1")?, one);

        let quadint = quadkey_to_quadint("023")?;
        assert_eq!(quadint, (0b00u64 << 62) | (0b10 << 60) | (0b11 << 58) | 3);
        assert_eq!(quadint_to_quadkey(quadint), "023");

        assert!(matches!(
            quadkey_to_quadint("12a3"),
            Err(QuadError::InvalidDigit { .. })
        ));
        assert!(matches!(
            quadkey_to_quadint("999"),
            Err(QuadError::InvalidDigit { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_hierarchy_consistent_with_codec() -> Result<(), QuadError> {
        let key = QuadKey::new("0312")?;

        for ancestor in key.unwind() {
            let quadint = ancestor.to_quadint();
            assert_eq!(quadint_to_quadkey(quadint), ancestor.as_str());
            assert!(key.as_str().starts_with(ancestor.as_str()));
        }
        Ok(())
    }

    #[test]
    fn test_codec_is_shareable_across_threads() {
        let handles: Vec<_> = (0..8u64)
            .map(|i| {
                std::thread::spawn(move || {
                    let quadint = (i % 4) << 62 | 1;
                    quadkey_to_quadint(&quadint_to_quadkey(quadint)) == Ok(quadint)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().expect("worker panicked"));
        }
    }
}
