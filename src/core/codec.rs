use crate::core::constants::{MAX_ZOOM_LEVEL, QUADRANT_BITS, QUADRANT_MASK, ZOOM_MASK};
use crate::util::error::QuadError;
use serde::{Deserialize, Serialize};

/// Which characters `quadkey_to_quadint` accepts as quadrant digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitPolicy {
    /// Only '0'-'3' are accepted
    #[default]
    Strict,
    /// Any ASCII decimal digit is accepted and packed as-is.
    ///
    /// Digits 4-9 do not fit in two bits and spill into the neighbouring digit
    /// (or off the top of the word). Kept for compatibility with producers that
    /// never validated their keys.
    Permissive,
}

impl DigitPolicy {
    fn parse(self, character: char) -> Option<u8> {
        match self {
            DigitPolicy::Strict => match character {
                '0'..='3' => Some(character as u8 - b'0'),
                _ => None,
            },
            DigitPolicy::Permissive => character.to_digit(10).map(|d| d as u8),
        }
    }
}

/// Decoding configuration.
///
/// # Example
/// ```
/// use quadint_rs::{CodecConfig, DigitPolicy};
///
/// let config = CodecConfig::new().digit_policy(DigitPolicy::Permissive);
/// assert!(config.decode("4").is_ok());
/// assert!(CodecConfig::new().decode("4").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub digit_policy: DigitPolicy,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn digit_policy(mut self, policy: DigitPolicy) -> Self {
        self.digit_policy = policy;
        self
    }

    /// Decodes a quadkey into a quadint under this configuration.
    ///
    /// Length and positions are measured in bytes, like the zoom field they
    /// feed. Every accepted digit is ASCII, so a byte offset before the first
    /// rejected character is also its digit index.
    ///
    /// # Errors
    ///
    /// - [`QuadError::ZoomOutOfRange`] - the key is longer than 31 bytes
    /// - [`QuadError::InvalidDigit`] - a character is rejected by the digit policy
    pub fn decode(&self, quadkey: &str) -> Result<u64, QuadError> {
        let zoom = quadkey.len();
        if zoom > MAX_ZOOM_LEVEL as usize {
            tracing::trace!(zoom, "rejecting over-long quadkey");
            return Err(QuadError::ZoomOutOfRange(zoom));
        }

        let mut quadint = 0u64;
        for (position, character) in quadkey.char_indices() {
            let digit = self.digit_policy.parse(character).ok_or_else(|| {
                tracing::trace!(position, ?character, "rejecting quadkey digit");
                QuadError::InvalidDigit {
                    position,
                    character,
                }
            })?;
            quadint |= (digit as u64) << digit_offset(position);
        }

        Ok(quadint | zoom as u64)
    }
}

/// Reads the zoom level from the low 5 bits of a quadint.
#[inline]
pub fn zoom_level(quadint: u64) -> u8 {
    (quadint & ZOOM_MASK) as u8
}

/// Bit offset of the quadrant digit at `index` (0 = coarsest).
#[inline]
pub fn digit_offset(index: usize) -> u32 {
    u64::BITS - (index as u32 + 1) * QUADRANT_BITS
}

/// Mask covering the top `2 * zoom` digit bits.
#[inline]
pub fn digit_mask(zoom: u8) -> u64 {
    match zoom {
        0 => 0,
        z => u64::MAX << digit_offset(z as usize - 1),
    }
}

/// Extracts the quadrant digit at `index` (0 = coarsest) from a quadint.
#[inline]
pub fn quadrant_at(quadint: u64, index: usize) -> u8 {
    ((quadint >> digit_offset(index)) & QUADRANT_MASK) as u8
}

/// Converts a quadint to its quadkey string.
///
/// Reads the zoom from bits 0-4 and emits that many digits, taken two bits at a
/// time from the top of the word. Never fails; zoom 0 gives an empty string.
///
/// # Example
/// ```
/// use quadint_rs::quadint_to_quadkey;
///
/// let quadint = (1u64 << 62) | 1;
/// assert_eq!(quadint_to_quadkey(quadint), "1");
/// assert_eq!(quadint_to_quadkey(0), "");
/// ```
pub fn quadint_to_quadkey(quadint: u64) -> String {
    let zoom = zoom_level(quadint) as usize;
    let mut quadkey = String::with_capacity(zoom);

    for index in 0..zoom {
        quadkey.push(char::from(b'0' + quadrant_at(quadint, index)));
    }

    quadkey
}

/// Converts a quadkey string to its quadint, accepting only digits '0'-'3'.
///
/// The key length becomes the zoom field; each digit is OR'd in two bits at a
/// time from the top of the word. Any rejected character aborts the whole
/// conversion, no partial value is returned.
///
/// Use [`CodecConfig`] to opt into the legacy permissive digit handling.
///
/// # Example
/// ```
/// use quadint_rs::{quadkey_to_quadint, QuadError};
///
/// assert_eq!(quadkey_to_quadint("1")?, (1u64 << 62) | 1);
/// assert_eq!(quadkey_to_quadint("")?, 0);
/// assert!(quadkey_to_quadint("12a3").is_err());
/// # Ok::<(), QuadError>(())
/// ```
///
/// # Errors
///
/// - [`QuadError::ZoomOutOfRange`] - the key is longer than 31 bytes
/// - [`QuadError::InvalidDigit`] - a character is not one of '0'-'3'
pub fn quadkey_to_quadint(quadkey: &str) -> Result<u64, QuadError> {
    CodecConfig::default().decode(quadkey)
}
