/// Number of low bits holding the zoom level
pub const ZOOM_BITS: u32 = 5;

/// Mask selecting the zoom field
pub const ZOOM_MASK: u64 = 0b11111;

/// Width of one quadrant digit in bits
pub const QUADRANT_BITS: u32 = 2;

/// Mask selecting a single quadrant digit once shifted down
pub const QUADRANT_MASK: u64 = 0b11;

/// Maximum zoom level representable in the zoom field
pub const MAX_ZOOM_LEVEL: u8 = 31;

/// Highest zoom level whose digits stay clear of the zoom field.
///
/// At zoom 30 and 31 the finest digits land on bits 2-4, which are shared with
/// the zoom field, so those digits read back with the zoom bits OR'd in.
pub const MAX_LOSSLESS_ZOOM_LEVEL: u8 = 29;
