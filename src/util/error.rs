/// Error type for quadint-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum QuadError {
    /// A quadkey character is not an accepted quadrant digit; `position` is a byte offset.
    InvalidDigit { position: usize, character: char },
    /// The quadkey is longer (in bytes) than the 5-bit zoom field can hold (max 31).
    ZoomOutOfRange(usize),
    /// The tile column or row does not fit in a `2^zoom` grid.
    TileOutOfRange { x: u32, y: u32, zoom: u8 },
    /// Building an Arrow array or RecordBatch failed.
    ArrowError(String),
}

impl std::fmt::Display for QuadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuadError::InvalidDigit {
                position,
                character,
            } => write!(
                f,
                "Invalid quadkey digit {:?} at position {}",
                character, position
            ),
            QuadError::ZoomOutOfRange(len) => {
                write!(f, "Quadkey length {} exceeds maximum zoom level 31", len)
            }
            QuadError::TileOutOfRange { x, y, zoom } => {
                write!(f, "Tile ({}, {}) is outside the grid at zoom {}", x, y, zoom)
            }
            QuadError::ArrowError(msg) => write!(f, "Arrow error: {}", msg),
        }
    }
}

impl std::error::Error for QuadError {}
