pub mod quad_arrow;
pub mod quad_key;

pub use quad_arrow::{QuadKeysToArrow, quadints_to_quadkeys, quadkeys_to_quadints};
pub use quad_key::QuadKey;
