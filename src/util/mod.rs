pub mod error;

pub use error::QuadError;
