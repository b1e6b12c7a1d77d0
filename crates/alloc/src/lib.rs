//! Storage for a growable contiguous array.
//!
//! [`Array`] owns a raw slot buffer and keeps construction and destruction of elements apart
//! from reserving and freeing that buffer. [`Cursor`] is a random-access position into it.

pub mod config;
pub mod containers;
pub mod error;
pub mod ptr;
mod raw;

pub use config::GrowthPolicy;
pub use containers::Array;
pub use error::{AllocError, OutOfRange};
pub use ptr::Cursor;
