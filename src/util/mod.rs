//! Utility types for the ccbi crate.
//!
//! This module contains the fundamental pieces used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from `glam`

mod error;
mod math;

pub use error::*;
pub use math::*;
