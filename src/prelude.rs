//! Prelude module for astro_numerology crate.
//!
//! Re-exports the derive_more macros used by the value types.

pub use derive_more::{Display, From, Into};
