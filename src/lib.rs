// src/lib.rs

pub mod core;
pub mod lexicon;
pub mod persistence;

pub use crate::core::engine::LexConverter;
pub use crate::core::equivalence::equivalent;
pub use crate::core::types::ConvertError;
