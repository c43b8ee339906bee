pub mod converter;
pub mod dictionary;
pub mod engine;
pub mod equivalence;
pub mod normalizer;
pub mod table;
pub mod types;
