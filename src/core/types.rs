// src/core/types.rs
use std::error::Error;
use std::fmt;

/// A raw cell of the authored correspondence table, before expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawCell {
    /// A concrete spelling. The empty string means "no symbol in this notation".
    Tok(&'static str),
    /// Inherit this column's value from the previous resolved row.
    Ditto,
    /// Alternative spellings: any of them matches on input, the first is
    /// canonical on output.
    Alt(&'static [&'static str]),
}

/// Errors surfaced by a conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The named notation is not a column of the correspondence table.
    UnknownNotation(String),
    /// A stress mark appeared before any vowel had been emitted, so there is
    /// no syllable nucleus to attach it to.
    NoVowelForStress,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::UnknownNotation(name) => {
                write!(f, "unknown notation '{}'", name)
            }
            ConvertError::NoVowelForStress => {
                write!(f, "no vowel found for stress placement")
            }
        }
    }
}

impl Error for ConvertError {}
