// src/core/dictionary.rs
use crate::core::table::{PhonemeTable, ESPEAK_COL, ESPEAK_CONSONANTS};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The lookup data derived from the table for one (source, destination)
/// notation pair.
#[derive(Clone, Serialize, Deserialize)]
pub struct Dictionary {
    /// Source token to destination token. A value may be a space-joined
    /// compound of several destination phonemes.
    pub map: HashMap<String, String>,
    /// The destination notation's syllable-separator token.
    pub syllable_sep: String,
    /// Destination tokens whose espeak-column spelling is built entirely
    /// from the consonant alphabet.
    pub consonants: HashSet<String>,
}

impl Dictionary {
    /// Scans the expanded table once. The first occurrence of a source token
    /// wins; later duplicate rows only backfill keys that are still missing.
    pub fn build(table: &PhonemeTable, source: usize, dest: usize) -> Self {
        let mut map: HashMap<String, String> = HashMap::new();
        let mut consonants = HashSet::new();
        let syllable_sep = table.rows()[0][dest].clone();

        for row in table.rows() {
            map.entry(row[source].clone())
                .or_insert_with(|| row[dest].clone());
            if row[ESPEAK_COL]
                .chars()
                .all(|c| ESPEAK_CONSONANTS.contains(c))
            {
                consonants.insert(row[dest].clone());
            }
        }

        Dictionary {
            map,
            syllable_sep,
            consonants,
        }
    }

    pub fn is_consonant(&self, token: &str) -> bool {
        self.consonants.contains(token)
    }
}
