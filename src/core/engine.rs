use crate::core::converter;
use crate::core::dictionary::Dictionary;
use crate::core::table::PhonemeTable;
use crate::core::types::ConvertError;
use crate::persistence::{load_from_disk, save_to_disk};
use std::collections::HashMap;
use std::path::Path;

/// Drives conversions. Owns the expanded correspondence table, built once
/// and immutable afterwards, and a keyed cache of per-pair dictionaries so
/// that alternating between notation pairs never invalidates earlier work.
pub struct LexConverter {
    pub(crate) table: PhonemeTable,
    pub(crate) dictionaries: HashMap<(usize, usize), Dictionary>,
    snapshot_path: Option<String>,
}

impl LexConverter {
    pub fn new() -> Self {
        Self {
            table: PhonemeTable::build(),
            dictionaries: HashMap::new(),
            snapshot_path: None,
        }
    }

    /// Restores a saved engine snapshot, or builds a fresh engine if the
    /// snapshot is missing or unreadable. Future `save_snapshot` calls will
    /// write back to the same path.
    pub fn from_file_or_new(path: &str) -> Self {
        let mut engine = load_from_disk(Path::new(path)).unwrap_or_else(|_| Self::new());
        engine.snapshot_path = Some(path.to_string());
        engine
    }

    /// Converts one pronunciation string between notations. The first call
    /// for a (source, dest) pair derives and caches its dictionary.
    pub fn convert(
        &mut self,
        pronunc: &str,
        source: &str,
        dest: &str,
    ) -> Result<String, ConvertError> {
        let source_col = self.table.column(source)?;
        let dest_col = self.table.column(dest)?;
        if !self.dictionaries.contains_key(&(source_col, dest_col)) {
            let dict = Dictionary::build(&self.table, source_col, dest_col);
            self.dictionaries.insert((source_col, dest_col), dict);
        }
        let dict = &self.dictionaries[&(source_col, dest_col)];
        converter::convert(dict, pronunc, source, dest)
    }

    pub fn save_snapshot(&self) -> Result<(), std::io::Error> {
        if let Some(path) = &self.snapshot_path {
            save_to_disk(self, Path::new(path))
        } else {
            Ok(())
        }
    }
}

impl Default for LexConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dictionaries_are_cached_per_pair() {
        let mut engine = LexConverter::new();
        engine.convert("k", "festival", "espeak").unwrap();
        engine.convert("t", "festival", "espeak").unwrap();
        assert_eq!(engine.dictionaries.len(), 1);
        engine.convert("k", "espeak", "festival").unwrap();
        assert_eq!(engine.dictionaries.len(), 2);
        // Going back to the first pair reuses its cache entry.
        engine.convert("t", "festival", "espeak").unwrap();
        assert_eq!(engine.dictionaries.len(), 2);
    }

    #[test]
    fn identity_conversion_is_tolerated() {
        let mut engine = LexConverter::new();
        assert_eq!(engine.convert("k a t", "festival", "festival").unwrap(), "k a t");
    }

    #[test]
    fn snapshot_path_round_trips_through_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.bin");
        let path = path.to_str().unwrap();

        // No snapshot yet: a fresh engine comes up empty.
        let mut engine = LexConverter::from_file_or_new(path);
        assert!(engine.dictionaries.is_empty());
        let before = engine.convert("h@lou1", "festival", "espeak").unwrap();
        engine.save_snapshot().unwrap();

        // A second engine restores the cached dictionary from the same path.
        let mut restored = LexConverter::from_file_or_new(path);
        assert_eq!(restored.dictionaries.len(), 1);
        assert_eq!(restored.convert("h@lou1", "festival", "espeak").unwrap(), before);
    }
}
