// File: src/persistence.rs
use crate::core::dictionary::Dictionary;
use crate::core::engine::LexConverter;
use crate::core::table::PhonemeTable;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// The serializable state of the engine: the expanded table plus every
/// per-pair dictionary derived so far.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct SerializableState {
    table: PhonemeTable,
    dictionaries: HashMap<(usize, usize), Dictionary>,
}

pub fn save_to_disk(engine: &LexConverter, path: &Path) -> Result<(), Error> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let state = SerializableState {
        table: engine.table.clone(),
        dictionaries: engine.dictionaries.clone(),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    bincode::serialize_into(writer, &state)
        .map_err(|e| Error::new(std::io::ErrorKind::Other, e))?;

    temp_file.persist(path)?;
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<LexConverter, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let state: SerializableState = bincode::deserialize_from(reader)?;

    let mut engine = LexConverter::new();
    engine.table = state.table;
    engine.dictionaries = state.dictionaries;

    Ok(engine)
}

/// Atomically replaces `path` with `contents`, so a half-written lexicon
/// never clobbers a good one.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        writer.write_all(contents)?;
        writer.flush()?;
    }
    temp_file.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.bin");

        let mut engine = LexConverter::new();
        let before = engine.convert("h@lou1", "festival", "espeak").unwrap();
        save_to_disk(&engine, &path).unwrap();

        let mut restored = load_from_disk(&path).unwrap();
        assert_eq!(restored.dictionaries.len(), 1);
        let after = restored.convert("h@lou1", "festival", "espeak").unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn atomic_write_replaces_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.txt");
        write_atomic(&path, b"first\n").unwrap();
        write_atomic(&path, b"second\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second\n");
    }
}
