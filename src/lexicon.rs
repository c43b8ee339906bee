// src/lexicon.rs
//! Lexicon-file glue around the converter core: parsing pronunciation
//! dictionaries, converting their entries, and writing the destination
//! system's lexicon file shape. The core never touches files itself.

use crate::core::engine::LexConverter;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::io::{self, BufRead, Write};

/// One word with its pronunciation in some source notation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    pub pronunciation: String,
}

/// Part-of-speech tags that mark single-word Festival entries; anything else
/// is a multi-word entry and is skipped. The tag itself only gates parsing.
const FESTIVAL_POS: [&str; 11] = [
    "n", "v", "a", "cc", "dt", "in", "j", "k", "nil", "prp", "uh",
];

/// Parses a Festival/OALD scheme lexicon. Malformed lines are skipped, the
/// word is lowercased, and `((pos ...)` tails are stripped.
pub fn parse_festival_dict<R: BufRead>(reader: R) -> io::Result<Vec<LexiconEntry>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let mut line = line?.trim().to_string();
        if let Some(idx) = line.find("((pos") {
            line.truncate(idx);
        }
        let line = line.replace('"', "").replace('(', "").replace(')', "");
        let mut parts = line.split_whitespace();
        let (word, pos) = match (parts.next(), parts.next()) {
            (Some(word), Some(pos)) => (word, pos),
            _ => continue,
        };
        if !FESTIVAL_POS.contains(&pos) {
            continue;
        }
        let pronunciation = parts.collect::<Vec<_>>().join(" ");
        if pronunciation.is_empty() {
            continue;
        }
        entries.push(LexiconEntry {
            word: word.to_lowercase(),
            pronunciation,
        });
    }
    Ok(entries)
}

/// Parses espeak `en_extra`-style lines: word followed by one pronunciation
/// token; anything after that (comments, flags) is ignored.
pub fn parse_espeak_lexicon<R: BufRead>(reader: R) -> io::Result<Vec<LexiconEntry>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        if let (Some(word), Some(pronunc)) = (parts.next(), parts.next()) {
            entries.push(LexiconEntry {
                word: word.to_string(),
                pronunciation: pronunc.to_string(),
            });
        }
    }
    Ok(entries)
}

/// Parses cepstral `lexicon.txt` lines: word, a flag field, then the
/// space-separated pronunciation.
pub fn parse_cepstral_lexicon<R: BufRead>(reader: R) -> io::Result<Vec<LexiconEntry>> {
    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let (word, _flag) = match (parts.next(), parts.next()) {
            (Some(word), Some(flag)) => (word, flag),
            _ => continue,
        };
        let pronunciation = parts.collect::<Vec<_>>().join(" ");
        if pronunciation.is_empty() {
            continue;
        }
        entries.push(LexiconEntry {
            word: word.to_string(),
            pronunciation,
        });
    }
    Ok(entries)
}

/// Wraps a single converted pronunciation in the destination system's inline
/// phoneme markup. Falls back to the bare pronunciation for notations with
/// no inline form.
pub fn inline_markup(notation: &str, pronunc: &str) -> String {
    match notation {
        "espeak" => format!("[[{}]]", pronunc),
        "mac" => format!("[[inpt PHON]]{}[[inpt TEXT]]", pronunc),
        "sapi" => format!("<pron sym=\"{}\"/>", pronunc),
        "cepstral" => format!("<phoneme ph='{}'>p</phoneme>", pronunc),
        "acapela-uk" => format!("\\Prn={}\\", pronunc),
        "bbcmicro" => format!("*SPEAK {}", pronunc),
        _ => pronunc.to_string(),
    }
}

/// Converts every entry from `source` notation and writes a `dest`-shaped
/// lexicon file body, including any preamble/postamble the format needs.
pub fn write_lexicon<W: Write>(
    engine: &mut LexConverter,
    entries: &[LexiconEntry],
    source: &str,
    dest: &str,
    out: &mut W,
) -> Result<(), Box<dyn Error>> {
    match dest {
        "mac" => write!(
            out,
            "# Pipe your text through this 'sed' command\n# to put the pronunciations inline:\n\nsed"
        )?,
        "sapi" => write!(
            out,
            "rem  Run this file with ptts.exe in the same directory\nrem  to add these words to the SAPI lexicon\n\n"
        )?,
        "unicode-ipa" => write!(
            out,
            "<HTML><HEAD>\n<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=utf-8\">\n</HEAD><BODY><TABLE>\n"
        )?,
        _ => {}
    }

    for entry in entries {
        let pronunc = engine.convert(&entry.pronunciation, source, dest)?;
        match dest {
            "espeak" => writeln!(out, "{} {}", entry.word, pronunc)?,
            "sapi" => writeln!(out, "ptts -la {} \"{}\"", entry.word, pronunc)?,
            "cepstral" => writeln!(out, "{} 0 {}", entry.word.to_lowercase(), pronunc)?,
            "mac" => write!(
                out,
                " -e \"s/{}/[[inpt PHON]]{}[[inpt TEXT]]/g\"",
                entry.word, pronunc
            )?,
            "bbcmicro" => {
                // Whole-word entry marker: the word, '_', then a top-bit-set
                // byte before the phonemes.
                write!(out, "> {}_", entry.word.to_uppercase())?;
                out.write_all(&[0x80])?;
                write!(out, "{}", pronunc)?;
            }
            "unicode-ipa" => writeln!(
                out,
                "<TR><TD>{}</TD><TD>{}</TD></TR>",
                entry.word, pronunc
            )?,
            other => {
                return Err(format!("writing a '{}' lexicon is not supported", other).into());
            }
        }
    }

    match dest {
        "mac" => writeln!(out)?,
        "bbcmicro" => write!(out, ">**")?,
        "unicode-ipa" => write!(out, "</TABLE></BODY></HTML>\n")?,
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn festival_dict_lines_parse() {
        let input = b"( \"hello\" n ( h @ l ou1 ) ) ((pos extra))\n\
                      garbage line\n\
                      ( \"the cat\" phrase ( dh @ ) )\n\
                      ( \"Cat\" n ( k a t ) )\n" as &[u8];
        let entries = parse_festival_dict(input).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].word, "hello");
        assert_eq!(entries[0].pronunciation, "h @ l ou1");
        // Multi-word POS tags are skipped; words come out lowercased.
        assert_eq!(entries[1].word, "cat");
    }

    #[test]
    fn espeak_lexicon_lines_parse() {
        let input = b"hello h@l'oU // from somewhere\nshort\n" as &[u8];
        let entries = parse_espeak_lexicon(input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "hello");
        assert_eq!(entries[0].pronunciation, "h@l'oU");
    }

    #[test]
    fn cepstral_lexicon_lines_parse() {
        let input = b"hello 0 h ih l ow1\n" as &[u8];
        let entries = parse_cepstral_lexicon(input).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].pronunciation, "h ih l ow1");
    }

    #[test]
    fn inline_markup_wraps_per_notation() {
        assert_eq!(inline_markup("espeak", "h@l'oU"), "[[h@l'oU]]");
        assert_eq!(inline_markup("acapela-uk", "h e l"), "\\Prn=h e l\\");
        assert_eq!(inline_markup("festival", "h @ l"), "h @ l");
    }

    #[test]
    fn espeak_lexicon_body_is_word_pronunciation_lines() {
        let mut engine = LexConverter::new();
        let entries = vec![LexiconEntry {
            word: "hello".to_string(),
            pronunciation: "h@lou1".to_string(),
        }];
        let mut out = Vec::new();
        write_lexicon(&mut engine, &entries, "festival", "espeak", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "hello h@l'oU\n");
    }

    #[test]
    fn unicode_ipa_lexicon_is_an_html_table() {
        let mut engine = LexConverter::new();
        let entries = vec![LexiconEntry {
            word: "cat".to_string(),
            pronunciation: "k a t".to_string(),
        }];
        let mut out = Vec::new();
        write_lexicon(&mut engine, &entries, "festival", "unicode-ipa", &mut out).unwrap();
        let html = String::from_utf8(out).unwrap();
        assert!(html.starts_with("<HTML>"));
        assert!(html.contains("<TR><TD>cat</TD><TD>k\u{e6}t</TD></TR>"));
        assert!(html.ends_with("</TABLE></BODY></HTML>\n"));
    }
}
