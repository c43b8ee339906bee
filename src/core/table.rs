// src/core/table.rs
//! The phoneme correspondence table.
//!
//! One row per phoneme unit, one column per supported notation. The table is
//! authored in a compact form: a cell is either a concrete spelling, a ditto
//! mark (inherit the previous row's value for that column), or a list of
//! alternative spellings (all match on input, the first is canonical on
//! output). `PhonemeTable::build` resolves dittos and expands the lists into
//! the flat form used for lookups.

use crate::core::types::{ConvertError, RawCell};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of notation columns.
pub const COLUMNS: usize = 11;

/// The notation header. Adding a notation means adding a column.
pub static NOTATIONS: [&str; COLUMNS] = [
    "festival",
    "espeak",
    "sapi",
    "cepstral",
    "mac",
    "x-sampa",
    "acapela-uk",
    "cmu",
    "ms-sapi",
    "bbcmicro",
    "unicode-ipa",
];

/// Column whose spellings decide consonant-ness for every destination.
pub const ESPEAK_COL: usize = 1;

/// Letters an espeak spelling may use and still count as a pure consonant.
pub const ESPEAK_CONSONANTS: &str = "bdDfghklmnNprsStTvwjzZ";

/// Notations whose words are space-separated, so phonemes within a word are
/// butted together with no separator.
pub static SPACE_SEPARATES_WORDS: [&str; 5] =
    ["espeak", "mac", "unicode-ipa", "x-sampa", "bbcmicro"];

use RawCell::{Alt as A, Ditto as D, Tok as T};

/// The authored rows. The first row must be the syllable separator and must
/// be fully concrete. Trailing rows re-list spellings of the neutral vowel so
/// that every notation's dictionary has a '@'-keyed entry (first occurrence
/// wins, so these only backfill columns that had no such key yet).
static RAW_ROWS: [[RawCell; COLUMNS]; 102] = [
    [T("0"), T("%"), T("-"), T("0"), T("="), T("."), T(""), T("0"), T("."), T(""), T(".")],
    [T("1"), T("'"), T("1"), T("1"), T("1"), T("\""), D, T("1"), T("1"), T("1"), T("\u{2c8}")],
    [T("2"), T(","), T("2"), T("0"), T("2"), T("%"), D, T("2"), T("2"), T("2"), T("\u{2cc}")],
    [T(""), T(""), T(""), T(""), T(""), T(""), D, T(""), T("-"), T(""), T("-")],
    [D, D, D, D, D, D, D, D, T("#"), T(""), T("#")],
    [D, D, D, D, D, D, D, D, T(" "), T(""), T(" ")],
    [D, D, D, D, D, D, D, D, T("_"), T(""), T("_")],
    [D, D, D, D, D, D, D, D, T("?"), T(""), T("?")],
    [D, D, D, D, D, D, D, D, T("!"), T(""), T("!")],
    [D, D, D, D, D, D, D, D, T(","), T(""), T(",")],
    [T("aa"), A(&["A:", "A@", "aa"]), T("aa"), T("a"), T("AA"), T("A"), T("A:"), T("AA"), T("aa"), T("AA"), T("\u{251}")],
    [D, T("A"), D, D, D, D, D, T("2"), D, D, T("\u{2051}")],
    [D, T("A:"), D, D, D, T(":"), D, T("1"), D, D, T("\u{2d0}")],
    [D, D, D, D, D, T("A:"), D, T("AA"), D, D, T("\u{251}\u{2d0}")],
    [D, D, D, D, D, T("Ar\\"), D, D, D, D, T("\u{251}\u{279}")],
    [D, D, D, D, T("aa"), T("a:"), D, D, D, D, T("a\u{2d0}")],
    [T("a"), A(&["a", "&"]), T("ae"), T("ae"), T("AE"), T("{"), T("{"), T("AE"), T("ae"), T("AE"), A(&["\u{e6}", "a"])],
    [T("uh"), T("V"), T("ah"), T("ah"), T("UX"), T("V"), T("V"), T("AH"), T("ah"), T("OH"), T("\u{28c}")],
    [T("o"), T("0"), T("ao"), T("oa"), T("AA"), T("Q"), T("Q"), T("AA"), T("ao"), T("O"), T("\u{252}")],
    [D, D, D, D, D, T("A"), T("A"), D, D, D, T("\u{251}")],
    [D, D, D, D, D, T("O"), T("O"), D, D, D, T("\u{254}")],
    [T("au"), T("aU"), T("aw"), T("aw"), T("AW"), T("aU"), T("aU"), T("AW"), T("aw"), T("AW"), T("a\u{28a}")],
    [D, D, D, D, D, T("{O"), T("{O"), D, D, D, T("\u{e6}\u{254}")],
    [T("@"), T("@"), T("ax"), T("ah"), T("AX"), T("@"), T("@"), T("AH"), T("ax"), T("AH"), T("\u{259}")],
    [T("@@"), T("3:"), T("er"), T("er"), D, T("3:"), T("3:"), T("ER"), T("er"), T("ER"), T("\u{259}\u{2d0}")],
    [T("@"), T("3"), T("ax"), T("ah"), D, T("@"), T("@"), T("AH"), D, T("AH"), T("\u{25a}")],
    [T("@1"), T("a2"), D, D, D, D, D, D, D, D, T("\u{259}")],
    [T("@2"), T("@"), D, D, D, D, D, D, D, D, D],
    [T("ai"), T("aI"), T("ay"), T("ay"), T("AY"), T("aI"), T("aI"), T("AY"), T("ay"), T("IY"), T("a\u{26a}")],
    [D, D, D, D, D, T("Ae"), T("A e"), D, D, D, T("\u{251}e")],
    [T("b"), T("b"), T("b"), T("b"), T("b"), T("b"), T("b"), T("B "), T("b"), T("B"), T("b")],
    [T("ch"), T("tS"), T("ch"), T("ch"), T("C"), T("tS"), T("t S"), T("CH"), T("ch"), T("CH"), A(&["t\u{283}", "\u{2a7}"])],
    [T("d"), T("d"), T("d"), T("d"), T("d"), T("d"), T("d"), T("D "), T("d"), T("D"), T("d")],
    [T("dh"), T("D"), T("dh"), T("dh"), T("D"), T("D"), T("D"), T("DH"), T("dh"), T("DH"), T("\u{f0}")],
    [T("e"), T("E"), T("eh"), T("eh"), T("EH"), T("E"), T("e"), T("EH"), T("eh"), T("EH"), T("\u{25b}")],
    [D, D, D, D, D, T("e"), D, D, T("ey"), D, T("e")],
    [T("@@"), T("3:"), T("er"), T("er"), T("AX"), T("3:"), T("3:"), T("ER"), T("er"), T("ER"), A(&["\u{25d}", "\u{25c}\u{2d0}"])],
    [T("e@"), T("e@"), T("eh r"), T("e@"), T("EH r"), T("E@"), T("e @"), D, T("eh r"), T("AI"), T("\u{25b}\u{259}")],
    [D, D, D, D, D, T("Er\\"), T("e r"), D, D, D, T("\u{25b}\u{279}")],
    [D, D, D, D, D, T("e:"), T("e :"), D, D, D, T("e\u{2d0}")],
    [D, D, D, D, D, T("E:"), D, D, D, D, T("\u{25b}\u{2d0}")],
    [D, D, D, D, D, T("e@"), T("e @"), D, D, D, T("e\u{259}")],
    [T("ei"), T("eI"), T("ey"), T("ey"), T("EY"), T("eI"), T("eI"), T("EY"), T("ey"), T("AY"), T("e\u{26a}")],
    [D, D, D, D, D, T("{I"), T("{I"), D, D, D, T("\u{e6}\u{26a}")],
    [T("f"), T("f"), T("f"), T("f"), T("f"), T("f"), T("f"), T("F "), T("f"), T("F"), T("f")],
    [T("g"), T("g"), T("g"), T("g"), T("g"), T("g"), T("g"), T("G "), T("g"), T("G"), A(&["\u{261}", "g"])],
    [T("h"), T("h"), T("h"), T("h"), T("h"), T("h"), T("h"), T("HH"), T("hh"), T("/H"), T("h")],
    [T("i"), T("I"), T("ih"), T("ih"), T("IH"), T("I"), T("I"), T("IH"), T("ih"), T("IH"), T("\u{26a}")],
    [D, D, D, D, D, T("1"), T("1"), D, D, D, T("\u{268}")],
    [D, A(&["I", "I2"]), D, D, T("IX"), T("I"), T("I"), D, D, T("IX"), T("\u{26a}")],
    [T("i@"), T("i@"), T("iy ah"), T("i ah"), T("IY UX"), T("I@"), T("I@"), T("EY AH"), T("iy ah"), T("IXAH"), T("\u{26a}\u{259}")],
    [D, D, D, D, D, T("Ir\\"), T("I r"), D, D, D, T("\u{26a}\u{279}")],
    [T("ii"), T("i:"), T("iy"), T("i"), T("IY"), T("i"), T("i"), T("IY"), T("iy"), T("EE"), T("i")],
    [D, D, D, D, D, T("i:"), T("i:"), D, D, D, T("i\u{2d0}")],
    [T("jh"), T("dZ"), T("jh"), T("jh"), T("J"), T("dZ"), T("dZ"), T("JH"), T("jh"), T("J"), A(&["d\u{292}", "\u{2a4}"])],
    [T("k"), T("k"), T("k"), T("k"), T("k"), T("k"), T("k"), T("K "), T("k"), T("K"), T("k")],
    [D, T("x"), D, D, D, T("x"), T("x"), D, T("l"), D, T("x")],
    [T("l"), A(&["l", "L"]), T("l"), T("l"), T("l"), T("l"), T("l"), T("L "), D, T("L"), A(&["l", "d\u{26b}"])],
    [T("m"), T("m"), T("m"), T("m"), T("m"), T("m"), T("m"), T("M "), T("m"), T("M"), T("m")],
    [T("n"), T("n"), T("n"), T("n"), T("n"), T("n"), T("n"), T("N "), T("n"), T("N"), T("n")],
    [T("ng"), T("N"), T("ng"), T("ng"), T("N"), T("N"), T("N"), T("NG"), T("nx"), T("NX"), T("\u{14b}")],
    [T("ou"), T("oU"), T("ow"), T("ow"), T("OW"), T("@U"), T("@U"), T("OW"), T("ow"), T("OW"), A(&["\u{259}\u{28a}", "o"])],
    [D, D, D, D, D, T("oU"), T("o U"), D, D, D, T("o\u{28a}")],
    [D, D, D, D, D, T("@}"), T("@ }"), D, D, D, T("\u{259}\u{289}")],
    [T("oi"), T("OI"), T("oy"), T("oy"), T("OY"), T("OI"), T("OI"), T("OY"), T("oy"), T("OY"), T("\u{254}\u{26a}")],
    [D, D, D, D, D, T("oI"), T("o I"), D, D, D, T("o\u{26a}")],
    [T("p"), T("p"), T("p"), T("p"), T("p"), T("p"), T("p"), T("P "), T("p"), T("P"), T("p")],
    [T("r"), T("r"), T("r"), T("r"), T("r"), T("r\\"), T("r"), T("R "), T("r"), T("R"), T("\u{279}")],
    [D, D, D, D, D, T("r"), D, D, D, D, T("r")],
    [T("s"), T("s"), T("s"), T("s"), T("s"), T("s"), T("s"), T("S "), T("s"), T("S"), T("s")],
    [T("sh"), T("S"), T("sh"), T("sh"), T("S"), T("S"), T("S"), T("SH"), T("sh"), T("SH"), T("\u{283}")],
    [T("t"), T("t"), T("t"), T("t"), T("t"), T("t"), T("t"), T("T "), T("t"), T("T"), A(&["t", "\u{27e}"])],
    [T("th"), T("T"), T("th"), T("th"), T("T"), T("T"), T("T"), T("TH"), T("th"), T("TH"), T("\u{3b8}")],
    [T("u@"), T("U@"), T("uh"), T("uh"), T("UH"), T("U@"), T("U@"), T("UH"), T("uh"), T("UH"), T("\u{28a}\u{259}")],
    [D, D, D, D, D, T("Ur\\"), T("U r"), D, D, D, T("\u{28a}\u{279}")],
    [T("u"), T("U"), D, D, D, T("U"), T("U"), D, D, T("/U"), T("\u{28a}")],
    [T("uu"), T("u:"), T("uw"), T("uw"), T("UW"), T("}:"), T("u:"), T("UW"), T("uw"), A(&["UW", "UX"]), T("\u{289}\u{2d0}")],
    [D, D, D, D, D, T("u:"), D, D, D, D, A(&["u\u{2d0}", "u"])],
    [T("oo"), T("O:"), T("ax"), T("ao"), T("AO"), T("O:"), T("O:"), T("AO"), T("AO"), T("AO"), T("\u{254}\u{2d0}")],
    [D, D, D, D, D, T("O"), T("O"), D, D, D, T("\u{254}")],
    [D, D, D, D, D, T("o:"), T("O:"), D, D, D, T("o\u{2d0}")],
    [D, A(&["O@", "o@", "O"]), D, D, D, T("O:"), D, D, D, D, T("\u{254}\u{2d0}")],
    [T("v"), T("v"), T("v"), T("v"), T("v"), T("v"), T("v"), T("V "), T("v"), T("V"), T("v")],
    [T("w"), T("w"), T("w"), T("w"), T("w"), T("w"), T("w"), T("W "), T("w"), T("W"), T("w")],
    [D, D, D, D, D, T("W"), D, D, T("x"), D, T("\u{28d}")],
    [T("y"), T("j"), T("y"), T("j"), T("y"), T("j"), T("j"), T("Y "), T("y"), T("Y"), T("j")],
    [T("z"), T("z"), T("z"), T("z"), T("z"), T("z"), T("z"), T("Z "), T("z"), T("Z"), T("z")],
    [T("zh"), T("Z"), T("zh"), T("zh"), T("Z"), T("Z"), T("Z"), T("ZH"), T("zh"), T("ZH"), T("\u{292}")],
    // X-SAMPA superscript tone numbers, IPA side in Unicode.
    [D, D, D, D, D, T("_1"), D, D, D, D, T("\u{b9}")],
    [D, D, D, D, D, T("_2"), D, D, D, D, T("\u{b2}")],
    [D, D, D, D, D, T("_3"), D, D, D, D, T("\u{b3}")],
    [D, D, D, D, D, T("_4"), D, D, D, D, T("\u{2074}")],
    [D, D, D, D, D, T("_5"), D, D, D, D, T("\u{2075}")],
    [D, D, D, D, D, T("_6"), D, D, D, D, T("\u{2076}")],
    [D, D, D, D, D, T("_7"), D, D, D, D, T("\u{2077}")],
    [D, D, D, D, D, T("_8"), D, D, D, D, T("\u{2078}")],
    [D, D, D, D, D, T("_9"), D, D, D, D, T("\u{2079}")],
    [D, D, D, D, D, T("_0"), D, D, D, D, T("\u{2070}")],
    // Backfill rows: every notation needs a '@' key for the implicit-schwa rule.
    [T("@"), T("@"), T("@"), T("ah"), T("AX"), T("@"), T("@"), T("@"), T("@"), T("AH"), T("\u{259}")],
    [D, D, T("ax"), T("@"), D, D, D, D, D, D, D],
    [D, D, D, T("ah"), T("@"), D, D, D, D, D, D],
    [D, D, D, D, T("AX"), D, D, D, D, T("@"), T("@")],
];

/// A resolved cell during expansion: either one concrete spelling or a
/// still-unexpanded alternatives list (dittos can inherit a whole list).
#[derive(Clone, Copy)]
enum Resolved {
    One(&'static str),
    Many(&'static [&'static str]),
}

impl Resolved {
    fn first(self) -> &'static str {
        match self {
            Resolved::One(s) => s,
            Resolved::Many(list) => list[0],
        }
    }
}

/// The flat, ditto-resolved, list-expanded correspondence table.
/// Built once at startup and immutable afterwards.
#[derive(Clone, Serialize, Deserialize)]
pub struct PhonemeTable {
    rows: Vec<Vec<String>>,
}

impl PhonemeTable {
    pub fn build() -> Self {
        assert!(
            RAW_ROWS[0].iter().all(|c| matches!(c, RawCell::Tok(_))),
            "separator row must be fully concrete"
        );

        let mut rows: Vec<Vec<&'static str>> = Vec::new();
        // Dedup applies to list-expanded rows only; plain rows always land.
        let mut seen: HashSet<Vec<&'static str>> = HashSet::new();
        let mut prev: Option<[Resolved; COLUMNS]> = None;

        for raw in RAW_ROWS.iter() {
            let mut resolved = [Resolved::One(""); COLUMNS];
            for (i, cell) in raw.iter().enumerate() {
                resolved[i] = match cell {
                    RawCell::Tok(s) => Resolved::One(s),
                    RawCell::Alt(list) => {
                        assert!(list.len() >= 2, "alternatives list needs two entries");
                        Resolved::Many(list)
                    }
                    RawCell::Ditto => prev.expect("ditto has no preceding row")[i],
                };
            }

            let list_cols: Vec<usize> = (0..COLUMNS)
                .filter(|&i| matches!(resolved[i], Resolved::Many(_)))
                .collect();

            if list_cols.is_empty() {
                rows.push(resolved.iter().map(|c| c.first()).collect());
            }
            // Lists in one row expand independently per column, never as a
            // cross-product: a variant in one column pairs only with the
            // first (canonical) spelling of every other column.
            let canonical: Vec<&'static str> = resolved.iter().map(|c| c.first()).collect();
            for &col in &list_cols {
                if let Resolved::Many(items) = resolved[col] {
                    for &item in items {
                        let mut row = canonical.clone();
                        row[col] = item;
                        debug_assert!(
                            row.iter()
                                .zip(&canonical)
                                .filter(|(a, b)| a != b)
                                .count()
                                <= 1,
                            "expanded row pairs two non-canonical spellings"
                        );
                        if seen.insert(row.clone()) {
                            rows.push(row);
                        }
                    }
                }
            }
            prev = Some(resolved);
        }

        PhonemeTable {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    /// Index of a notation column, or an error for a name not in the header.
    pub fn column(&self, notation: &str) -> Result<usize, ConvertError> {
        NOTATIONS
            .iter()
            .position(|n| *n == notation)
            .ok_or_else(|| ConvertError::UnknownNotation(notation.to_string()))
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

/// True for notations that butt phonemes together with no internal spacing.
pub fn space_separates_words(notation: &str) -> bool {
    SPACE_SEPARATES_WORDS.contains(&notation)
}
