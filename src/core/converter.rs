// src/core/converter.rs
//! Greedy tokenizer and rewriter: turns a source-notation phoneme string
//! into a destination-notation one, relocating stress marks between
//! before-vowel and after-vowel conventions and repairing implicit neutral
//! vowels along the way.

use crate::core::dictionary::Dictionary;
use crate::core::normalizer;
use crate::core::table::{space_separates_words, ESPEAK_CONSONANTS};
use crate::core::types::ConvertError;

/// One buffered destination token. `synthetic` marks a neutral vowel the
/// converter inserted itself; such tokens are skipped when placing stress,
/// may be retracted, and the flag never reaches the output.
#[derive(Debug, Clone)]
struct Emitted {
    text: String,
    synthetic: bool,
}

fn plain(text: String) -> Emitted {
    Emitted {
        text,
        synthetic: false,
    }
}

/// Notations that write stress marks immediately before the stressed vowel.
fn stress_before_vowel(notation: &str) -> bool {
    notation == "espeak" || notation == "unicode-ipa"
}

pub(crate) fn convert(
    dict: &Dictionary,
    pronunc: &str,
    source: &str,
    dest: &str,
) -> Result<String, ConvertError> {
    let decoded;
    let pronunc = if source == "unicode-ipa" {
        decoded = decode_input(pronunc);
        decoded.as_str()
    } else {
        pronunc
    };

    let chars: Vec<char> = pronunc.chars().collect();
    let mut ret: Vec<Emitted> = Vec::new();
    let mut add_after: Option<String> = None;
    let mut pos = 0;

    while pos < chars.len() {
        let mut taken = 0;
        for len in [2usize, 1] {
            let end = (pos + len).min(chars.len());
            let key: String = chars[pos..end].iter().collect();
            let mut to_add = match dict.map.get(&key) {
                Some(value) => value.clone(),
                None => continue,
            };

            if matches!(to_add.as_str(), "0" | "1" | "2") && dest != "espeak" {
                // A stress mark (or separator digit) in a notation that puts
                // stress after the vowel. espeak is excluded because it uses
                // '0' as an ordinary phoneme.
                if dest == "bbcmicro" {
                    // bbcmicro encodes stress as pitch levels.
                    if to_add == "1" {
                        to_add = "3".to_string();
                    } else if to_add == "2" {
                        to_add = "4".to_string();
                    }
                }
                if stress_before_vowel(source) {
                    // Withhold it; it re-attaches after the next phoneme.
                    add_after = Some(std::mem::take(&mut to_add));
                } else {
                    // Place it exactly after the syllable's vowel, scanning
                    // back over consonants and synthetic insertions.
                    let mut r = ret.len();
                    while r > 0 && (ret[r - 1].synthetic || dict.is_consonant(&ret[r - 1].text)) {
                        r -= 1;
                    }
                    if r == 0 {
                        return Err(ConvertError::NoVowelForStress);
                    }
                    ret.insert(r, plain(std::mem::take(&mut to_add)));
                }
            } else if matches!(to_add.as_str(), "'" | "," | "\u{2c8}" | "\u{2cc}")
                && stress_before_vowel(dest)
                && !stress_before_vowel(source)
            {
                // A stress mark that must move from after the vowel to
                // before it: back over the syllable coda, then over the
                // vowel itself.
                let mut i = ret.len();
                while i > 0 && (ret[i - 1].synthetic || dict.is_consonant(&ret[i - 1].text)) {
                    i -= 1;
                }
                if i > 0 {
                    i -= 1;
                }
                ret.insert(i, plain(std::mem::take(&mut to_add)));
            }

            // Some source notations leave out the neutral vowel before a
            // syllabic 'n' or 'l'; insert one speculatively.
            let last_nonempty_consonant = ret
                .last()
                .map(|t| !t.text.is_empty() && dict.is_consonant(&t.text))
                .unwrap_or(false);
            if last_nonempty_consonant && (to_add == "n" || to_add == "l") {
                if let Some(schwa) = dict.map.get("@") {
                    ret.push(Emitted {
                        text: schwa.clone(),
                        synthetic: true,
                    });
                }
            } else if ret.len() > 2
                && ret[ret.len() - 2].synthetic
                && !to_add.is_empty()
                && !dict.is_consonant(&to_add)
                && to_add != dict.syllable_sep
            {
                // A true vowel arrived where the speculative neutral vowel
                // was inserted: take it back out.
                let idx = ret.len() - 2;
                ret.remove(idx);
            }

            if !to_add.is_empty() {
                // A compound value is a space-joined sequence; only its
                // first token takes part in the adjacency rules.
                let mut parts = to_add.split_whitespace();
                if let Some(first) = parts.next() {
                    let first_is_consonant = dict.is_consonant(first);
                    ret.push(plain(first.to_string()));
                    if !first_is_consonant {
                        if let Some(after) = add_after.take() {
                            ret.push(plain(after));
                        }
                    }
                    for part in parts {
                        ret.push(plain(part.to_string()));
                    }
                }
            }

            taken = len;
            // The espeak 'e@' before an 'r' that closes the syllable is one
            // unit in the other notations; widen the match to keep the
            // adjacency rules in sync.
            if source == "espeak"
                && key == "e@"
                && pos + len < chars.len()
                && chars[pos + len] == 'r'
                && (pos + len + 1 == chars.len()
                    || ESPEAK_CONSONANTS.contains(chars[pos + len + 1]))
            {
                taken += 1;
            }
            break;
        }

        if taken == 0 {
            if source == "espeak" {
                // espeak's markup symbols overlap ordinary phoneme letters,
                // so an unknown symbol there is worth reporting.
                eprintln!(
                    "Warning: ignoring unknown espeak phoneme {:?}",
                    chars[pos]
                );
            }
            taken = 1;
        }
        pos += taken;
    }

    if let Some(after) = add_after.take() {
        ret.push(plain(after));
    }
    if ret
        .last()
        .map(|t| !t.synthetic && t.text == dict.syllable_sep)
        .unwrap_or(false)
    {
        // Spurious syllable separator at the end.
        ret.pop();
    }

    let joiner = if space_separates_words(dest) { "" } else { " " };
    let mut out = ret
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(joiner);

    if dest == "cepstral" {
        // cepstral glues the stress digit straight onto the vowel.
        out = out.replace(" 1", "1").replace(" 0", "0");
    }
    if dest == "espeak" {
        out = normalizer::cleanup_espeak(&out);
    }
    Ok(out)
}

/// unicode-ipa input may arrive as `\uNNNN` escape sequences (e.g. copied
/// from a browser) rather than as the characters themselves. Decode them if
/// they are present and the string is not quoted; on any failure fall back
/// to the input unmodified.
fn decode_input(pronunc: &str) -> String {
    if pronunc.contains("\\u") && !pronunc.contains('"') {
        if let Some(decoded) = decode_backslash_u(pronunc) {
            return decoded;
        }
    }
    pronunc.to_string()
}

fn decode_backslash_u(s: &str) -> Option<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' && i + 1 < chars.len() && chars[i + 1] == 'u' {
            if i + 6 > chars.len() {
                return None;
            }
            let hex: String = chars[i + 2..i + 6].iter().collect();
            let code = u32::from_str_radix(&hex, 16).ok()?;
            out.push(char::from_u32(code)?);
            i += 6;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use crate::core::engine::LexConverter;
    use crate::core::types::ConvertError;

    fn convert(pronunc: &str, source: &str, dest: &str) -> String {
        LexConverter::new().convert(pronunc, source, dest).unwrap()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(convert("", "festival", "espeak"), "");
    }

    #[test]
    fn single_phoneme_lookups_follow_the_table() {
        assert_eq!(convert("ch", "festival", "unicode-ipa"), "t\u{283}");
        assert_eq!(convert("tS", "espeak", "cmu"), "CH");
        assert_eq!(convert("sh", "festival", "sapi"), "sh");
    }

    #[test]
    fn join_convention_depends_on_destination() {
        // espeak butts phonemes together; festival separates with spaces.
        assert_eq!(convert("kat", "espeak", "festival"), "k a t");
        assert_eq!(convert("k a t", "festival", "espeak"), "kat");
    }

    #[test]
    fn stress_moves_before_the_vowel() {
        // After-vowel source, before-vowel destination: the mark lands
        // immediately before 'ou', not where it appeared.
        assert_eq!(convert("h@lou1", "festival", "espeak"), "h@l'oU");
    }

    #[test]
    fn stress_moves_after_the_vowel() {
        assert_eq!(convert("h@l'oU", "espeak", "festival"), "h @ l ou 1");
    }

    #[test]
    fn stress_relocation_skips_synthetic_vowels() {
        assert_eq!(convert("litl1", "festival", "espeak"), "l'It@L");
    }

    #[test]
    fn bbcmicro_remaps_stress_to_pitch_levels() {
        assert_eq!(convert("ou1", "festival", "bbcmicro"), "OW3");
        assert_eq!(convert("ou2", "festival", "bbcmicro"), "OW4");
    }

    #[test]
    fn cepstral_glues_the_stress_digit() {
        assert_eq!(convert("hi1", "festival", "cepstral"), "h ih1");
    }

    #[test]
    fn stress_before_any_vowel_is_an_error() {
        let mut engine = LexConverter::new();
        assert_eq!(
            engine.convert("s1", "festival", "cepstral"),
            Err(ConvertError::NoVowelForStress)
        );
    }

    #[test]
    fn implicit_neutral_vowel_is_inserted_before_syllabic_l() {
        // 'litl' has no vowel between 't' and the final 'l'.
        assert_eq!(convert("litl", "festival", "espeak"), "lIt@L");
    }

    #[test]
    fn speculative_neutral_vowel_is_retracted_before_a_true_vowel() {
        let out = convert("sni", "festival", "espeak");
        assert_eq!(out, "snI");
        assert!(!out.contains('@'));
    }

    #[test]
    fn espeak_e_at_r_widens_when_the_r_closes_the_syllable() {
        assert_eq!(convert("De@r", "espeak", "festival"), "dh e@");
        // A following vowel keeps the 'r' as its own phoneme.
        assert_eq!(convert("De@ri", "espeak", "festival"), "dh e@ r i");
    }

    #[test]
    fn trailing_syllable_separator_is_dropped() {
        assert_eq!(convert("k a t 0", "festival", "sapi"), "k ae t");
    }

    #[test]
    fn unknown_notation_is_rejected() {
        let mut engine = LexConverter::new();
        assert_eq!(
            engine.convert("a", "festival", "klingon"),
            Err(ConvertError::UnknownNotation("klingon".to_string()))
        );
        assert_eq!(
            engine.convert("a", "klingon", "festival"),
            Err(ConvertError::UnknownNotation("klingon".to_string()))
        );
    }

    #[test]
    fn unknown_symbols_are_dropped() {
        assert_eq!(convert("k!t", "festival", "espeak"), "kt");
    }

    #[test]
    fn unicode_ipa_escape_sequences_are_decoded() {
        assert_eq!(convert("\\u0283", "unicode-ipa", "festival"), "sh");
        // Malformed escapes fall back to the literal string, whose 'u'
        // still tokenizes as a phoneme.
        assert_eq!(convert("\\uXYZ", "unicode-ipa", "festival"), "uu");
    }

    #[test]
    fn compound_destination_values_expand_in_order() {
        // festival 'i@' is a two-phoneme compound in sapi.
        assert_eq!(convert("i@", "festival", "sapi"), "iy ah");
    }

    #[test]
    fn conversion_is_deterministic_across_pair_changes() {
        let mut engine = LexConverter::new();
        let first = engine.convert("h@lou1", "festival", "espeak").unwrap();
        engine.convert("HH AH0", "cmu", "festival").unwrap();
        engine.convert("k a t", "festival", "mac").unwrap();
        let second = engine.convert("h@lou1", "festival", "espeak").unwrap();
        assert_eq!(first, second);
    }
}
