// src/core/equivalence.rs
//! Heuristic equivalence of two espeak-notation pronunciations. Conversion
//! into espeak is approximate, so a string that differs from an existing
//! entry may still denote the same pronunciation; folding the spellings that
//! espeak treats as interchangeable catches most of those cases. This is a
//! conservative, lossy check, not general phonetic equivalence.

/// True when `existing` and `candidate` are the same pronunciation, either
/// verbatim or after folding known-interchangeable spellings.
pub fn equivalent(existing: &str, candidate: &str) -> bool {
    if existing == candidate {
        return true;
    }
    fold(existing) == fold(candidate)
}

// The replacement order is load-bearing: 'I2' must fold before 'I', and the
// lax-vowel folds feed the 'i@' one.
fn fold(pronunc: &str) -> String {
    pronunc
        .replace(';', "")
        .replace('%', "")
        .replace("a2", "@")
        .replace('3', "@")
        .replace('L', "l")
        .replace("I2", "i:")
        .replace('I', "i:")
        .replace("i@", "i:@")
        .replace(',', "")
        .replace('s', "z")
        .replace("aa", "A:")
        .replace("A@", "A:")
        .replace("O@", "O:")
        .replace("o@", "O:")
        .replace("r-", "r")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_equivalent() {
        assert!(equivalent("h@l'oU", "h@l'oU"));
        assert!(equivalent("", ""));
    }

    #[test]
    fn mid_vowel_digraph_folds_to_the_neutral_vowel() {
        assert!(equivalent("k'a2n", "k'@n"));
        assert!(equivalent("b'0D3", "b'0D@"));
    }

    #[test]
    fn lax_and_long_high_front_vowels_fold_together() {
        assert!(equivalent("f'I@", "f'i@"));
        assert!(equivalent("s'Iti", "z'i:ti"));
    }

    #[test]
    fn dark_l_and_voicing_fold() {
        assert!(equivalent("lIt@L", "lIt@l"));
        assert!(equivalent("d0gz", "d0gs"));
    }

    #[test]
    fn back_vowel_spellings_unify() {
        assert!(equivalent("kaat", "kA:t"));
        assert!(equivalent("fO@", "fO:"));
    }

    #[test]
    fn real_differences_are_not_equivalent() {
        assert!(!equivalent("kat", "kap"));
        assert!(!equivalent("h@l'oU", "h@l'aU"));
        assert!(!equivalent("m'aUs", "m'aUT"));
    }
}
