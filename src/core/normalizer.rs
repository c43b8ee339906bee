// src/core/normalizer.rs
//! espeak-specific cleanup applied after generic conversion. The generic
//! algorithm produces sequences espeak spells differently: r-coloured vowels,
//! the dark-l marker, a doubled 'g'. The suffix cascade runs most-specific
//! first so 'i@r'/'U@r' are not shadowed by the plain '@r' rule.

/// Rewrites a freshly converted espeak entry to espeak's own phonotactics.
pub(crate) fn cleanup_espeak(entry: &str) -> String {
    let r = entry
        .replace("k'a2n", "k'@n")
        .replace("ka2n", "k@n")
        .replace("gg", "g");
    if let Some(stem) = r.strip_suffix("i@r") {
        return format!("{}i@", stem);
    }
    if let Some(stem) = r.strip_suffix("U@r") {
        return format!("{}U@", stem);
    }
    if r.ends_with("@r") && !r.ends_with("e@r") {
        return format!("{}3", &r[..r.len() - 2]);
    }
    if let Some(stem) = r.strip_suffix("A:r") {
        return format!("{}A@", stem);
    }
    if let Some(stem) = r.strip_suffix("O:r") {
        return format!("{}O@", stem);
    }
    if r.ends_with("@l") && !r.ends_with("i@l") && !r.ends_with("U@l") {
        return format!("{}@L", &r[..r.len() - 2]);
    }
    if r.ends_with("rr") || r.ends_with("3:r") {
        return r[..r.len() - 1].to_string();
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubled_g_collapses() {
        assert_eq!(cleanup_espeak("d0gg"), "d0g");
    }

    #[test]
    fn rhotic_schwa_becomes_long_vowel() {
        assert_eq!(cleanup_espeak("fI3:r"), "fI3:");
        assert_eq!(cleanup_espeak("b'0D@r"), "b'0D3");
    }

    #[test]
    fn diphthong_suffixes_win_over_the_general_schwa_rule() {
        assert_eq!(cleanup_espeak("b'i@r"), "b'i@");
        assert_eq!(cleanup_espeak("p'U@r"), "p'U@");
        // 'e@r' is left alone by the '@r' rule.
        assert_eq!(cleanup_espeak("de@r"), "de@r");
    }

    #[test]
    fn long_back_vowels_lose_the_r() {
        assert_eq!(cleanup_espeak("kA:r"), "kA@");
        assert_eq!(cleanup_espeak("fO:r"), "fO@");
    }

    #[test]
    fn syllabic_l_gets_the_dark_l_marker() {
        assert_eq!(cleanup_espeak("lIt@l"), "lIt@L");
        assert_eq!(cleanup_espeak("t'i@l"), "t'i@l");
    }

    #[test]
    fn can_sequence_is_respelled() {
        assert_eq!(cleanup_espeak("k'a2nt"), "k'@nt");
    }
}
