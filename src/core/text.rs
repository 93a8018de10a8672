use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Words that carry no signal when comparing about sections
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
        "by", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
        "do", "does", "did", "will", "would", "could", "should", "may", "might", "must",
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
        "my", "your", "his", "its", "our", "their", "this", "that", "these", "those",
    ]
    .into_iter()
    .collect()
});

/// Tokens this short are dropped along with stop words
const MIN_TOKEN_LEN: usize = 3;

/// Check whether a word is on the stop list
#[inline]
fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Split free text into comparable tokens
///
/// Lower-cases, keeps only ASCII letters and whitespace, then drops stop
/// words and tokens shorter than three characters. Order and duplicates are
/// preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.len() >= MIN_TOKEN_LEN && !is_stop_word(word))
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity of two about sections, in [0, 1]
///
/// Returns 0.0 when either side is blank or has no tokens left after
/// filtering.
pub fn score_text(text_a: &str, text_b: &str) -> f64 {
    if text_a.trim().is_empty() || text_b.trim().is_empty() {
        return 0.0;
    }

    let set_a: HashSet<String> = tokenize(text_a).into_iter().collect();
    let set_b: HashSet<String> = tokenize(text_b).into_iter().collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_strips_noise() {
        let tokens = tokenize("I love Rust-lang, 3D printing & the outdoors!!");
        assert_eq!(tokens, vec!["love", "rustlang", "printing", "outdoors"]);
    }

    #[test]
    fn test_tokenize_drops_short_and_stop_words() {
        let tokens = tokenize("We are an ok team of devs");
        assert_eq!(tokens, vec!["team", "devs"]);
    }

    #[test]
    fn test_identical_text() {
        let about = "Passionate photographer exploring mountains";
        assert_eq!(score_text(about, about), 1.0);
    }

    #[test]
    fn test_partial_overlap() {
        // {music, teacher, guitar} vs {music, lover, piano}: 1 / 5
        let score = score_text("Music teacher, guitar", "music lover and piano");
        assert!((score - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_blank_inputs() {
        assert_eq!(score_text("", "anything goes here"), 0.0);
        assert_eq!(score_text("anything goes here", "   \n\t"), 0.0);
    }

    #[test]
    fn test_only_stop_words() {
        assert_eq!(score_text("it is, and it was", "cooking baking"), 0.0);
        assert_eq!(score_text("12345 !!!", "12345 !!!"), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = "Backend engineer who enjoys climbing and chess";
        let b = "Chess player, climbing gym regular, frontend engineer";
        assert_eq!(score_text(a, b), score_text(b, a));
    }

    #[test]
    fn test_non_ascii_letters_removed() {
        // "café" loses the accented letter and becomes "caf"
        assert_eq!(tokenize("Café naïve"), vec!["caf", "nave"]);
    }
}
