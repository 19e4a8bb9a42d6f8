//! Normalized edit-distance similarity between question texts.

/// Case-insensitive similarity in `[0, 1]`: Levenshtein distance normalized
/// by the longer string's length (`1 - d / max_len`), counted in chars.
///
/// Convention: two empty strings are identical (`1.0`). The division would
/// otherwise be undefined for `max_len == 0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein(&a, &b);
    1.0 - distance as f64 / max_len as f64
}

/// Classic Levenshtein with two rolling rows — O(min) extra space.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    // Iterate over the longer sequence, keep rows sized to the shorter one.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr: Vec<usize> = vec![0; short.len() + 1];

    for (i, &lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let substitution = prev[j] + usize::from(lc != sc);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_one() {
        assert_eq!(similarity("What is a closure?", "What is a closure?"), 1.0);
    }

    #[test]
    fn test_symmetry() {
        let ab = similarity("kitten", "sitting");
        let ba = similarity("sitting", "kitten");
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_both_empty_defined_as_identical() {
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_one_empty_scores_zero() {
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(similarity("RUST", "rust"), 1.0);
    }

    #[test]
    fn test_known_distance() {
        // kitten -> sitting: distance 3, max length 7
        let expected = 1.0 - 3.0 / 7.0;
        assert!((similarity("kitten", "sitting") - expected).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_strings_score_low() {
        assert!(similarity("aaaa", "zzzz") < 0.01);
    }

    #[test]
    fn test_trailing_punctuation_barely_matters() {
        let s = similarity("What is a closure?", "What is a closure");
        assert!(s > 0.9);
    }
}
