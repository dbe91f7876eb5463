use crate::text::{char_len, normalize_whitespace};
use std::collections::HashSet;

/// Words shorter than this do not count towards overlap.
const MIN_OVERLAP_WORD_CHARS: usize = 4;

/// True when two prompts say essentially the same thing.
///
/// After whitespace and case normalization, either string containing the
/// other counts as similar. Otherwise the words longer than three
/// characters shared by both, divided by the size of the larger word set,
/// must exceed `threshold`.
pub fn is_very_similar(a: &str, b: &str, threshold: f64) -> bool {
    let a = normalize_whitespace(a);
    let b = normalize_whitespace(b);
    if a.is_empty() || b.is_empty() {
        return a == b;
    }
    if a.contains(&b) || b.contains(&a) {
        return true;
    }

    let words = |s: &str| -> HashSet<String> {
        s.split(|c: char| !c.is_alphanumeric())
            .filter(|w| char_len(w) >= MIN_OVERLAP_WORD_CHARS)
            .map(str::to_string)
            .collect()
    };
    let wa = words(&a);
    let wb = words(&b);
    let larger = wa.len().max(wb.len());
    if larger == 0 {
        return false;
    }
    let shared = wa.intersection(&wb).count();
    shared as f64 / larger as f64 > threshold
}
