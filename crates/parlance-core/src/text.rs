//! Character-aware text helpers shared by the prompt and title pipelines.
//!
//! Every length in this crate is measured in `char`s, never bytes, so that
//! accented Spanish text is capped the same way as ASCII.

/// Number of `char`s in `s`.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Returns the first `max_chars` characters of `s`.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Lower-cases `s` and strips the diacritics used by the supported languages.
///
/// # Examples
///
/// ```
/// use parlance_core::text::fold_accents;
///
/// assert_eq!(fold_accents("Qué Está Pasando"), "que esta pasando");
/// ```
pub fn fold_accents(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Upper-cases the first alphabetic character, skipping leading punctuation
/// such as `¿` or `"`.
pub fn capitalize_first(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut done = false;
    for c in s.chars() {
        if !done && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Splits `s` into lower-cased word tokens, treating every non-word
/// character as a separator.
pub fn word_tokens(s: &str) -> Vec<String> {
    s.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Collapses runs of whitespace into single spaces and lower-cases.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncates `s` at the last whole word that keeps the result (including
/// `suffix`) within `max_chars`.
///
/// Returns the text unchanged when it already fits. A single word longer
/// than the budget is cut mid-word as a last resort.
pub fn truncate_at_word(s: &str, max_chars: usize, suffix: &str) -> String {
    let s = s.trim();
    if char_len(s) <= max_chars {
        return s.to_string();
    }

    let budget = max_chars.saturating_sub(char_len(suffix));
    let mut out = String::new();
    for word in s.split_whitespace() {
        let extra = if out.is_empty() { 0 } else { 1 } + char_len(word);
        if char_len(&out) + extra > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    if out.is_empty() {
        out = truncate_chars(s, budget).to_string();
    }

    let trimmed = out.trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | '.' | '-'));
    format!("{trimmed}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("canción", 6), "canció");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn fold_accents_lowercases_and_strips() {
        assert_eq!(fold_accents("¿CÓMO Estás?"), "¿como estas?");
        assert_eq!(fold_accents("Niño"), "nino");
    }

    #[test]
    fn capitalize_skips_leading_punctuation() {
        assert_eq!(capitalize_first("¿qué es?"), "¿Qué es?");
        assert_eq!(capitalize_first("música"), "Música");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("123"), "123");
    }

    #[test]
    fn word_tokens_splits_on_punctuation() {
        assert_eq!(
            word_tokens("Hola, ¿qué tal? Bien."),
            vec!["hola", "qué", "tal", "bien"]
        );
    }

    #[test]
    fn normalize_whitespace_collapses() {
        assert_eq!(normalize_whitespace("  You  are\n\tHelpful "), "you are helpful");
    }

    #[test]
    fn truncate_at_word_keeps_whole_words() {
        let out = truncate_at_word("the quick brown fox jumps", 15, "...");
        assert_eq!(out, "the quick...");
        assert!(char_len(&out) <= 15);
    }

    #[test]
    fn truncate_at_word_fits_unchanged() {
        assert_eq!(truncate_at_word("short one", 20, "..."), "short one");
    }

    #[test]
    fn truncate_at_word_single_long_word() {
        let out = truncate_at_word("supercalifragilistic", 10, "...");
        assert_eq!(out, "superca...");
    }
}
