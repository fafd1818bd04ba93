//! Pure normalizers for fields pulled out of model replies.

/// Sentinel the model uses for a field it could not read.
pub const NOT_DETECTED: &str = "Not Detected";

/// Symbol characters stripped from free-text values.
const STRIPPED_SYMBOLS: &[char] = &['®', '™', '℞', '©', '*'];

/// Clean a free-text value: sentinel and empty map to empty, symbol marks
/// are stripped, surrounding whitespace is trimmed.
pub fn clean_value(text: &str) -> String {
    if text.is_empty() || text == NOT_DETECTED {
        return String::new();
    }
    let stripped: String = text
        .chars()
        .filter(|c| !STRIPPED_SYMBOLS.contains(c))
        .collect();
    stripped.trim().to_string()
}

/// Clean a date value: keep only digits and the separators `/`, `.`, `-`.
pub fn clean_date(text: &str) -> String {
    if text.is_empty() || text == NOT_DETECTED {
        return String::new();
    }
    text.chars()
        .filter(|&c| c.is_ascii_digit() || matches!(c, '/' | '.' | '-'))
        .collect()
}

/// Clean a strength value: drop spaces, substitute the letter-for-digit
/// look-alikes `o`→`0` and `l`→`1`, uppercase the result.
pub fn clean_strength(text: &str) -> String {
    if text.is_empty() || text == NOT_DETECTED {
        return String::new();
    }
    text.to_lowercase()
        .replace(' ', "")
        .replace('o', "0")
        .replace('l', "1")
        .to_uppercase()
}
