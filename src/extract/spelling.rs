//! Fuzzy dictionary index and medicine-name correction.
//!
//! The index is a flat list of lowercased terms scanned with a length
//! pre-filter; at dictionary scale (tens of thousands of short terms) a
//! bounded Levenshtein scan is fast enough for one lookup per request.

/// Maximum edit distance accepted as a correction.
const MAX_EDIT_DISTANCE: u32 = 2;

/// Inputs shorter than this pass through untouched.
const MIN_CORRECTION_LEN: usize = 3;

/// In-memory fuzzy-lookup index over a wordlist.
pub struct SpellIndex {
    terms: Vec<String>,
}

impl SpellIndex {
    /// An index that never matches. Valid degraded state when the wordlist
    /// is unavailable.
    pub fn empty() -> Self {
        Self { terms: Vec::new() }
    }

    /// Build from wordlist lines: one term per line, lowercased, blanks and
    /// duplicates skipped. Line order is preserved — it breaks lookup ties.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut terms: Vec<String> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for line in lines {
            let term = line.trim().to_lowercase();
            if term.is_empty() || !seen.insert(term.clone()) {
                continue;
            }
            terms.push(term);
        }
        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Closest term within the edit-distance bound, ties broken by wordlist
    /// order. `None` when nothing is close enough.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        let mut best: Option<&str> = None;
        let mut best_distance = MAX_EDIT_DISTANCE + 1;

        for term in &self.terms {
            // Terms differing in length by more than the bound can't match
            let len_diff = (word.len() as i32 - term.len() as i32).unsigned_abs();
            if len_diff > MAX_EDIT_DISTANCE {
                continue;
            }

            let dist = edit_distance(word, term);
            if dist < best_distance {
                best_distance = dist;
                best = Some(term);
                if dist == 0 {
                    break;
                }
            }
        }

        best
    }
}

/// Correct a candidate medicine name against the dictionary.
///
/// Inputs shorter than 3 characters pass through unchanged. Otherwise the
/// input is reduced to letters and whitespace, lowercased, and matched
/// within edit distance 2; the result (or the original, when nothing
/// matches) is returned title-cased.
pub fn correct_term(raw: &str, index: &SpellIndex) -> String {
    if raw.chars().count() < MIN_CORRECTION_LEN {
        return raw.to_string();
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    let cleaned = cleaned.trim().to_lowercase();
    if cleaned.is_empty() {
        return title_case(raw);
    }

    match index.lookup(&cleaned) {
        Some(term) => title_case(term),
        None => title_case(raw),
    }
}

/// Capitalize the first letter of every word, lowercase the rest. A letter
/// starts a word when the previous character is not alphabetic.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Compute Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> u32 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n as u32;
    }
    if n == 0 {
        return m as u32;
    }

    let mut prev: Vec<u32> = (0..=n as u32).collect();
    let mut curr = vec![0u32; n + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = (i + 1) as u32;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let cost = if a_ch == b_ch { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
