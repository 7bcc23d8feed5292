use crate::models::{CapitalizationMode, Settings};

/// Generate a hashtag from free-form text according to the user's settings.
///
/// Empty or whitespace-only input yields an empty string. Otherwise the
/// result always starts with `#` and contains no whitespace — input that
/// strips down to nothing still yields a bare `#`, which distinguishes
/// "nothing survived filtering" from "no input".
pub fn generate(text: &str, settings: &Settings) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let cleaned: String = if settings.remove_special_chars {
        text.chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect()
    } else {
        text.to_string()
    };

    let cased = match settings.capitalization_mode {
        CapitalizationMode::None => cleaned,
        CapitalizationMode::First => title_case(&cleaned),
        CapitalizationMode::AllCaps => cleaned.to_uppercase(),
        CapitalizationMode::Lowercase => cleaned.to_lowercase(),
    };

    let mut hashtag = String::with_capacity(cased.len() + 1);
    hashtag.push('#');
    hashtag.extend(cased.chars().filter(|c| !c.is_whitespace()));
    hashtag
}

/// Title-case each whitespace-delimited word: first letter uppercased,
/// the rest lowercased. Punctuation inside a word does not start a new
/// word, so "don't" becomes "Don't".
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Truncate input text to the configured character limit (0 = unlimited).
///
/// This is the pre-generation check: front-ends apply it to the raw input
/// as the user types.
pub fn truncate_input(text: &str, limit: usize) -> &str {
    if limit == 0 {
        return text;
    }
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Whether a generated hashtag exceeds the configured character limit
/// (0 = unlimited).
///
/// This is the post-generation check, measured against the hashtag itself
/// rather than the input; the two checks deliberately share the same
/// configured limit but compare different strings.
pub fn exceeds_limit(hashtag: &str, limit: usize) -> bool {
    limit > 0 && hashtag.chars().count() > limit
}
