use unicode_normalization::UnicodeNormalization;

/// Normalize an inbound search term before resolution.
pub fn normalize_word(input: &str) -> String {
    let mut word = input.trim().to_string();

    if word.is_empty() {
        return word;
    }

    // Unicode normalization (NFKC)
    word = word.nfkc().collect();

    // newlines and whitespace runs collapse to single spaces
    word.split_whitespace().collect::<Vec<_>>().join(" ")
}
