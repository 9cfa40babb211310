//! AQI extraction from free-text answers.

/// Return the first whitespace-separated token made only of ASCII digits.
///
/// Tokens with punctuation attached (`"142."`, `"AQI:142"`) do not count.
/// Digit runs too large for `u32` are skipped.
pub fn first_whole_number(text: &str) -> Option<u32> {
    text.split_whitespace()
        .filter(|token| token.bytes().all(|b| b.is_ascii_digit()))
        .find_map(|token| token.parse().ok())
}
