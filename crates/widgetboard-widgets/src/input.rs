//! Lenient numeric input parsing for widget forms.

/// Largest magnitude a form count may have.
///
/// Chart totals sum at most a handful of counts, so keeping each within
/// `i32` range keeps every total far from `i64` overflow.
pub const MAX_COUNT: i64 = i32::MAX as i64;

/// Parse a count from form text, returning 0 when no integer can be read.
///
/// Reads an optional sign followed by leading ASCII digits after trimming
/// whitespace, so `"12 accounts"` is 12 and `"3.7"` is 3. Empty input, text
/// without leading digits and values beyond [`MAX_COUNT`] in magnitude all
/// yield 0. Negative values are returned as-is.
#[must_use]
pub fn parse_count(input: &str) -> i64 {
    let trimmed = input.trim();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return 0;
    }

    rest[..digits_end]
        .parse::<i64>()
        .ok()
        .filter(|value| *value <= MAX_COUNT)
        .map_or(0, |value| sign * value)
}
