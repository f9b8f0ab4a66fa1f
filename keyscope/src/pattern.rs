//! Key pattern normalization.
//!
//! Maps a key to its structural fingerprint by collapsing every maximal
//! run of ASCII decimal digits into a single placeholder. Keys that
//! differ only in their numeric components normalize to the same
//! pattern, which is what lets the aggregator stay bounded: the number
//! of distinct patterns tracks the number of naming families in the key
//! space, not the number of keys.
//!
//! Normalization is pure and idempotent — a pattern contains no digit
//! runs, so re-normalizing it yields itself.

/// Placeholder substituted for each maximal run of decimal digits.
pub const PLACEHOLDER: char = '#';

/// Derives the structural pattern of a key.
///
/// Every maximal contiguous run of ASCII digits becomes a single
/// [`PLACEHOLDER`]; all other characters pass through unchanged,
/// preserving delimiters and casing. Separate digit runs are replaced
/// independently and never merge.
///
/// This is a total function over all strings: the empty string and
/// digit-free strings return themselves.
///
/// # Examples
///
/// ```rust
/// use keyscope::pattern::normalize;
///
/// assert_eq!(normalize("user:123:profile"), "user:#:profile");
/// assert_eq!(normalize("session:9981"), "session:#");
/// assert_eq!(normalize("config"), "config");
/// ```
pub fn normalize(key: &str) -> String {
    let mut pattern = String::with_capacity(key.len());
    let mut in_digit_run = false;

    for ch in key.chars() {
        if ch.is_ascii_digit() {
            if !in_digit_run {
                pattern.push(PLACEHOLDER);
                in_digit_run = true;
            }
        } else {
            pattern.push(ch);
            in_digit_run = false;
        }
    }

    pattern
}
