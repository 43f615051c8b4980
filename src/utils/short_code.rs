//! Short code encoding and validation.
//!
//! Short codes are the base-62 representation of a link's database id,
//! written with a fixed alphabet, most significant symbol first. Lookups
//! always compare the stored code string, so no decoder exists.

/// Symbols used as base-62 digits, in positional order.
pub const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Radix of the encoding.
pub const BASE: u64 = ALPHABET.len() as u64;

/// Encodes a positive id into its short code.
///
/// Uses repeated division, so there is never a leading zero symbol.
/// `encode(0)` is the empty string; ids handed out by the store start at 1.
///
/// # Examples
///
/// ```
/// use shortener::utils::short_code::encode;
///
/// assert_eq!(encode(1), "1");
/// assert_eq!(encode(61), "Z");
/// assert_eq!(encode(62), "10");
/// ```
pub fn encode(id: u64) -> String {
    // u64::MAX needs 11 base-62 digits
    let mut digits = Vec::with_capacity(11);
    let mut rest = id;

    while rest > 0 {
        digits.push(ALPHABET[(rest % BASE) as usize]);
        rest /= BASE;
    }

    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/// Returns `true` if `code` is non-empty and made only of alphabet symbols.
///
/// Used to reject malformed codes before the store is queried.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| ALPHABET.contains(&b))
}
