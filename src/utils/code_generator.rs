//! Deterministic short code derivation.
//!
//! A short code is the IEEE CRC-32 checksum of the URL's UTF-8 bytes,
//! rendered as 8 lowercase hexadecimal characters. Equal URLs always map to
//! equal codes, across calls and across process restarts.
//!
//! The output space is 32 bits, so unrelated URLs can collide. Collisions are
//! not detected here; the persistent store's uniqueness constraint on the code
//! column catches them at creation time (see
//! [`crate::application::services::LinkService::create`]).

use regex::Regex;
use std::sync::LazyLock;

/// Number of characters in every generated code.
pub const CODE_LENGTH: usize = 8;

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{8}$").expect("static regex"));

/// Derives the short code for a URL.
///
/// Pure and total: never fails, including for the empty string.
///
/// # Examples
///
/// ```
/// use quicklink::utils::code_generator::generate_code;
///
/// let code = generate_code("https://www.example.com");
/// assert_eq!(code.len(), 8);
/// assert_eq!(code, generate_code("https://www.example.com"));
/// ```
pub fn generate_code(url: &str) -> String {
    let checksum = crc32fast::hash(url.as_bytes());
    hex::encode(checksum.to_be_bytes())
}

/// Returns true if `code` has the shape of a generated code.
///
/// Used to reject malformed lookups before they reach the cache or the store.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}
