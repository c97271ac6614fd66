//! Alias generation

use rand::Rng;

/// Alphabet for generated aliases
///
/// Lowercase letters and digits only, so a generated alias never needs
/// escaping in a URL path
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Standard length of generated aliases
pub const DEFAULT_LENGTH: usize = 5;

/// Maximum number of saves attempted with freshly generated aliases before
/// the collision is reported to the caller
pub const MAX_GENERATE_ATTEMPTS: usize = 3;

/// Generate a random alias of `length` characters
///
/// Characters are drawn uniformly, with replacement, from [`ALPHABET`]. The
/// thread-local generator is seeded by the OS, calls do not share state.
pub fn generate(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
