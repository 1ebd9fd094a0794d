//! Option-string parsing for method configuration.
//!
//! Methods are configured from a single string of `--key value` pairs, e.g.
//! `"--sort-method STD --threads 4"`. Parsing splits the string into pairs;
//! interpretation of each key is left to the method being configured, which
//! rejects keys nobody recognizes with [`GedError::InvalidOption`].

use crate::error::GedError;

/// Splits an option string into `(key, value)` pairs.
///
/// The expected shape is zero or more `--key value` groups separated by
/// whitespace. The leading `--` is stripped from the returned keys.
///
/// # Errors
///
/// Returns [`GedError::InvalidOption`] when a token does not start with
/// `--` where a key is expected, or when a key has no value.
pub fn parse_option_string(options: &str) -> Result<Vec<(String, String)>, GedError> {
    let mut pairs = Vec::new();
    let mut tokens = options.split_whitespace();
    while let Some(token) = tokens.next() {
        let key = token
            .strip_prefix("--")
            .ok_or_else(|| GedError::invalid_option(token))?;
        if key.is_empty() {
            return Err(GedError::invalid_option(token));
        }
        let value = tokens
            .next()
            .ok_or_else(|| GedError::invalid_option(key))?;
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(pairs)
}
