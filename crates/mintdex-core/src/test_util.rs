//! Shared test helpers for `mintdex-core` unit tests.

use crate::types::{Mint, Token};

/// Build a `Token` whose symbol doubles as a marker for assertions.
pub fn make_token(mint: &str, symbol: &str) -> Token {
    Token {
        mint: Mint::from(mint),
        decimals: 6,
        name: Some(format!("{symbol} Token")),
        symbol: Some(symbol.to_string()),
        image: None,
    }
}

/// Collect the mint strings from query results, sorted for order-insensitive
/// comparison.
pub fn sorted_mints<T: std::ops::Deref<Target = Token>>(records: &[T]) -> Vec<String> {
    let mut mints: Vec<String> = records.iter().map(|r| r.mint.to_string()).collect();
    mints.sort();
    mints
}
