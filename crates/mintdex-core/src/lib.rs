pub mod error;
pub mod fetcher;
pub mod mintlist;
pub mod repository;
#[cfg(test)]
mod test_util;
pub mod types;

pub use error::CoreError;
pub use fetcher::{StaticFetcher, TokenFetcher};
pub use mintlist::Mintlist;
pub use repository::{TokenRepository, NO_TAGS};
pub use types::{Mint, Token, TokenWithTags};
