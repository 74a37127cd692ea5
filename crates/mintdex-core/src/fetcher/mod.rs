//! Token metadata fetching abstraction.
//!
//! Defines the [`TokenFetcher`] trait the repository resolves mints through,
//! an in-memory implementation ([`StaticFetcher`]), and a recording test mock
//! (`mock::MockFetcher`).

#[cfg(test)]
pub mod mock;
mod static_fetcher;

pub use static_fetcher::{StaticFetcher, StaticFetcherBuilder};

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use futures::future::join_all;

use crate::error::CoreError;
use crate::types::{Mint, Token};

/// Resolves mints into raw token metadata.
///
/// Implementations own their network, caching and timeout behaviour; the
/// repository passes their errors through untouched.
#[async_trait]
pub trait TokenFetcher: Send + Sync {
    /// Resolve a single mint. Unknown mints should fail with
    /// [`CoreError::MintNotFound`].
    async fn find(&self, mint: &Mint) -> Result<Token, CoreError>;

    /// Resolve a batch of mints. Mints that cannot be resolved are absent
    /// from the returned map rather than reported as errors.
    ///
    /// The default issues one concurrent `find` per distinct mint, treating
    /// `MintNotFound` as a gap and propagating every other failure.
    async fn find_many(&self, mints: &[Mint]) -> Result<HashMap<Mint, Token>, CoreError> {
        let mut seen = HashSet::with_capacity(mints.len());
        let distinct: Vec<&Mint> = mints.iter().filter(|mint| seen.insert(*mint)).collect();

        let results = join_all(distinct.iter().map(|mint| self.find(mint))).await;

        distinct
            .into_iter()
            .zip(results)
            .try_fold(HashMap::new(), |mut found, (mint, result)| {
                match result {
                    Ok(token) => {
                        found.insert(mint.clone(), token);
                    }
                    Err(CoreError::MintNotFound(_)) => {}
                    Err(err) => return Err(err),
                }
                Ok(found)
            })
    }
}
