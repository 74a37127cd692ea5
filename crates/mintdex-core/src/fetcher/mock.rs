use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{Mint, Token};

use super::TokenFetcher;

/// A mock fetcher for testing. Returns canned tokens from a `HashMap`
/// populated via the builder pattern and records every call it receives.
pub struct MockFetcher {
    tokens: HashMap<Mint, Token>,
    failing: HashSet<Mint>,
    find_calls: Mutex<Vec<Mint>>,
    find_many_calls: Mutex<Vec<Vec<Mint>>>,
}

impl MockFetcher {
    pub fn builder() -> MockFetcherBuilder {
        MockFetcherBuilder {
            tokens: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    pub fn find_calls(&self) -> Vec<Mint> {
        self.find_calls.lock().expect("mock lock").clone()
    }

    pub fn find_many_calls(&self) -> Vec<Vec<Mint>> {
        self.find_many_calls.lock().expect("mock lock").clone()
    }
}

pub struct MockFetcherBuilder {
    tokens: HashMap<Mint, Token>,
    failing: HashSet<Mint>,
}

impl MockFetcherBuilder {
    pub fn with_token(mut self, token: Token) -> Self {
        self.tokens.insert(token.mint.clone(), token);
        self
    }

    /// Any lookup touching `mint` fails with `CoreError::Fetch`.
    pub fn with_failure(mut self, mint: &str) -> Self {
        self.failing.insert(Mint::from(mint));
        self
    }

    pub fn build(self) -> MockFetcher {
        MockFetcher {
            tokens: self.tokens,
            failing: self.failing,
            find_calls: Mutex::new(Vec::new()),
            find_many_calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TokenFetcher for MockFetcher {
    async fn find(&self, mint: &Mint) -> Result<Token, CoreError> {
        self.find_calls.lock().expect("mock lock").push(mint.clone());
        if self.failing.contains(mint) {
            return Err(CoreError::Fetch(format!("simulated failure for {mint}")));
        }
        self.tokens
            .get(mint)
            .cloned()
            .ok_or_else(|| CoreError::MintNotFound(mint.clone()))
    }

    async fn find_many(&self, mints: &[Mint]) -> Result<HashMap<Mint, Token>, CoreError> {
        self.find_many_calls
            .lock()
            .expect("mock lock")
            .push(mints.to_vec());
        if let Some(mint) = mints.iter().find(|m| self.failing.contains(*m)) {
            return Err(CoreError::Fetch(format!("simulated failure for {mint}")));
        }
        Ok(mints
            .iter()
            .filter_map(|mint| Some((mint.clone(), self.tokens.get(mint)?.clone())))
            .collect())
    }
}
