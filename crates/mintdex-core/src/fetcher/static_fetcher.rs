//! In-memory fetcher backed by a fixed set of token metadata, loaded either
//! through the builder or from a JSONL file (one `Token` object per line).

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::{Mint, Token};

use super::TokenFetcher;

pub struct StaticFetcher {
    tokens: HashMap<Mint, Token>,
}

impl StaticFetcher {
    pub fn builder() -> StaticFetcherBuilder {
        StaticFetcherBuilder {
            tokens: HashMap::new(),
        }
    }

    /// Parse JSONL token metadata, skipping blank lines. A later line for the
    /// same mint replaces the earlier one and is logged as a warning.
    pub fn from_jsonl(content: &str) -> Result<Self, CoreError> {
        Ok(Self {
            tokens: parse_token_jsonl(content)?,
        })
    }

    pub fn from_jsonl_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_jsonl(&content)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

pub struct StaticFetcherBuilder {
    tokens: HashMap<Mint, Token>,
}

impl StaticFetcherBuilder {
    pub fn with_token(mut self, token: Token) -> Self {
        self.tokens.insert(token.mint.clone(), token);
        self
    }

    pub fn with_tokens(self, tokens: impl IntoIterator<Item = Token>) -> Self {
        tokens.into_iter().fold(self, Self::with_token)
    }

    pub fn build(self) -> StaticFetcher {
        StaticFetcher {
            tokens: self.tokens,
        }
    }
}

#[async_trait]
impl TokenFetcher for StaticFetcher {
    async fn find(&self, mint: &Mint) -> Result<Token, CoreError> {
        self.tokens
            .get(mint)
            .cloned()
            .ok_or_else(|| CoreError::MintNotFound(mint.clone()))
    }

    async fn find_many(&self, mints: &[Mint]) -> Result<HashMap<Mint, Token>, CoreError> {
        Ok(mints
            .iter()
            .filter_map(|mint| Some((mint.clone(), self.tokens.get(mint)?.clone())))
            .collect())
    }
}

fn parse_token_jsonl(content: &str) -> Result<HashMap<Mint, Token>, CoreError> {
    let mut tokens = HashMap::new();
    for (idx, raw) in content.lines().enumerate() {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }

        let token: Token = serde_json::from_str(raw).map_err(|e| CoreError::MetadataParse {
            line: idx + 1,
            message: e.to_string(),
        })?;
        if let Some(replaced) = tokens.insert(token.mint.clone(), token) {
            tracing::warn!(
                line = idx + 1,
                mint = %replaced.mint,
                "token metadata listed more than once; keeping the later line"
            );
        }
    }
    Ok(tokens)
}
