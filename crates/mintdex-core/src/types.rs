//! Domain types for mintdex's token index.
//!
//! Contains the canonical mint key (`Mint`), fetched token metadata
//! (`Token`), and the query-time composite of metadata and tags
//! (`TokenWithTags`).

use serde::{Deserialize, Serialize};

// ==============================================================================
// Mint
// ==============================================================================

/// Canonical string form of a token mint address.
///
/// Every map in the index is keyed by `Mint`, so all conversions into it
/// normalise first: two spellings of the same address that differ only in
/// surrounding whitespace compare equal. Deeper address canonicalisation
/// (e.g. base58 decoding) belongs to the caller's address type; anything that
/// can render itself as a string converts via `Mint::new(addr.to_string())`.
///
/// `#[serde(from, into)]` keeps the JSON form a bare string while still
/// routing deserialisation through the normalising constructor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Mint(String);

impl Mint {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Mint {
    fn from(raw: String) -> Self {
        if raw.trim().len() == raw.len() {
            Self(raw)
        } else {
            Self::new(raw)
        }
    }
}

impl From<&str> for Mint {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<&String> for Mint {
    fn from(raw: &String) -> Self {
        Self::new(raw)
    }
}

impl From<&Mint> for Mint {
    fn from(mint: &Mint) -> Self {
        mint.clone()
    }
}

impl From<Mint> for String {
    fn from(mint: Mint) -> Self {
        mint.0
    }
}

impl AsRef<str> for Mint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Mint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Mint {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

// ==============================================================================
// Token Metadata
// ==============================================================================

/// Raw token metadata as resolved by a [`TokenFetcher`](crate::fetcher::TokenFetcher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub mint: Mint,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Token {
    pub fn new(mint: impl Into<Mint>, decimals: u8) -> Self {
        Self {
            mint: mint.into(),
            decimals,
            name: None,
            symbol: None,
            image: None,
        }
    }
}

/// Fetched metadata merged with the mint's tag set at query time.
///
/// Never stored by the repository; rebuilt on every read so the tags always
/// reflect the index as it was when the query ran. Serialises flat, with
/// `tags` alongside the token fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenWithTags {
    #[serde(flatten)]
    pub token: Token,
    pub tags: Vec<String>,
}

impl TokenWithTags {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl std::ops::Deref for TokenWithTags {
    type Target = Token;
    fn deref(&self) -> &Token {
        &self.token
    }
}
