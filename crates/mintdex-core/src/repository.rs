//! `TokenRepository`: the mint/tag index in front of a [`TokenFetcher`].
//!
//! Mints are registered with tags, directly or through a [`Mintlist`], and
//! later resolved into [`TokenWithTags`] records by mint, by batch, by tag,
//! or all at once. Excluded mints are dropped from every read path, but
//! their tag associations are kept.
//!
//! The repository does no locking of its own. Mutators take `&mut self`;
//! callers sharing one across tasks wrap it, e.g. in
//! `Arc<tokio::sync::RwLock<TokenRepository>>`.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::error::CoreError;
use crate::fetcher::TokenFetcher;
use crate::mintlist::Mintlist;
use crate::types::{Mint, Token, TokenWithTags};

/// Empty tag list, for registering mints that should only be visible
/// through `get`, `get_many` and `get_all`.
pub const NO_TAGS: &[&str] = &[];

pub struct TokenRepository {
    fetcher: Arc<dyn TokenFetcher>,
    /// Mint -> tags, in first-registration order. Ordered by mint so
    /// `get_all` enumerates deterministically.
    mint_tags: BTreeMap<Mint, Vec<String>>,
    /// Tag -> mints, in first-registration order. Mirror of `mint_tags`.
    tag_mints: HashMap<String, Vec<Mint>>,
    excluded: HashSet<Mint>,
}

impl TokenRepository {
    pub fn new(fetcher: Arc<dyn TokenFetcher>) -> Self {
        Self {
            fetcher,
            mint_tags: BTreeMap::new(),
            tag_mints: HashMap::new(),
            excluded: HashSet::new(),
        }
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Register `mint`, adding `tags` to whatever it already carries.
    /// A mint registered with no tags is still part of `get_all`.
    pub fn add_mint(&mut self, mint: impl Into<Mint>, tags: &[impl AsRef<str>]) -> &mut Self {
        self.associate(mint.into(), tags);
        self
    }

    pub fn add_mints(
        &mut self,
        mints: impl IntoIterator<Item = impl Into<Mint>>,
        tags: &[impl AsRef<str>],
    ) -> &mut Self {
        let mut count = 0usize;
        for mint in mints {
            self.associate(mint.into(), tags);
            count += 1;
        }
        tracing::debug!(count, tags = tags.len(), "registered mints");
        self
    }

    pub fn add_mintlist(&mut self, mintlist: &Mintlist, tags: &[impl AsRef<str>]) -> &mut Self {
        tracing::debug!(mintlist = %mintlist.name, "registering mintlist");
        self.add_mints(&mintlist.mints, tags)
    }

    // ========================================================================
    // Exclusion
    // ========================================================================

    /// Hide `mints` from every read. Their registrations and tags are kept.
    pub fn exclude_mints(
        &mut self,
        mints: impl IntoIterator<Item = impl Into<Mint>>,
    ) -> &mut Self {
        self.excluded.extend(mints.into_iter().map(Into::into));
        tracing::debug!(excluded = self.excluded.len(), "updated exclusion set");
        self
    }

    pub fn exclude_mintlist(&mut self, mintlist: &Mintlist) -> &mut Self {
        self.exclude_mints(&mintlist.mints)
    }

    // ========================================================================
    // Query
    // ========================================================================

    /// Resolve every registered, non-excluded mint.
    pub async fn get_all(&self) -> Result<Vec<TokenWithTags>, CoreError> {
        let mints: Vec<Mint> = self.mint_tags.keys().cloned().collect();
        self.resolve_batch(mints).await
    }

    /// Resolve a single mint. Excluded mints yield `Ok(None)` without
    /// reaching the fetcher; unregistered mints resolve with no tags.
    pub async fn get(&self, mint: impl Into<Mint>) -> Result<Option<TokenWithTags>, CoreError> {
        let mint = mint.into();
        if self.excluded.contains(&mint) {
            tracing::debug!(%mint, "skipping excluded mint");
            return Ok(None);
        }

        let token = self.fetcher.find(&mint).await?;
        Ok(Some(self.with_tags(&mint, token)))
    }

    /// Resolve a batch of mints with a single `find_many` call. Mints the
    /// fetcher cannot resolve, and excluded mints, are omitted. Results
    /// follow the order of first appearance in `mints`.
    pub async fn get_many(
        &self,
        mints: impl IntoIterator<Item = impl Into<Mint>>,
    ) -> Result<Vec<TokenWithTags>, CoreError> {
        self.resolve_batch(mints.into_iter().map(Into::into).collect()).await
    }

    /// Resolve every mint carrying `tag`. Unknown tags yield an empty list.
    pub async fn get_by_tag(&self, tag: &str) -> Result<Vec<TokenWithTags>, CoreError> {
        self.resolve_batch(self.mints_for_tag(tag).to_vec()).await
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Tags currently attached to `mint`; empty when it was never registered.
    pub fn tags_for(&self, mint: impl Into<Mint>) -> &[String] {
        self.mint_tags
            .get(&mint.into())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mints currently carrying `tag`, excluded ones included.
    pub fn mints_for_tag(&self, tag: &str) -> &[Mint] {
        self.tag_mints
            .get(tag)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All known tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.tag_mints.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    pub fn contains(&self, mint: impl Into<Mint>) -> bool {
        self.mint_tags.contains_key(&mint.into())
    }

    pub fn is_excluded(&self, mint: impl Into<Mint>) -> bool {
        self.excluded.contains(&mint.into())
    }

    /// Number of registered mints, excluded ones included.
    pub fn len(&self) -> usize {
        self.mint_tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mint_tags.is_empty()
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// The only place either map is written. Keeps `mint_tags` and
    /// `tag_mints` symmetric.
    fn associate(&mut self, mint: Mint, tags: &[impl AsRef<str>]) {
        let mint_tags = self.mint_tags.entry(mint.clone()).or_default();
        for tag in tags.iter().map(AsRef::as_ref) {
            if !mint_tags.iter().any(|t| t == tag) {
                mint_tags.push(tag.to_string());
            }

            let tag_mints = self.tag_mints.entry(tag.to_string()).or_default();
            if !tag_mints.contains(&mint) {
                tag_mints.push(mint.clone());
            }
        }
    }

    async fn resolve_batch(&self, mints: Vec<Mint>) -> Result<Vec<TokenWithTags>, CoreError> {
        let mut found = self.fetcher.find_many(&mints).await?;
        tracing::debug!(
            requested = mints.len(),
            resolved = found.len(),
            "resolved mint batch"
        );

        // Exclusion is applied after fetching so one batch call covers the
        // whole request.
        let mut seen = HashSet::with_capacity(mints.len());
        Ok(mints
            .into_iter()
            .filter(|mint| seen.insert(mint.clone()) && !self.excluded.contains(mint))
            .filter_map(|mint| {
                let token = found.remove(&mint)?;
                Some(self.with_tags(&mint, token))
            })
            .collect())
    }

    fn with_tags(&self, mint: &Mint, token: Token) -> TokenWithTags {
        TokenWithTags {
            token,
            tags: self.tags_for(mint).to_vec(),
        }
    }
}
