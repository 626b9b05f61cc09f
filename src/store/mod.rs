// wordlist_migrate/src/store/mod.rs
// Document stores the uploader can replace the word collection in.

pub mod mongo;

use async_trait::async_trait;

use crate::config::ReplaceStrategy;
use crate::error::Result;
use crate::words::WordDocument;

/// Result of swapping a collection's contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default,)]
pub struct ReplaceOutcome {
    pub deleted:  u64,
    pub inserted: usize,
}

/// Trait for stores holding one `{ word }` document per vocabulary entry.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// Removes every document in the collection and inserts `documents` in order.
    async fn replace_all(
        &self,
        documents: Vec<WordDocument,>,
        strategy: ReplaceStrategy,
    ) -> Result<ReplaceOutcome,>;

    /// Creates the ascending `word` index if it does not exist yet.
    async fn ensure_word_index(&self,) -> Result<(),>;

    async fn contains_word(&self, word: &str,) -> Result<bool,>;

    /// Up to `limit` words starting with `prefix`, in collection order.
    async fn words_with_prefix(&self, prefix: &str, limit: u32,) -> Result<Vec<String,>,>;
}
