// wordlist_migrate/src/source/mod.rs
// Sources the extractor can read raw word values from.

#[cfg(feature = "odbc")]
pub mod access;

use async_trait::async_trait;

use crate::error::Result;

/// A table column producing one optional text value per row.
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Human readable name used in log records.
    fn describe(&self,) -> String;

    /// Runs the query and returns every row's value, already decoded, in result order.
    /// `None` marks a SQL `NULL`.
    async fn fetch_values(&self,) -> Result<Vec<Option<String,>,>,>;
}
