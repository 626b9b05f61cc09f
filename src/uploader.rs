// wordlist_migrate/src/uploader.rs
// Replaces the remote vocabulary collection with the contents of the word file.

use std::path::Path;

use tracing::{info, warn};

use crate::config::{ReplaceStrategy, UploadConfig};
use crate::error::Result;
use crate::store::WordStore;
use crate::store::mongo::MongoStore;
use crate::words::{WordDocument, read_word_file, to_documents};

#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct UploadSummary {
    pub deleted:     u64,
    pub inserted:    usize,
    /// Set when the words were replaced but the `word` index could not be ensured.
    pub index_error: Option<String,>,
}

/// Reads the word file and shapes each entry as a `{ word }` document.
pub fn load_documents(path: &Path,) -> Result<Vec<WordDocument,>,> {
    let words = read_word_file(path,)?;
    info!("Loaded {} words from {}", words.len(), path.display());
    Ok(to_documents(&words,),)
}

/// Swaps the store's contents for `documents`, then optionally ensures the word index.
///
/// The replace is the upload; an index failure after it is recorded in the summary
/// instead of failing a run whose words are already stored.
pub async fn upload_documents<S: WordStore + ?Sized,>(
    store: &S,
    documents: Vec<WordDocument,>,
    strategy: ReplaceStrategy,
    create_index: bool,
) -> Result<UploadSummary,> {
    let outcome = store.replace_all(documents, strategy,).await?;
    let mut index_error = None;
    if create_index {
        if let Err(e,) = store.ensure_word_index().await {
            warn!("Words replaced but the word index was not ensured: {}", e);
            index_error = Some(e.to_string(),);
        }
    }
    Ok(UploadSummary {
        deleted: outcome.deleted,
        inserted: outcome.inserted,
        index_error,
    },)
}

/// Full uploader run against MongoDB. The word file is read before connecting, so a
/// bad file never touches the collection.
pub async fn run_upload(config: &UploadConfig,) -> Result<UploadSummary,> {
    let documents = load_documents(&config.input_path,)?;
    let store = MongoStore::connect(&config.uri, &config.database, &config.collection,).await?;
    upload_documents(&store, documents, config.strategy, config.create_index,).await
}
