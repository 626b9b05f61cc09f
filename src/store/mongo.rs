// wordlist_migrate/src/store/mongo.rs
// MongoDB specific storage logic.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, FindOptions, IndexOptions};
use mongodb::{Client, ClientSession, Collection, IndexModel};
use tracing::{info, warn};

use crate::config::{ReplaceStrategy, redact_uri};
use crate::error::{MigrateError, Result};
use crate::store::{ReplaceOutcome, WordStore};
use crate::words::WordDocument;

pub const WORD_INDEX_NAME: &str = "word_1";

pub struct MongoStore {
    client:     Client,
    database:   String,
    collection: Collection<WordDocument,>,
}

impl MongoStore {
    /// Parses the URI, builds a client and pings the deployment once.
    pub async fn connect(uri: &str, database: &str, collection: &str,) -> Result<Self,> {
        let client_options = ClientOptions::parse(uri,).await.map_err(|e| {
            MigrateError::ConfigurationError(format!("Failed to parse MongoDB URI: {}", e),)
        },)?;
        let client = Client::with_options(client_options,).map_err(|e| {
            MigrateError::ConnectionError(format!("Failed to create MongoDB client: {}", e),)
        },)?;

        client
            .database("admin",)
            .run_command(doc! {"ping": 1}, None,)
            .await
            .map_err(|e| {
                MigrateError::ConnectionError(format!("Failed to connect to MongoDB: {}", e),)
            },)?;
        info!("Connected to MongoDB at {}", redact_uri(uri));

        let collection = client
            .database(database,)
            .collection::<WordDocument>(collection,);

        Ok(MongoStore {
            client,
            database: database.to_string(),
            collection,
        },)
    }

    /// Every word in the collection, in insertion order.
    pub async fn all_words(&self,) -> Result<Vec<String,>,> {
        let options = FindOptions::builder().sort(doc! {"_id": 1},).build();
        self.find_words(doc! {}, options,).await
    }

    fn namespace(&self,) -> String {
        format!("{}.{}", self.database, self.collection.name())
    }

    async fn delete_then_insert(&self, documents: Vec<WordDocument,>,) -> Result<ReplaceOutcome,> {
        let deleted = self
            .collection
            .delete_many(doc! {}, None,)
            .await
            .map_err(|e| store_error("delete existing words", e,),)?
            .deleted_count;
        info!("Deleted {} documents from {}", deleted, self.namespace());

        if documents.is_empty() {
            warn!("No words to insert into {}", self.namespace());
            return Ok(ReplaceOutcome { deleted, inserted: 0, },);
        }

        let inserted = self
            .collection
            .insert_many(documents, None,)
            .await
            .map_err(|e| {
                warn!(
                    "Insert failed after delete; {} is now empty until the upload is re-run",
                    self.namespace()
                );
                store_error("insert words", e,)
            },)?
            .inserted_ids
            .len();

        Ok(ReplaceOutcome { deleted, inserted, },)
    }

    async fn transactional_replace(
        &self,
        documents: Vec<WordDocument,>,
    ) -> Result<ReplaceOutcome,> {
        let mut session = self
            .client
            .start_session(None,)
            .await
            .map_err(|e| store_error("start session", e,),)?;
        session
            .start_transaction(None,)
            .await
            .map_err(|e| store_error("start transaction", e,),)?;

        match self.replace_in_session(documents, &mut session,).await {
            Ok(outcome,) => {
                session
                    .commit_transaction()
                    .await
                    .map_err(|e| store_error("commit transaction", e,),)?;
                Ok(outcome,)
            },
            Err(err,) => {
                if let Err(abort_err,) = session.abort_transaction().await {
                    warn!("Failed to abort transaction: {}", abort_err);
                }
                Err(err,)
            },
        }
    }

    async fn replace_in_session(
        &self,
        documents: Vec<WordDocument,>,
        session: &mut ClientSession,
    ) -> Result<ReplaceOutcome,> {
        let deleted = self
            .collection
            .delete_many_with_session(doc! {}, None, session,)
            .await
            .map_err(|e| store_error("delete existing words", e,),)?
            .deleted_count;

        if documents.is_empty() {
            return Ok(ReplaceOutcome { deleted, inserted: 0, },);
        }

        let inserted = self
            .collection
            .insert_many_with_session(documents, None, session,)
            .await
            .map_err(|e| store_error("insert words", e,),)?
            .inserted_ids
            .len();
        Ok(ReplaceOutcome { deleted, inserted, },)
    }

    async fn find_words(&self, filter: Document, options: FindOptions,) -> Result<Vec<String,>,> {
        let cursor = self
            .collection
            .find(filter, options,)
            .await
            .map_err(|e| store_error("query words", e,),)?;
        let documents: Vec<WordDocument,> = cursor
            .try_collect()
            .await
            .map_err(|e| store_error("read words", e,),)?;
        Ok(documents.into_iter().map(|d| d.word,).collect(),)
    }
}

#[async_trait]
impl WordStore for MongoStore {
    async fn replace_all(
        &self,
        documents: Vec<WordDocument,>,
        strategy: ReplaceStrategy,
    ) -> Result<ReplaceOutcome,> {
        let outcome = match strategy {
            ReplaceStrategy::DeleteThenInsert => self.delete_then_insert(documents,).await?,
            ReplaceStrategy::Transactional => self.transactional_replace(documents,).await?,
        };
        info!(
            "Replaced {}: {} deleted, {} inserted",
            self.namespace(),
            outcome.deleted,
            outcome.inserted
        );
        Ok(outcome,)
    }

    async fn ensure_word_index(&self,) -> Result<(),> {
        let model = IndexModel::builder()
            .keys(doc! {"word": 1},)
            .options(
                IndexOptions::builder()
                    .name(WORD_INDEX_NAME.to_string(),)
                    .build(),
            )
            .build();
        self.collection
            .create_index(model, None,)
            .await
            .map_err(|e| store_error("create word index", e,),)?;
        info!("Ensured index {} on {}", WORD_INDEX_NAME, self.namespace());
        Ok((),)
    }

    async fn contains_word(&self, word: &str,) -> Result<bool,> {
        let found = self
            .collection
            .find_one(doc! {"word": word}, None,)
            .await
            .map_err(|e| store_error("look up word", e,),)?;
        Ok(found.is_some(),)
    }

    async fn words_with_prefix(&self, prefix: &str, limit: u32,) -> Result<Vec<String,>,> {
        let filter = doc! {
            "word": { "$regex": prefix_pattern(prefix), "$options": "i" }
        };
        // A zero limit means "no limit" to the server; callers pass at least 1.
        let options = FindOptions::builder().limit(i64::from(limit.max(1,),),).build();
        self.find_words(filter, options,).await
    }
}

fn store_error(action: &str, err: mongodb::error::Error,) -> MigrateError {
    MigrateError::StoreError(format!("Failed to {}: {}", action, err),)
}

/// Anchored regex matching words that start with `prefix` taken literally.
pub fn prefix_pattern(prefix: &str,) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1,);
    pattern.push('^',);
    for c in prefix.chars() {
        if "\\^$.|?*+()[]{}".contains(c,) {
            pattern.push('\\',);
        }
        pattern.push(c,);
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_prefix_is_anchored() {
        assert_eq!(prefix_pattern("กร"), "^กร");
    }

    #[test]
    fn regex_metacharacters_are_escaped() {
        assert_eq!(prefix_pattern("a.b*(c)"), r"^a\.b\*\(c\)");
        assert_eq!(prefix_pattern(r"\d"), r"^\\d");
    }
}
