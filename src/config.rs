// wordlist_migrate/src/config.rs
// Explicit configuration for the extract and upload runs.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::decode::TextDecoding;
use crate::error::{MigrateError, Result};

pub const DEFAULT_SOURCE_PATH: &str = "scripts/word.mdb";
pub const DEFAULT_WORD_FILE: &str = "src/lib/word_list.json";
pub const DEFAULT_TABLE: &str = "Dictionary";
pub const DEFAULT_COLUMN: &str = "wordID";
/// Row count of the `Dictionary` table in the shipped Access file.
pub const DEFAULT_EXPECTED_COUNT: usize = 25_924;
pub const DEFAULT_DATABASE: &str = "kumkom_db";
pub const DEFAULT_COLLECTION: &str = "vocabulary";
pub const DEFAULT_ENV_FILE: &str = ".env.local";
pub const MONGODB_URI_ENV: &str = "MONGODB_URI";

/// Settings for one extractor run.
#[derive(Debug, Clone,)]
pub struct ExtractConfig {
    pub source_path:    PathBuf,
    pub output_path:    PathBuf,
    pub table:          String,
    pub column:         String,
    pub expected_count: usize,
    pub decoding:       TextDecoding,
}

impl ExtractConfig {
    /// Builds the `SELECT` issued against the Access file.
    pub fn query(&self,) -> Result<String,> {
        validate_identifier("table", &self.table,)?;
        validate_identifier("column", &self.column,)?;
        Ok(format!("SELECT [{}] FROM [{}]", self.column, self.table),)
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            source_path:    PathBuf::from(DEFAULT_SOURCE_PATH,),
            output_path:    PathBuf::from(DEFAULT_WORD_FILE,),
            table:          DEFAULT_TABLE.to_string(),
            column:         DEFAULT_COLUMN.to_string(),
            expected_count: DEFAULT_EXPECTED_COUNT,
            decoding:       TextDecoding::default(),
        }
    }
}

/// How the uploader swaps the collection contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum,)]
pub enum ReplaceStrategy {
    /// Delete every document, then insert the new batch. A failed insert leaves the
    /// collection empty.
    #[default]
    DeleteThenInsert,
    /// Delete and insert inside one multi-document transaction. Requires a replica set.
    Transactional,
}

/// Settings for one uploader run.
#[derive(Clone,)]
pub struct UploadConfig {
    pub input_path:   PathBuf,
    pub uri:          String,
    pub database:     String,
    pub collection:   String,
    pub strategy:     ReplaceStrategy,
    pub create_index: bool,
}

impl UploadConfig {
    pub fn new(uri: impl Into<String,>,) -> Self {
        Self {
            input_path:   PathBuf::from(DEFAULT_WORD_FILE,),
            uri:          uri.into(),
            database:     DEFAULT_DATABASE.to_string(),
            collection:   DEFAULT_COLLECTION.to_string(),
            strategy:     ReplaceStrategy::default(),
            create_index: true,
        }
    }
}

impl fmt::Debug for UploadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result {
        f.debug_struct("UploadConfig",)
            .field("input_path", &self.input_path,)
            .field("uri", &redact_uri(&self.uri,),)
            .field("database", &self.database,)
            .field("collection", &self.collection,)
            .field("strategy", &self.strategy,)
            .field("create_index", &self.create_index,)
            .finish()
    }
}

/// Loads `KEY=value` pairs from `path` without overriding variables already set.
///
/// Returns `false` when the file does not exist, which is not an error: the URI may
/// come from the shell or `--uri` instead.
pub fn load_env_file(path: &Path,) -> Result<bool,> {
    match dotenvy::from_filename(path,) {
        Ok(_,) => Ok(true,),
        Err(e,) if e.not_found() => Ok(false,),
        Err(e,) => Err(MigrateError::ConfigurationError(format!(
            "Failed to load {}: {}",
            path.display(),
            e
        ),),),
    }
}

/// Masks the password of a connection URI so it can be logged.
pub fn redact_uri(uri: &str,) -> String {
    match Url::parse(uri,) {
        Ok(mut parsed,) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("****",),);
            }
            parsed.to_string()
        },
        Err(_,) => "<unparseable uri>".to_string(),
    }
}

/// Accepts ASCII letters, digits and underscores only, since the names are spliced
/// into bracket-quoted SQL.
pub fn validate_identifier(what: &str, name: &str,) -> Result<(),> {
    let valid = !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_',);
    if valid {
        Ok((),)
    } else {
        Err(MigrateError::ConfigurationError(format!(
            "Invalid {} name '{}'",
            what, name
        ),),)
    }
}
