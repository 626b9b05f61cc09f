// wordlist_migrate/src/cli.rs
// Command Line Interface (CLI) specific logic for wordlist-migrate.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    DEFAULT_COLLECTION, DEFAULT_COLUMN, DEFAULT_DATABASE, DEFAULT_ENV_FILE,
    DEFAULT_EXPECTED_COUNT, DEFAULT_SOURCE_PATH, DEFAULT_TABLE, DEFAULT_WORD_FILE,
    ExtractConfig, MONGODB_URI_ENV, ReplaceStrategy, UploadConfig,
};
use crate::decode::{DEFAULT_NARROW_ENCODING, TextDecoding};
use crate::error::{MigrateError, Result};

/// Moves the Thai dictionary from the legacy Access file into MongoDB.
#[derive(Parser, Debug,)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Environment file holding MONGODB_URI, loaded before connecting
    #[clap(long, global = true, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,
}

#[derive(Parser, Debug,)]
pub enum Commands {
    /// Extract the word column from the Access file into the JSON word list
    Extract(ExtractArgs,),
    /// Replace the MongoDB vocabulary collection with the JSON word list
    Upload(UploadArgs,),
    /// Check whether a word, or words with a prefix, exist in the collection
    Lookup(LookupArgs,),
}

#[derive(Parser, Debug,)]
pub struct ExtractArgs {
    /// Path to the Access database file
    #[clap(long, default_value = DEFAULT_SOURCE_PATH)]
    pub source:   PathBuf,
    /// Path of the JSON word list to write
    #[clap(short, long, default_value = DEFAULT_WORD_FILE)]
    pub output:   PathBuf,
    /// Table holding the dictionary
    #[clap(long, default_value = DEFAULT_TABLE)]
    pub table:    String,
    /// Column holding one word per row
    #[clap(long, default_value = DEFAULT_COLUMN)]
    pub column:   String,
    /// Word count the extract is checked against
    #[clap(long, default_value_t = DEFAULT_EXPECTED_COUNT)]
    pub expected: usize,
    /// Code page of narrow (non-Unicode) text columns
    #[clap(long, default_value = DEFAULT_NARROW_ENCODING)]
    pub encoding: String,
}

impl ExtractArgs {
    pub fn into_config(self,) -> Result<ExtractConfig,> {
        Ok(ExtractConfig {
            source_path:    self.source,
            output_path:    self.output,
            table:          self.table,
            column:         self.column,
            expected_count: self.expected,
            decoding:       TextDecoding::from_label(&self.encoding,)?,
        },)
    }
}

#[derive(Parser, Debug,)]
pub struct StoreArgs {
    /// MongoDB connection string; falls back to MONGODB_URI
    #[clap(long)]
    pub uri:        Option<String,>,
    /// Database holding the vocabulary collection
    #[clap(long, default_value = DEFAULT_DATABASE)]
    pub database:   String,
    /// Collection receiving one document per word
    #[clap(long, default_value = DEFAULT_COLLECTION)]
    pub collection: String,
}

impl StoreArgs {
    /// Uses `--uri` when given, otherwise the `MONGODB_URI` environment variable.
    pub fn resolve_uri(&self,) -> Result<String,> {
        if let Some(uri,) = &self.uri {
            return Ok(uri.clone(),);
        }
        std::env::var(MONGODB_URI_ENV,).map_err(|_| {
            MigrateError::ConfigurationError(format!(
                "{} is not set and no --uri was given",
                MONGODB_URI_ENV
            ),)
        },)
    }
}

#[derive(Parser, Debug,)]
pub struct UploadArgs {
    /// Path of the JSON word list to read
    #[clap(short, long, default_value = DEFAULT_WORD_FILE)]
    pub input:    PathBuf,

    #[clap(flatten)]
    pub store: StoreArgs,

    /// How the old documents are swapped for the new ones
    #[clap(long, value_enum, default_value_t = ReplaceStrategy::DeleteThenInsert)]
    pub strategy: ReplaceStrategy,

    /// Skip creating the index on `word` after the upload
    #[clap(long)]
    pub no_index: bool,
}

impl UploadArgs {
    pub fn into_config(self,) -> Result<UploadConfig,> {
        let uri = self.store.resolve_uri()?;
        Ok(UploadConfig {
            input_path: self.input,
            uri,
            database: self.store.database,
            collection: self.store.collection,
            strategy: self.strategy,
            create_index: !self.no_index,
        },)
    }
}

#[derive(Parser, Debug,)]
pub struct LookupArgs {
    /// Exact word to look for
    #[clap(required_unless_present = "prefix")]
    pub word:   Option<String,>,

    /// List words starting with this text instead
    #[clap(long, conflicts_with = "word")]
    pub prefix: Option<String,>,

    /// Maximum number of prefix matches to list
    #[clap(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit:  u32,

    #[clap(flatten)]
    pub store: StoreArgs,
}
