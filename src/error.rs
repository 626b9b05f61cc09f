// wordlist_migrate/src/error.rs
// Defines custom error types for the wordlist_migrate crate.

use thiserror::Error;

#[derive(Debug, Error,)]
pub enum MigrateError {
    #[error("Failed to connect: {0}")]
    ConnectionError(String,),
    #[error("Query failed: {0}")]
    QueryError(String,),
    #[error("Invalid word list data: {0}")]
    DataFormatError(String,),
    #[error("Failed to decode text: {0}")]
    DecodeError(String,),
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String,),
    #[error("Document store error: {0}")]
    StoreError(String,),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error,),
}

impl MigrateError {
    /// Short label used in log records.
    pub fn kind(&self,) -> &'static str {
        match self {
            MigrateError::ConnectionError(_,) => "connection",
            MigrateError::QueryError(_,) => "query",
            MigrateError::DataFormatError(_,) => "data_format",
            MigrateError::DecodeError(_,) => "decode",
            MigrateError::ConfigurationError(_,) => "configuration",
            MigrateError::StoreError(_,) => "store",
            MigrateError::IoError(_,) => "io",
        }
    }
}

pub type Result<T,> = std::result::Result<T, MigrateError,>;
