// wordlist_migrate/src/lib.rs
// Public API for the wordlist_migrate crate.

pub mod cli;
pub mod config;
pub mod decode;
pub mod error;
pub mod extractor;
pub mod report;
pub mod source;
pub mod store;
pub mod uploader;
pub mod words;
