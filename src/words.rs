// wordlist_migrate/src/words.rs
// Word entries, their document shape, and the intermediate JSON file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MigrateError, Result};

/// One vocabulary item as stored in the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct WordDocument {
    pub word: String,
}

impl From<String,> for WordDocument {
    fn from(word: String,) -> Self {
        Self { word, }
    }
}

/// Trims a raw column value, dropping nulls and values that are blank after trimming.
pub fn normalize_entry(raw: Option<&str,>,) -> Option<String,> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string(),)
    }
}

/// Normalises a full result set, keeping source order and duplicates.
pub fn normalize_rows<I, S,>(rows: I,) -> Vec<String,>
where
    I: IntoIterator<Item = Option<S,>,>,
    S: AsRef<str,>,
{
    rows.into_iter()
        .filter_map(|row| normalize_entry(row.as_ref().map(|s| s.as_ref(),),),)
        .collect()
}

pub fn to_documents(words: &[String],) -> Vec<WordDocument,> {
    words.iter().cloned().map(WordDocument::from,).collect()
}

/// Writes the word list as a pretty-printed JSON array, replacing any previous file.
///
/// The parent directory is created when missing. Non-ASCII text is written as-is.
pub fn write_word_file(path: &Path, words: &[String],) -> Result<(),> {
    if let Some(parent,) = path.parent().filter(|p| !p.as_os_str().is_empty(),) {
        fs::create_dir_all(parent,)?;
    }
    let json = serde_json::to_string_pretty(words,).map_err(|e| {
        MigrateError::DataFormatError(format!("Failed to serialize word list: {}", e),)
    },)?;
    fs::write(path, json,)?;
    debug!("Wrote {} words to {}", words.len(), path.display());
    Ok((),)
}

pub fn read_word_file(path: &Path,) -> Result<Vec<String,>,> {
    let content = fs::read_to_string(path,).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            MigrateError::DataFormatError(format!("Word file not found: {}", path.display()),)
        },
        ErrorKind::InvalidData => MigrateError::DataFormatError(format!(
            "Word file {} is not valid UTF-8",
            path.display()
        ),),
        _ => MigrateError::IoError(e,),
    },)?;
    serde_json::from_str::<Vec<String,>,>(&content,).map_err(|e| {
        MigrateError::DataFormatError(format!(
            "Expected a JSON array of strings in {}: {}",
            path.display(),
            e
        ),)
    },)
}
