// wordlist_migrate/src/extractor.rs
// Pulls the word column out of the legacy database into the intermediate JSON file.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::source::WordSource;
use crate::words::{normalize_rows, write_word_file};

#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ExtractSummary {
    pub written:     usize,
    pub expected:    usize,
    pub output_path: PathBuf,
}

impl ExtractSummary {
    pub fn matches_expected(&self,) -> bool {
        self.written == self.expected
    }
}

/// Reads every row from `source`, normalises it and writes the word file.
///
/// Nothing is written unless the whole result set was fetched. A count that
/// differs from `expected_count` is logged as a warning, not returned as an error.
pub async fn run_extract(source: &dyn WordSource, config: &ExtractConfig,) -> Result<ExtractSummary,> {
    info!("Extracting {}.{} from {}", config.table, config.column, source.describe());
    let rows = source.fetch_values().await?;
    let total_rows = rows.len();

    let words = normalize_rows(rows,);
    info!(
        "Kept {} of {} rows after dropping empty values",
        words.len(),
        total_rows
    );

    write_word_file(&config.output_path, &words,)?;
    info!("Wrote {}", config.output_path.display());

    let summary = ExtractSummary {
        written:     words.len(),
        expected:    config.expected_count,
        output_path: config.output_path.clone(),
    };
    if !summary.matches_expected() {
        warn!(
            "Extracted {} words, expected {}",
            summary.written, summary.expected
        );
    }
    Ok(summary,)
}
