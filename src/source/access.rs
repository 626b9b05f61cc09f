// wordlist_migrate/src/source/access.rs
// Microsoft Access (.mdb/.accdb) source read through the ODBC driver manager.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use odbc_api::sys::SqlDataType;
use odbc_api::{ConnectionOptions, Cursor, Environment, ResultSetMetadata};
use tokio::task;
use tracing::{debug, info};

use crate::config::ExtractConfig;
use crate::decode::TextDecoding;
use crate::error::{MigrateError, Result};
use crate::source::WordSource;

pub const ACCESS_DRIVER: &str = "Microsoft Access Driver (*.mdb, *.accdb)";

/// How a column's values are pulled off the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum FetchMode {
    /// `SQL_C_CHAR` bytes in the file's code page.
    Narrow,
    /// `SQL_C_WCHAR` UTF-16 code units.
    Wide,
}

impl FetchMode {
    pub fn for_sql_type(sql_type: SqlDataType,) -> Self {
        let narrow = [
            SqlDataType::CHAR,
            SqlDataType::VARCHAR,
            SqlDataType::EXT_LONG_VARCHAR,
        ];
        if narrow.contains(&sql_type,) {
            FetchMode::Narrow
        } else {
            FetchMode::Wide
        }
    }
}

pub struct AccessSource {
    path:     PathBuf,
    query:    String,
    decoding: TextDecoding,
}

impl AccessSource {
    pub fn new(config: &ExtractConfig,) -> Result<Self,> {
        let query = config.query()?;
        let path = std::path::absolute(&config.source_path,)?;
        Ok(AccessSource {
            path,
            query,
            decoding: config.decoding,
        },)
    }

    pub fn connection_string(&self,) -> String {
        connection_string(&self.path,)
    }
}

pub fn connection_string(path: &Path,) -> String {
    format!("DRIVER={{{}}};DBQ={};", ACCESS_DRIVER, path.display())
}

#[async_trait]
impl WordSource for AccessSource {
    fn describe(&self,) -> String {
        format!("Access file {}", self.path.display())
    }

    async fn fetch_values(&self,) -> Result<Vec<Option<String,>,>,> {
        if !self.path.is_file() {
            return Err(MigrateError::ConnectionError(format!(
                "Access file not found: {}",
                self.path.display()
            ),),);
        }

        let connection_string = self.connection_string();
        let query = self.query.clone();
        let decoding = self.decoding;

        // The environment, connection and cursor all live inside this closure and are
        // released when it returns, on success and on error alike.
        let values = task::spawn_blocking(move || {
            fetch_blocking(&connection_string, &query, decoding,)
        },)
        .await
        .map_err(|e| {
            MigrateError::QueryError(format!("Failed to join ODBC fetch task: {}", e),)
        },)??;

        info!("Fetched {} rows from {}", values.len(), self.describe());
        Ok(values,)
    }
}

fn fetch_blocking(
    connection_string: &str,
    query: &str,
    decoding: TextDecoding,
) -> Result<Vec<Option<String,>,>,> {
    let env = Environment::new().map_err(|e| {
        MigrateError::ConnectionError(format!("Failed to initialise ODBC environment: {}", e),)
    },)?;
    let conn = env
        .connect_with_connection_string(connection_string, ConnectionOptions::default(),)
        .map_err(|e| {
            MigrateError::ConnectionError(format!("Failed to open Access database: {}", e),)
        },)?;

    debug!("Executing: {}", query);
    let mut cursor = conn
        .execute(query, (),)
        .map_err(|e| MigrateError::QueryError(e.to_string(),),)?
        .ok_or_else(|| MigrateError::QueryError(format!("'{}' returned no result set", query),),)?;

    let data_type = cursor
        .col_data_type(1,)
        .map_err(|e| MigrateError::QueryError(e.to_string(),),)?;
    let mode = FetchMode::for_sql_type(data_type.data_type(),);
    debug!("Column type {:?}, fetching as {:?}", data_type, mode);

    let mut values = Vec::new();
    let mut narrow = Vec::new();
    let mut wide = Vec::new();
    while let Some(mut row,) = cursor
        .next_row()
        .map_err(|e| MigrateError::QueryError(e.to_string(),),)?
    {
        let value = match mode {
            FetchMode::Narrow => {
                let present = row
                    .get_text(1, &mut narrow,)
                    .map_err(|e| MigrateError::QueryError(e.to_string(),),)?;
                if present { Some(decoding.decode_narrow(&narrow,)?,) } else { None }
            },
            FetchMode::Wide => {
                let present = row
                    .get_wide_text(1, &mut wide,)
                    .map_err(|e| MigrateError::QueryError(e.to_string(),),)?;
                if present { Some(decoding.decode_wide(&wide,)?,) } else { None }
            },
        };
        values.push(value,);
    }
    Ok(values,)
}
