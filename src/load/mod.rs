// src/load/mod.rs
pub mod utils;

use csv::ReaderBuilder;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{debug, info};

use crate::error::{BestStatsError, Result};
use utils::clean_str;

/// A CSV table as read from disk: one header row plus string cells.
#[derive(Debug, Clone)]
pub struct WideTable {
    /// File stem, used in diagnostics
    pub name: String,
    /// Column names, trimmed and unquoted.
    pub headers: Vec<String>,
    /// Each data row, one String per field. Rows may be shorter or longer than `headers`.
    pub rows: Vec<Vec<String>>,
}

impl WideTable {
    /// Position of `column` in the header row.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| BestStatsError::SchemaMismatch {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Cell at (`row`, `col`), or "" when the row is short.
    pub fn cell<'a>(row: &'a [String], col: usize) -> &'a str {
        row.get(col).map(String::as_str).unwrap_or("")
    }
}

/// Read `path` as CSV, discarding `skip_rows` raw lines before the header.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_table<P: AsRef<Path>>(path: P, skip_rows: usize) -> Result<WideTable> {
    let path = path.as_ref();
    let missing = |source: std::io::Error| BestStatsError::MissingInputFile {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(missing)?;
    let mut reader = BufReader::new(file);

    // leading metadata lines are not CSV records, drop them raw
    let mut line = String::new();
    for _ in 0..skip_rows {
        line.clear();
        if reader.read_line(&mut line).map_err(missing)? == 0 {
            break;
        }
    }

    let malformed = |source: csv::Error| BestStatsError::MalformedCsv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers().map_err(malformed)?.iter().map(clean_str).collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(malformed)?;
        rows.push(record.iter().map(clean_str).collect::<Vec<_>>());
    }

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    debug!(table = %name, columns = headers.len(), "parsed header");
    info!(table = %name, rows = rows.len(), "loaded table");

    Ok(WideTable {
        name,
        headers,
        rows,
    })
}
