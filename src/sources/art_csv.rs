//! Public art CSV export source

use std::fs;
use std::mem::take;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use super::{ArtSource, RawTable};
use crate::{CityScoutError, Result};

pub struct CsvArtSource {
    path: PathBuf,
}

impl CsvArtSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse CSV text; the first row is the header
    #[must_use]
    pub fn parse_table(text: &str) -> RawTable {
        let mut rows = parse_rows(text.trim_start_matches('\u{feff}'));
        if rows.is_empty() {
            return RawTable::default();
        }

        let headers = rows.remove(0).into_iter().map(|h| h.trim().to_string()).collect();
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        let cell = cell.trim();
                        (!cell.is_empty()).then(|| cell.to_string())
                    })
                    .collect()
            })
            .collect();

        RawTable { headers, rows }
    }
}

impl ArtSource for CsvArtSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn fetch_table(&self) -> Result<RawTable> {
        if !self.path.exists() {
            return Err(CityScoutError::fetch(format!(
                "Art data file not found: {}",
                self.path.display()
            )));
        }

        let text = fs::read_to_string(&self.path).map_err(|e| {
            CityScoutError::fetch(format!("Failed to read {}: {e}", self.path.display()))
        })?;

        let table = Self::parse_table(&text);
        info!("Read {} art rows", table.rows.len());
        Ok(table)
    }
}

/// Quote- and CRLF-tolerant CSV row splitter. Blank lines are dropped.
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Unterminated quotes still flush the last field
    row.push(field);
    if !(row.len() == 1 && row[0].is_empty()) {
        rows.push(row);
    }

    rows
}
