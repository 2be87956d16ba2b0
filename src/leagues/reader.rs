//! Tabular input for player profiles
//!
//! Files are CSV or TSV; the delimiter is guessed from the first 2048 bytes.
//! The first row is the header.

use crate::leagues::{LeagueError, LeagueResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;

/// One data row, keyed by column name
pub type Row = HashMap<String, String>;

const SNIFF_BYTES: usize = 2048;

/// Picks `,` when the sample has more commas than tabs, otherwise tab
pub fn detect_delimiter(content: &str) -> u8 {
    let sample = &content.as_bytes()[..content.len().min(SNIFF_BYTES)];
    let commas = sample.iter().filter(|&&b| b == b',').count();
    let tabs = sample.iter().filter(|&&b| b == b'\t').count();

    if commas > tabs {
        b','
    } else {
        b'\t'
    }
}

/// Parses delimited text into rows
pub fn parse_table(content: &str) -> LeagueResult<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(detect_delimiter(content))
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Row = headers
            .iter()
            .cloned()
            .zip(record.iter().map(String::from))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Reads and parses a CSV/TSV file
pub fn read_table(path: &Path) -> LeagueResult<Vec<Row>> {
    let content = std::fs::read_to_string(path).map_err(|source| LeagueError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_table(&content)
}
