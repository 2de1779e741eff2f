//! Tabular parser: raw file content into a [`RawGrid`]
//!
//! Records are read with the `csv` crate in flexible mode so ragged rows
//! survive parsing and can be reported by the caller. When no delimiter is
//! forced, one is sniffed from the first lines of the file.

use csv::ReaderBuilder;
use tracing::debug;

use super::grid::{Cell, RawGrid};
use super::validate::ImportError;

/// Delimiters tried when sniffing, in order of preference on ties
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

const SNIFF_LINES: usize = 20;

/// Options for the tabular parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Delimiter to use instead of sniffing one
    pub delimiter: Option<u8>,
}

/// Parse raw file bytes into a grid
///
/// Fails with an `upload` error when the bytes are not UTF-8, hold no
/// rows, or no delimiter can be detected.
pub fn parse_bytes(bytes: &[u8], options: ParseOptions) -> Result<RawGrid, ImportError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| ImportError::upload("the file is not valid UTF-8 text"))?;
    parse_text(text, options)
}

/// Parse text content into a grid
pub fn parse_text(text: &str, options: ParseOptions) -> Result<RawGrid, ImportError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Err(ImportError::upload("the file is empty"));
    }

    let delimiter = match options.delimiter {
        Some(d) => d,
        None => sniff_delimiter(text)
            .ok_or_else(|| ImportError::upload("could not detect a field delimiter"))?,
    };
    debug!(delimiter = %char::from(delimiter), "parsing tabular content");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::upload(e.to_string()))?;
        let row: Vec<Cell> = record.iter().map(Cell::from).collect();
        if row.iter().all(Cell::is_blank) {
            continue;
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ImportError::upload("no rows were found"));
    }

    Ok(RawGrid::new(rows))
}

/// Pick the candidate delimiter that splits the first lines most consistently
///
/// Returns `None` when every candidate leaves each sampled line as a
/// single field.
pub fn sniff_delimiter(text: &str) -> Option<u8> {
    let sample: String = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SNIFF_LINES)
        .collect::<Vec<_>>()
        .join("\n");

    let mut best: Option<((usize, usize), u8)> = None;
    for &candidate in &CANDIDATE_DELIMITERS {
        let Some(score) = score_delimiter(&sample, candidate) else {
            continue;
        };
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, candidate));
        }
    }
    best.map(|(_, delimiter)| delimiter)
}

/// Score is (rows sharing the most common field count, that field count)
fn score_delimiter(sample: &str, delimiter: u8) -> Option<(usize, usize)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(sample.as_bytes());

    let mut counts: Vec<usize> = Vec::new();
    for record in reader.records() {
        counts.push(record.ok()?.len());
    }

    let mut best: Option<(usize, usize)> = None;
    for &width in &counts {
        if width < 2 {
            continue;
        }
        let agreeing = counts.iter().filter(|&&w| w == width).count();
        let score = (agreeing, width);
        if best.map_or(true, |b| score > b) {
            best = Some(score);
        }
    }
    best
}
