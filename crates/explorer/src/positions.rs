//! Batch position files: one FEN per line.
//!
//! Blank lines and lines starting with `#` are skipped. Anything after a `;`
//! is dropped, so EPD files with operations (`; D1 20`) can be read directly.

use serde::Serialize;
use std::path::Path;

use crate::error::ExplorerError;

/// One position from a batch file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    /// 1-based line number in the source file
    pub line: usize,
    pub fen: String,
}

pub fn parse_positions(text: &str) -> Vec<BatchEntry> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let fen = raw.split(';').next().unwrap_or("").trim();
            if fen.is_empty() || fen.starts_with('#') {
                return None;
            }
            Some(BatchEntry {
                line: idx + 1,
                fen: fen.to_string(),
            })
        })
        .collect()
}

pub fn read_positions(path: &Path) -> Result<Vec<BatchEntry>, ExplorerError> {
    let text = std::fs::read_to_string(path).map_err(|source| ExplorerError::Positions {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_positions(&text))
}

#[cfg(test)]
#[path = "positions_tests.rs"]
mod positions_tests;
