//! In-memory store of per-ticker fundamental records.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use jerez_traits::{RawRecord, Result, Symbol, TickerRecord};

/// Owns every [`TickerRecord`] for the lifetime of a run.
///
/// Records are indexed by upper-cased symbol; lookups are case-insensitive.
/// All downstream computation borrows records read-only from the store.
#[derive(Debug, Default)]
pub struct TimeSeriesStore {
    records: HashMap<Symbol, TickerRecord>,
    skipped_lines: usize,
    duplicate_symbols: usize,
}

impl TimeSeriesStore {
    /// Loads a store from a JSONL file, one record per line.
    ///
    /// # Errors
    ///
    /// Fails only if the file cannot be opened or read. Malformed lines are
    /// skipped with a warning and counted, never fatal.
    pub fn from_jsonl_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads a store from any buffered reader of JSONL input.
    ///
    /// Blank lines are ignored. A line that fails to parse as
    /// `{"symbol": ..., "data": {...}}` with a `period_end_date` array is
    /// skipped with a warning and counted in [`Self::skipped_lines`].
    /// When the same symbol appears twice the later record wins.
    ///
    /// # Errors
    ///
    /// Fails only on I/O errors from the underlying reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut store = Self::default();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record = serde_json::from_str::<RawRecord>(&line)
                .map_err(jerez_traits::JerezError::from)
                .and_then(TickerRecord::try_from);

            match record {
                Ok(record) => {
                    let symbol = record.symbol().to_uppercase();
                    if store.records.insert(symbol.clone(), record).is_some() {
                        warn!(symbol, "duplicate symbol in feed, keeping later record");
                        store.duplicate_symbols += 1;
                    }
                }
                Err(err) => {
                    warn!(line = line_no + 1, %err, "skipping malformed feed line");
                    store.skipped_lines += 1;
                }
            }
        }

        Ok(store)
    }

    /// Looks up a record by symbol, case-insensitively.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&TickerRecord> {
        self.records.get(&symbol.to_uppercase())
    }

    /// All loaded symbols, sorted.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<Symbol> = self.records.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Iterates over all loaded records in arbitrary order.
    pub fn records(&self) -> impl Iterator<Item = &TickerRecord> {
        self.records.values()
    }

    /// Number of loaded records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of feed lines skipped as malformed during loading.
    #[must_use]
    pub const fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }

    /// Number of duplicate symbols replaced during loading.
    #[must_use]
    pub const fn duplicate_symbols(&self) -> usize {
        self.duplicate_symbols
    }
}
