//! Ticker universe selection.

use tracing::warn;

use jerez_traits::{JerezError, Result, Symbol};

use crate::TimeSeriesStore;

/// The set of tickers a run operates over.
#[derive(Debug, Clone)]
pub enum Universe {
    /// Every ticker loaded into the store.
    All,
    /// An explicit ticker set.
    Symbols(Vec<Symbol>),
}

impl Universe {
    /// Builds an explicit universe from raw user input, upper-casing and
    /// de-duplicating symbols.
    #[must_use]
    pub fn from_symbols<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<Symbol> = symbols
            .into_iter()
            .map(|s| s.as_ref().trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        cleaned.sort();
        cleaned.dedup();
        Self::Symbols(cleaned)
    }

    /// Resolves the universe against a loaded store, returning the sorted
    /// list of symbols to operate on.
    ///
    /// Requested symbols missing from the store are skipped with a warning;
    /// individually missing tickers must not abort a large run.
    ///
    /// # Errors
    ///
    /// Returns [`JerezError::Config`] when the store is empty or when an
    /// explicit universe matches nothing at all.
    pub fn resolve(&self, store: &TimeSeriesStore) -> Result<Vec<Symbol>> {
        if store.is_empty() {
            return Err(JerezError::Config("no ticker records loaded".to_string()));
        }

        match self {
            Self::All => Ok(store.symbols()),
            Self::Symbols(requested) => {
                if requested.is_empty() {
                    return Err(JerezError::Config("empty ticker universe".to_string()));
                }
                let mut resolved = Vec::with_capacity(requested.len());
                for symbol in requested {
                    if store.get(symbol).is_some() {
                        resolved.push(symbol.clone());
                    } else {
                        warn!(symbol, "requested ticker not in feed, skipping");
                    }
                }
                if resolved.is_empty() {
                    return Err(JerezError::Config(
                        "none of the requested tickers are loaded".to_string(),
                    ));
                }
                Ok(resolved)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn store() -> TimeSeriesStore {
        let feed = r#"{"symbol": "AAPL", "data": {"period_end_date": ["2023-09-30"], "revenue": [1.0]}}
{"symbol": "MSFT", "data": {"period_end_date": ["2023-06-30"], "revenue": [2.0]}}
"#;
        TimeSeriesStore::from_reader(Cursor::new(feed)).unwrap()
    }

    #[test]
    fn test_all_resolves_to_every_symbol() {
        let symbols = Universe::All.resolve(&store()).unwrap();
        assert_eq!(symbols, vec!["AAPL".to_string(), "MSFT".to_string()]);
    }

    #[test]
    fn test_explicit_universe_is_cleaned() {
        let universe = Universe::from_symbols(["aapl ", "AAPL", "", "msft"]);
        let symbols = universe.resolve(&store()).unwrap();
        assert_eq!(symbols, vec!["AAPL".to_string(), "MSFT".to_string()]);
    }

    #[test]
    fn test_missing_tickers_are_skipped() {
        let universe = Universe::from_symbols(["AAPL", "ZZZZ"]);
        let symbols = universe.resolve(&store()).unwrap();
        assert_eq!(symbols, vec!["AAPL".to_string()]);
    }

    #[test]
    fn test_fully_unresolvable_universe_is_config_error() {
        let universe = Universe::from_symbols(["ZZZZ"]);
        assert!(matches!(
            universe.resolve(&store()),
            Err(JerezError::Config(_))
        ));
    }

    #[test]
    fn test_empty_universe_is_config_error() {
        let universe = Universe::from_symbols(Vec::<String>::new());
        assert!(matches!(
            universe.resolve(&store()),
            Err(JerezError::Config(_))
        ));
    }

    #[test]
    fn test_empty_store_is_config_error() {
        let empty = TimeSeriesStore::from_reader(Cursor::new("")).unwrap();
        assert!(matches!(
            Universe::All.resolve(&empty),
            Err(JerezError::Config(_))
        ));
    }
}
