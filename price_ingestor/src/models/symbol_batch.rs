//! The records produced by one fetch call for one symbol.

use crate::models::price_record::PriceRecord;

/// Ordered records for a single symbol.
///
/// An empty batch means "no data for this symbol and range". It is not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolBatch {
    symbol: String,
    records: Vec<PriceRecord>,
}

impl SymbolBatch {
    /// Builds a batch. Every record must carry `symbol`.
    pub fn new(symbol: impl Into<String>, records: Vec<PriceRecord>) -> Self {
        let symbol = symbol.into();
        debug_assert!(
            records.iter().all(|r| r.symbol == symbol),
            "every record in a batch must belong to {symbol}"
        );
        Self { symbol, records }
    }

    pub fn empty(symbol: impl Into<String>) -> Self {
        Self::new(symbol, Vec::new())
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PriceRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a SymbolBatch {
    type Item = &'a PriceRecord;
    type IntoIter = std::slice::Iter<'a, PriceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
