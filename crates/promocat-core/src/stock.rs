use std::collections::HashMap;

/// Stock quantities keyed by material code (a parent SKU or a variant SKU).
///
/// Built once per load by folding the remote stock list. When a code appears
/// more than once the later entry overrides the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockIndex {
    quantities: HashMap<String, u64>,
}

impl StockIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `quantity` for `code`, returning the quantity it replaced.
    pub fn insert(&mut self, code: impl Into<String>, quantity: u64) -> Option<u64> {
        self.quantities.insert(code.into(), quantity)
    }

    /// Stock for `code`, or `0` when no record exists.
    #[must_use]
    pub fn get(&self, code: &str) -> u64 {
        self.quantities.get(code).copied().unwrap_or(0)
    }

    /// Number of distinct material codes.
    #[must_use]
    pub fn code_count(&self) -> usize {
        self.quantities.len()
    }
}

impl<K: Into<String>> FromIterator<(K, u64)> for StockIndex {
    fn from_iter<I: IntoIterator<Item = (K, u64)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (code, quantity) in iter {
            index.insert(code, quantity);
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_code_defaults_to_zero() {
        let index = StockIndex::new();
        assert_eq!(index.get("A1"), 0);
        assert_eq!(index.code_count(), 0);
    }

    #[test]
    fn later_entry_overrides_earlier() {
        let index: StockIndex = [("A1", 5), ("A2", 3), ("A1", 9)].into_iter().collect();
        assert_eq!(index.get("A1"), 9);
        assert_eq!(index.get("A2"), 3);
        assert_eq!(index.code_count(), 2);
    }

    #[test]
    fn insert_reports_replaced_quantity() {
        let mut index = StockIndex::new();
        assert_eq!(index.insert("A1", 1), None);
        assert_eq!(index.insert("A1", 2), Some(1));
    }
}
