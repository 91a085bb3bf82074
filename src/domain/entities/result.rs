#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub keys: Vec<String>,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregatedResult {
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl AggregatedResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|row| row.sales).sum()
    }

    pub fn key_index(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|name| name == column)
            .filter(|idx| *idx + 1 < self.columns.len())
    }

    #[cfg(test)]
    pub fn find(&self, keys: &[&str]) -> Option<&ResultRow> {
        self.rows
            .iter()
            .find(|row| row.keys.iter().map(String::as_str).eq(keys.iter().copied()))
    }
}
