use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::types::Value;

use crate::usecase::ports::repo::TabularData;

pub fn field_to_value(field: &str) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Value::Integer(v);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Value::Integer(v as i64),
        Ok(v) if v.is_finite() => Value::Real(v),
        _ => Value::Text(field.to_string()),
    }
}

pub fn read_csv(csv_path: &Path) -> Result<TabularData> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read headers from csv: {}", csv_path.display()))?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        rows.push(record.iter().map(field_to_value).collect());
    }

    Ok(TabularData {
        columns: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_to_value_infers_numbers() {
        assert_eq!(field_to_value("2023"), Value::Integer(2023));
        assert_eq!(field_to_value("-40.5"), Value::Real(-40.5));
        assert_eq!(field_to_value("2023.0"), Value::Integer(2023));
        assert_eq!(field_to_value(""), Value::Null);
        assert_eq!(field_to_value("COGS"), Value::Text("COGS".to_string()));
        assert_eq!(field_to_value("NaN"), Value::Text("NaN".to_string()));
    }
}
