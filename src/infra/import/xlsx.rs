use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use rusqlite::types::Value;

use crate::usecase::ports::repo::TabularData;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => crate::infra::sqlite::queries::format_f64(*v),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Integral floats become integers so a `Year` of 2023.0 reads back as "2023".
pub fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::String(v) => Value::Text(v.clone()),
        Data::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => {
            Value::Integer(*v as i64)
        }
        Data::Float(v) => Value::Real(*v),
        Data::Int(v) => Value::Integer(*v),
        Data::Bool(v) => Value::Integer(i64::from(*v)),
        Data::DateTime(v) => Value::Text(v.to_string()),
        Data::DateTimeIso(v) => Value::Text(v.clone()),
        Data::DurationIso(v) => Value::Text(v.clone()),
        Data::Error(_) | Data::Empty => Value::Null,
    }
}

/// Reads the first worksheet; its first row is the header.
pub fn read_workbook(xlsx_path: &Path) -> Result<TabularData> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open workbook: {}", xlsx_path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("workbook has no sheets: {}", xlsx_path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let mut rows = range.rows();
    let columns: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    if columns.is_empty() {
        anyhow::bail!("sheet {sheet_name} is empty")
    }

    let rows = rows
        .map(|row| row.iter().map(cell_to_value).collect())
        .collect();

    Ok(TabularData { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_to_value_keeps_integral_floats_as_integers() {
        assert_eq!(cell_to_value(&Data::Float(2023.0)), Value::Integer(2023));
        assert_eq!(cell_to_value(&Data::Float(-12.5)), Value::Real(-12.5));
        assert_eq!(cell_to_value(&Data::Empty), Value::Null);
        assert_eq!(
            cell_to_value(&Data::String("Sales".to_string())),
            Value::Text("Sales".to_string())
        );
    }

    #[test]
    fn cell_to_string_formats_header_numbers_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(2023.0)), "2023");
        assert_eq!(cell_to_string(&Data::String("Jan".to_string())), "Jan");
    }
}
