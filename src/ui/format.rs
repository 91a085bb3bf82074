use rusqlite::types::Value;

use crate::domain::entities::record::YEAR_COLUMN;
use crate::infra::sqlite::queries::value_to_text;
use crate::usecase::ports::repo::TabularData;

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

pub fn format_number_with_commas(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = text.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Two decimals for fractional values, none for whole ones.
pub fn format_amount(value: f64) -> String {
    let decimals = if value.fract().abs() < f64::EPSILON { 0 } else { 2 };
    format_number_with_commas(value, decimals)
}

/// Two significant digits with an SI prefix: 1234 -> "1.2k", 160 -> "160".
pub fn format_si(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let exponent = abs.log10().floor() as i32;
    let scale = 10f64.powi(exponent - 1);
    let rounded = (abs / scale).round() * scale;
    let exponent = rounded.log10().floor() as i32;

    let prefix_exponent = (exponent.div_euclid(3) * 3).clamp(-24, 24);
    let prefix = SI_PREFIXES[((prefix_exponent + 24) / 3) as usize];
    let scaled = rounded / 10f64.powi(prefix_exponent);
    let decimals = (1 - (exponent - prefix_exponent)).max(0) as usize;
    format!("{sign}{scaled:.decimals$}{prefix}")
}

pub fn format_preview_cell(column: &str, value: &Value) -> String {
    if column == YEAR_COLUMN {
        return value_to_text(value);
    }
    match value {
        Value::Integer(v) => format_number_with_commas(*v as f64, 0),
        Value::Real(v) => format_amount(*v),
        other => value_to_text(other),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PreviewTable {
    pub fn from_tabular(data: &TabularData) -> Self {
        let rows = data
            .rows
            .iter()
            .map(|row| {
                data.columns
                    .iter()
                    .enumerate()
                    .map(|(idx, column)| {
                        row.get(idx)
                            .map(|value| format_preview_cell(column, value))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();
        Self {
            columns: data.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_with_commas_handles_decimals() {
        assert_eq!(format_number_with_commas(12345.678, 0), "12,346");
        assert_eq!(format_number_with_commas(12345.678, 2), "12,345.68");
        assert_eq!(format_number_with_commas(-1234.5, 2), "-1,234.50");
        assert_eq!(format_number_with_commas(-0.001, 2), "0.00");
        assert_eq!(format_number_with_commas(999.0, 0), "999");
    }

    #[test]
    fn format_si_uses_two_significant_digits() {
        assert_eq!(format_si(1234.0), "1.2k");
        assert_eq!(format_si(160.0), "160");
        assert_eq!(format_si(50.0), "50");
        assert_eq!(format_si(5.0), "5.0");
        assert_eq!(format_si(6_621_280.0), "6.6M");
        assert_eq!(format_si(-42_000_000.0), "-42M");
        assert_eq!(format_si(0.5), "500m");
        assert_eq!(format_si(999.6), "1.0k");
        assert_eq!(format_si(0.0), "0");
    }

    #[test]
    fn preview_keeps_year_without_separator() {
        assert_eq!(format_preview_cell("Year", &Value::Integer(2023)), "2023");
        assert_eq!(format_preview_cell("Jan", &Value::Integer(2023)), "2,023");
        assert_eq!(format_preview_cell("Feb", &Value::Real(-50.25)), "-50.25");
        assert_eq!(format_preview_cell("Account", &Value::Null), "");
    }

    #[test]
    fn preview_table_pads_short_rows() {
        let data = TabularData {
            columns: vec!["Account".to_string(), "Year".to_string()],
            rows: vec![vec![Value::Text("Sales".to_string())]],
        };
        let table = PreviewTable::from_tabular(&data);
        assert_eq!(table.rows, vec![vec!["Sales".to_string(), String::new()]]);
    }
}
