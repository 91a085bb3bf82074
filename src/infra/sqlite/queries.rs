use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension};
use tracing::debug;

use crate::domain::entities::recipe::{AggregationRecipe, Predicate, ValueTransform};
use crate::domain::entities::record::Month;
use crate::domain::entities::result::{AggregatedResult, ResultRow};
use crate::infra::sqlite::schema::{open_connection, quote_ident, ROW_INDEX_COLUMN, SALES_TABLE};
use crate::usecase::ports::repo::{NewUploadMeta, TabularData, UploadMeta};

/// Makes header names usable as distinct SQL columns: blanks become
/// `Unnamed: N` and repeats get a `.N` suffix.
pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    taken.insert(ROW_INDEX_COLUMN.to_ascii_lowercase());

    let mut normalized = Vec::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let base = match header.trim() {
            "" => format!("Unnamed: {idx}"),
            trimmed => trimmed.to_string(),
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        // sqlite identifiers are case-insensitive
        while taken.contains(&candidate.to_ascii_lowercase()) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        taken.insert(candidate.to_ascii_lowercase());
        normalized.push(candidate);
    }
    normalized
}

pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => format_f64(*v),
        Value::Text(v) => v.clone(),
        Value::Blob(v) => String::from_utf8_lossy(v).into_owned(),
    }
}

pub fn format_f64(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

pub fn replace_upload(db_path: &Path, meta: &NewUploadMeta, data: &TabularData) -> Result<()> {
    if data.columns.is_empty() {
        anyhow::bail!("uploaded sheet has no header row")
    }

    let columns = normalize_headers(&data.columns);
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start upload transaction")?;

    tx.execute(&format!("DROP TABLE IF EXISTS {SALES_TABLE}"), [])
        .context("failed to drop previous upload table")?;
    tx.execute("DELETE FROM upload", [])
        .context("failed to clear previous upload")?;

    let column_defs = columns
        .iter()
        .map(|name| quote_ident(name))
        .collect::<Vec<_>>()
        .join(", ");
    tx.execute(
        &format!(
            "CREATE TABLE {SALES_TABLE} ({} INTEGER PRIMARY KEY, {column_defs})",
            quote_ident(ROW_INDEX_COLUMN)
        ),
        [],
    )
    .context("failed to create upload table")?;

    tx.execute(
        "INSERT INTO upload(id, source_key, file_name, row_count) VALUES (1, ?1, ?2, ?3)",
        params![meta.source_key, meta.file_name, data.rows.len() as i64],
    )
    .context("failed to insert upload")?;

    {
        let mut insert_column = tx
            .prepare("INSERT INTO upload_column(upload_id, col_idx, name) VALUES (1, ?1, ?2)")
            .context("failed to prepare column insert")?;
        for (col_idx, name) in columns.iter().enumerate() {
            insert_column
                .execute(params![col_idx as i64, name])
                .context("failed to insert column name")?;
        }

        let placeholders = (1..=columns.len() + 1)
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        let mut insert_row = tx
            .prepare(&format!(
                "INSERT INTO {SALES_TABLE} VALUES ({placeholders})"
            ))
            .context("failed to prepare row insert")?;

        for (row_idx, row) in data.rows.iter().enumerate() {
            let mut values = Vec::with_capacity(columns.len() + 1);
            values.push(Value::Integer(row_idx as i64));
            values.extend(
                (0..columns.len()).map(|col_idx| row.get(col_idx).cloned().unwrap_or(Value::Null)),
            );
            insert_row
                .execute(params_from_iter(values))
                .context("failed to insert row")?;
        }
    }

    tx.commit().context("failed to commit upload transaction")?;
    debug!(
        rows = data.rows.len(),
        columns = columns.len(),
        "loaded upload table"
    );
    Ok(())
}

pub fn load_upload_meta(db_path: &Path) -> Result<Option<UploadMeta>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT source_key, file_name, row_count, loaded_at FROM upload WHERE id = 1",
        [],
        |row| {
            Ok(UploadMeta {
                source_key: row.get(0)?,
                file_name: row.get(1)?,
                row_count: row.get(2)?,
                loaded_at: row.get(3)?,
            })
        },
    )
    .optional()
    .context("failed to query upload")
}

pub fn clear_upload(db_path: &Path) -> Result<()> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start clear transaction")?;
    tx.execute(&format!("DROP TABLE IF EXISTS {SALES_TABLE}"), [])
        .context("failed to drop upload table")?;
    tx.execute("DELETE FROM upload", [])
        .context("failed to delete upload")?;
    tx.commit().context("failed to commit clear transaction")?;
    Ok(())
}

pub fn load_table(db_path: &Path) -> Result<TabularData> {
    let conn = open_connection(db_path)?;

    let mut header_stmt = conn
        .prepare("SELECT name FROM upload_column WHERE upload_id = 1 ORDER BY col_idx ASC")
        .context("failed to prepare header query")?;
    let columns = header_stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("failed to query headers")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to read header row")?;

    if columns.is_empty() {
        return Ok(TabularData {
            columns,
            rows: Vec::new(),
        });
    }

    let select = columns
        .iter()
        .map(|name| quote_ident(name))
        .collect::<Vec<_>>()
        .join(", ");
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {select} FROM {SALES_TABLE} ORDER BY {} ASC",
            quote_ident(ROW_INDEX_COLUMN)
        ))
        .context("failed to prepare table query")?;

    let column_count = columns.len();
    let rows = stmt
        .query_map([], |row| {
            (0..column_count)
                .map(|idx| row.get::<_, Value>(idx))
                .collect::<rusqlite::Result<Vec<_>>>()
        })
        .context("failed to query table")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to read table row")?;

    Ok(TabularData { columns, rows })
}

fn predicate_sql(predicate: &Predicate, param_idx: usize) -> String {
    let column = quote_ident(predicate.column());
    let op = match predicate {
        Predicate::Equals { .. } => "=",
        Predicate::NotEquals { .. } => "<>",
    };
    // Year arrives as a number from spreadsheets but is matched as text;
    // whole reals are compared without their ".0".
    format!(
        "(CASE WHEN typeof({column}) = 'real' AND {column} = CAST({column} AS INTEGER) \
         THEN CAST(CAST({column} AS INTEGER) AS TEXT) ELSE CAST({column} AS TEXT) END) {op} ?{param_idx}"
    )
}

fn month_value_sql(month: Month, transform: ValueTransform) -> String {
    let column = quote_ident(month.label());
    match transform {
        ValueTransform::Identity => column,
        ValueTransform::Absolute => format!("ABS({column}) AS {column}"),
    }
}

/// Compiles a recipe into one statement plus its bound filter values.
pub fn recipe_sql(recipe: &AggregationRecipe) -> (String, Vec<String>) {
    let row_idx = quote_ident(ROW_INDEX_COLUMN);
    let keys: Vec<String> = recipe.keys.iter().map(|key| quote_ident(key)).collect();
    let key_list = keys.join(", ");

    let months = Month::ALL
        .iter()
        .map(|month| month_value_sql(*month, recipe.transform))
        .collect::<Vec<_>>()
        .join(", ");

    let where_clause = if recipe.filters.is_empty() {
        String::new()
    } else {
        let predicates = recipe
            .filters
            .iter()
            .enumerate()
            .map(|(idx, predicate)| predicate_sql(predicate, idx + 1))
            .collect::<Vec<_>>()
            .join(" AND ");
        format!(" WHERE {predicates}")
    };

    let reshape = Month::ALL
        .iter()
        .map(|month| {
            format!(
                "SELECT {row_idx} AS __row, {key_list}, '{}' AS __period, {} AS __period_idx, {} AS __value FROM filtered",
                month.label(),
                month.ordinal(),
                quote_ident(month.label())
            )
        })
        .collect::<Vec<_>>()
        .join(" UNION ALL ");

    let select = match &recipe.group_by {
        Some(group_by) => {
            let group_list = group_by
                .iter()
                .map(|column| quote_ident(column))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "SELECT {group_list}, CAST(SUM(__value) AS REAL) FROM reshaped WHERE __value IS NOT NULL GROUP BY {group_list} ORDER BY {group_list}"
            )
        }
        None => format!(
            "SELECT {key_list}, __period, CAST(__value AS REAL) FROM reshaped WHERE __value IS NOT NULL ORDER BY __row, __period_idx"
        ),
    };

    let sql = format!(
        "WITH filtered AS (SELECT {row_idx}, {key_list}, {months} FROM {SALES_TABLE}{where_clause}), reshaped AS ({reshape}) {select}"
    );
    let params = recipe
        .filters
        .iter()
        .map(|predicate| predicate.value().to_string())
        .collect();
    (sql, params)
}

fn missing_column(conn: &Connection, recipe: &AggregationRecipe) -> Result<Option<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM upload_column WHERE upload_id = 1")
        .context("failed to prepare header query")?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("failed to query headers")?
        .map(|name| name.map(|n| n.to_ascii_lowercase()))
        .collect::<rusqlite::Result<HashSet<_>>>()
        .context("failed to read header row")?;

    let required = recipe
        .referenced_columns()
        .into_iter()
        .chain(Month::ALL.iter().map(|month| month.label()));
    for column in required {
        if !present.contains(&column.to_ascii_lowercase()) {
            return Ok(Some(column.to_string()));
        }
    }
    Ok(None)
}

/// First month cell that is neither a number nor empty. Rows are counted as
/// in the sheet, with the header on row 1.
fn non_numeric_month(conn: &Connection) -> Result<Option<(Month, i64, String)>> {
    let row_idx = quote_ident(ROW_INDEX_COLUMN);
    for month in Month::ALL {
        let column = quote_ident(month.label());
        let found = conn
            .query_row(
                &format!(
                    "SELECT {row_idx}, CAST({column} AS TEXT) FROM {SALES_TABLE} \
                     WHERE typeof({column}) NOT IN ('integer', 'real', 'null') \
                     ORDER BY {row_idx} LIMIT 1"
                ),
                [],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .with_context(|| format!("failed to check month column {}", month.label()))?;
        if let Some((idx, value)) = found {
            return Ok(Some((month, idx + 2, value)));
        }
    }
    Ok(None)
}

pub fn run_recipe(db_path: &Path, recipe: &AggregationRecipe) -> Result<AggregatedResult> {
    let columns = recipe.output_columns();
    let key_count = columns.len() - 1;
    let (sql, bound) = recipe_sql(recipe);

    let conn = open_connection(db_path)?;
    if let Some(missing) = missing_column(&conn, recipe)? {
        bail!("aggregation {} needs column {missing:?}, which the upload lacks", recipe.name);
    }
    if let Some((month, row, value)) = non_numeric_month(&conn)? {
        bail!(
            "aggregation {} cannot sum column {:?}: row {row} holds non-numeric value {value:?}",
            recipe.name,
            month.label()
        );
    }
    let mut stmt = conn
        .prepare(&sql)
        .with_context(|| format!("failed to prepare aggregation: {}", recipe.name))?;
    let rows = stmt
        .query_map(params_from_iter(bound.iter()), |row| {
            let keys = (0..key_count)
                .map(|idx| row.get::<_, Value>(idx).map(|v| value_to_text(&v)))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            let sales: Option<f64> = row.get(key_count)?;
            Ok(ResultRow {
                keys,
                sales: sales.unwrap_or(0.0),
            })
        })
        .with_context(|| format!("failed to run aggregation: {}", recipe.name))?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| format!("failed to read aggregation row: {}", recipe.name))?;

    debug!(recipe = recipe.name, rows = rows.len(), "aggregation finished");
    Ok(AggregatedResult { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::recipe::{monthly_budget_vs_forecast, yearly_sales_per_account};

    #[test]
    fn normalize_headers_fills_blanks_and_dedupes() {
        let headers = vec![
            "Jan".to_string(),
            "".to_string(),
            "jan".to_string(),
            "Jan".to_string(),
            "__row_idx".to_string(),
        ];
        assert_eq!(
            normalize_headers(&headers),
            ["Jan", "Unnamed: 1", "jan.1", "Jan.2", "__row_idx.1"]
        );
    }

    #[test]
    fn format_f64_trims_trailing_zeros() {
        assert_eq!(format_f64(2023.0), "2023");
        assert_eq!(format_f64(12.5), "12.5");
        assert_eq!(format_f64(f64::NAN), "");
    }

    #[test]
    fn recipe_sql_binds_filter_values_in_order() {
        let (sql, params) = recipe_sql(&monthly_budget_vs_forecast());
        assert_eq!(params, ["2023", "Sales", "Software"]);
        assert!(sql.contains("CAST(\"Year\" AS TEXT) END) = ?1"));
        assert!(sql.contains("CAST(\"business_unit\" AS TEXT) END) = ?3"));
        assert!(!sql.contains("GROUP BY"));
        assert_eq!(sql.matches("UNION ALL").count(), 11);
    }

    #[test]
    fn recipe_sql_applies_absolute_transform() {
        let (sql, _) = recipe_sql(&yearly_sales_per_account());
        assert!(sql.contains("ABS(\"Dec\") AS \"Dec\""));
        assert!(sql.contains("CAST(\"Account\" AS TEXT) END) <> ?2"));
        assert!(sql.contains("GROUP BY \"Account\", \"Year\""));
    }
}
