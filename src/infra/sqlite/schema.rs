use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub const SALES_TABLE: &str = "sales_data";
pub const ROW_INDEX_COLUMN: &str = "__row_idx";

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS upload (
            id          INTEGER PRIMARY KEY CHECK (id = 1),
            source_key  TEXT NOT NULL,
            file_name   TEXT NOT NULL,
            row_count   INTEGER NOT NULL,
            loaded_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS upload_column (
            upload_id   INTEGER NOT NULL,
            col_idx     INTEGER NOT NULL,
            name        TEXT NOT NULL,
            PRIMARY KEY (upload_id, col_idx),
            FOREIGN KEY (upload_id) REFERENCES upload(id) ON DELETE CASCADE
        );
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}

/// Quotes a column name for use as an SQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_escapes_embedded_quotes() {
        assert_eq!(quote_ident("Jan"), "\"Jan\"");
        assert_eq!(quote_ident("a\"b"), "\"a\"\"b\"");
    }
}
