use dioxus::prelude::*;

use crate::ui::format::PreviewTable;

pub fn table_container_style() -> &'static str {
    "max-height: 360px; overflow: auto; border: 1px solid #e6e6e6; border-radius: 6px;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 1; background: #f6f6f6; border-bottom: 1px solid #ddd; padding: 6px 10px; text-align: left; white-space: nowrap;"
}

/// Numbers read better right-aligned; a column is numeric when every
/// non-empty cell parses once separators are dropped.
pub fn column_alignment(rows: &[Vec<String>], col_idx: usize) -> &'static str {
    let mut cells = rows
        .iter()
        .filter_map(|row| row.get(col_idx))
        .filter(|cell| !cell.is_empty())
        .peekable();
    if cells.peek().is_none() {
        return "left";
    }
    if cells.all(|cell| cell.replace(',', "").parse::<f64>().is_ok()) {
        "right"
    } else {
        "left"
    }
}

#[component]
pub fn DataPreview(table: PreviewTable, open: bool, on_toggle: EventHandler<bool>) -> Element {
    let arrow = if open { "▾" } else { "▸" };
    let alignments: Vec<&'static str> = (0..table.columns.len())
        .map(|idx| column_alignment(&table.rows, idx))
        .collect();

    rsx! {
        div {
            style: "border: 1px solid #e6e6e6; border-radius: 8px; background: #fff; margin-bottom: 16px;",
            div {
                style: "padding: 10px 12px; cursor: pointer; font-weight: 600;",
                onclick: move |_| on_toggle.call(!open),
                "{arrow} Data Preview"
            }
            if open {
                div { style: "padding: 0 12px 12px 12px;",
                    div { style: "{table_container_style()}",
                        table { style: "border-collapse: collapse; width: 100%; background: #fff; font-size: 13px;",
                            thead {
                                tr {
                                    for header in table.columns.iter() {
                                        th { style: "{table_header_cell_style()}", "{header}" }
                                    }
                                }
                            }
                            tbody {
                                {table.rows.iter().map(|row| {
                                    let alignments = alignments.clone();
                                    rsx!(
                                        tr {
                                            {row.iter().enumerate().map(move |(idx, cell)| {
                                                let align = alignments.get(idx).copied().unwrap_or("left");
                                                rsx!(
                                                    td { style: "padding: 4px 10px; border-bottom: 1px solid #f0f0f0; text-align: {align}; white-space: nowrap;", "{cell}" }
                                                )
                                            })}
                                        }
                                    )
                                })}
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_alignment_right_aligns_numeric_columns() {
        let rows = vec![
            vec!["Sales".to_string(), "1,234".to_string()],
            vec!["COGS".to_string(), String::new()],
        ];
        assert_eq!(column_alignment(&rows, 0), "left");
        assert_eq!(column_alignment(&rows, 1), "right");
        assert_eq!(column_alignment(&rows, 5), "left");
    }

    #[test]
    fn table_container_style_allows_scroll() {
        assert!(table_container_style().contains("overflow: auto"));
        assert!(table_header_cell_style().contains("position: sticky"));
    }
}
