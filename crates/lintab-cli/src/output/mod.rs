use lintab_core::Row;
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
///
/// Tables take their headers from the first object's keys.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => {
            let items = match serde_json::to_value(value)? {
                Value::Array(items) => items,
                other => vec![other],
            };
            let headers: Vec<String> = items
                .first()
                .and_then(Value::as_object)
                .map(|map| map.keys().cloned().collect())
                .unwrap_or_default();
            let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
            let rows: Vec<Row> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect();
            render_rows(&rows, &headers, OutputFormat::Table)
        }
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Render result rows with `columns` in the given order.
pub fn render_rows(rows: &[Row], columns: &[&str], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Raw => {
            let lines = rows.iter().map(row_line).collect::<Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                return Ok(String::from("(no rows)"));
            }
            let cells = rows
                .iter()
                .map(|row| {
                    columns
                        .iter()
                        .map(|column| row.get(*column).map_or_else(|| String::from("-"), value_to_cell))
                        .collect()
                })
                .collect::<Vec<Vec<String>>>();
            let options = table::TableOptions {
                max_width: ui::prefs().term_width,
            };
            Ok(table::render_table(columns, &cells, options))
        }
    }
}

/// One row as a single line of compact JSON.
pub fn row_line(row: &Row) -> serde_json::Result<String> {
    serde_json::to_string(row)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("null"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
