//! Terminal output for fetched rows.

use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Column heading used when rows are not JSON objects.
const VALUE_COLUMN: &str = "value";

/// Union of the rows' top-level keys, in first-seen order.
pub fn columns(items: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for item in items {
        match item {
            Value::Object(map) => {
                for key in map.keys() {
                    if !columns.iter().any(|c| c == key) {
                        columns.push(key.clone());
                    }
                }
            }
            _ => {
                if !columns.iter().any(|c| c == VALUE_COLUMN) {
                    columns.push(VALUE_COLUMN.to_string());
                }
            }
        }
    }
    columns
}

/// Render one JSON value as a table cell. Strings print bare and `null`
/// prints empty.
pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render rows as a table with one column per top-level key.
pub fn format_rows_table(items: &[Value]) -> String {
    let columns = columns(items);
    let mut builder = Builder::default();
    builder.push_record(columns.iter().cloned());

    for item in items {
        let record = columns.iter().map(|column| match item {
            Value::Object(map) => map.get(column).map(cell).unwrap_or_default(),
            other if column == VALUE_COLUMN => cell(other),
            _ => String::new(),
        });
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Summary line printed under the table.
pub fn format_total(shown: usize, total: u64) -> String {
    format!(
        "{} {} of {}",
        "rows:".dimmed(),
        shown.to_string().cyan(),
        total.to_string().cyan()
    )
}
