//! Standard-SQL statements issued against BigQuery.

use chrono::{DateTime, Utc};

use demotron_core::{DemoError, RenameRequest, Result, SyntheticEventRow, TableRef};

/// Columns of the demo events table, in insert order.
pub const RAW_EVENT_COLUMNS: &[(&str, &str)] = &[
    ("event_id", "STRING"),
    ("event_name", "STRING"),
    ("event_timestamp", "TIMESTAMP"),
    ("user_id", "STRING"),
];

/// Quote one identifier component with backticks.
///
/// Rejects empty identifiers and identifiers containing backticks,
/// backslashes, or control characters.
pub fn quote_identifier(value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(DemoError::InvalidArgument(
            "identifier must not be empty".to_string(),
        ));
    }
    if value
        .chars()
        .any(|ch| ch == '`' || ch == '\\' || ch.is_control())
    {
        return Err(DemoError::InvalidArgument(format!(
            "identifier '{}' contains forbidden characters",
            value.escape_debug()
        )));
    }
    Ok(format!("`{value}`"))
}

/// `project`.`dataset`.`table` path for a table.
pub fn table_path(project_id: &str, table: &TableRef) -> Result<String> {
    Ok(format!(
        "{}.{}.{}",
        quote_identifier(project_id)?,
        quote_identifier(&table.dataset)?,
        quote_identifier(&table.table)?
    ))
}

pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}

pub fn timestamp_literal(value: &DateTime<Utc>) -> String {
    format!("TIMESTAMP '{}'", value.format("%Y-%m-%d %H:%M:%S%:z"))
}

fn row_values(row: &SyntheticEventRow) -> String {
    format!(
        "({}, {}, {}, {})",
        string_literal(&row.event_id.to_string()),
        string_literal(&row.event_name),
        timestamp_literal(&row.event_timestamp),
        string_literal(&row.user_id.to_string())
    )
}

/// Script that creates the events table when missing and inserts `rows`.
pub fn append_script(
    project_id: &str,
    table: &TableRef,
    rows: &[SyntheticEventRow],
) -> Result<String> {
    if rows.is_empty() {
        return Err(DemoError::InvalidArgument(
            "append requires at least one row".to_string(),
        ));
    }

    let path = table_path(project_id, table)?;
    let column_defs = RAW_EVENT_COLUMNS
        .iter()
        .map(|(name, ty)| format!("  {name} {ty}"))
        .collect::<Vec<_>>()
        .join(",\n");
    let column_names = RAW_EVENT_COLUMNS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");
    let values = rows
        .iter()
        .map(|row| format!("  {}", row_values(row)))
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {path} (\n{column_defs}\n);\n\
         INSERT INTO {path} ({column_names})\nVALUES\n{values};"
    ))
}

/// `ALTER TABLE ... RENAME COLUMN` for a rename request.
pub fn rename_statement(request: &RenameRequest) -> Result<String> {
    Ok(format!(
        "ALTER TABLE {} RENAME COLUMN {} TO {}",
        table_path(&request.project_id, &request.table())?,
        quote_identifier(&request.old_name)?,
        quote_identifier(&request.new_name)?
    ))
}
