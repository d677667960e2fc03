use crate::domain::model::Table;
use crate::utils::error::Result;
use serde_json::Value;
use std::collections::HashSet;

/// Removes rows that are exact duplicates across all currently-present
/// columns. Runs before field resolution so that rows differing only in a
/// column that is about to be dropped still count as distinct. Idempotent.
pub fn remove_duplicates(table: &Table) -> Result<Table> {
    let mut seen = HashSet::new();
    let mut out = Table::with_columns(table.columns().iter().cloned());

    for row in &table.rows {
        // Fingerprint over the full column union, with an explicit Null for
        // absent cells so "missing key" and "null cell" compare equal.
        let cells: Vec<(&str, &Value)> = table
            .columns()
            .iter()
            .map(|column| {
                (
                    column.as_str(),
                    row.get(column).unwrap_or(&Value::Null),
                )
            })
            .collect();
        let fingerprint = serde_json::to_string(&cells)?;

        if seen.insert(fingerprint) {
            out.push_row(row.clone());
        }
    }

    Ok(out)
}
