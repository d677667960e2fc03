use crate::core::columns;
use crate::domain::model::{ExtractGroup, Table};
use serde_json::Value;

/// Concatenates every staged extract into one unified table, tagging each
/// row with the location it came from.
///
/// The column set is the outer union across all extracts: a column missing
/// from a given extract is simply absent for that extract's rows. No
/// column-name normalization happens here; sibling columns from the two
/// sources coexist until the field resolver folds them.
pub fn merge_extracts(groups: &[ExtractGroup]) -> Table {
    let mut unified = Table::with_columns([columns::ORIGIN_LOCATION]);

    for group in groups {
        for extract in &group.extracts {
            for column in extract.table.columns() {
                unified.ensure_column(column);
            }
            for row in &extract.table.rows {
                let mut row = row.clone();
                row.set(
                    columns::ORIGIN_LOCATION,
                    Value::String(group.location.clone()),
                );
                unified.push_row(row);
            }
        }
    }

    unified
}
