use crate::core::columns;
use crate::domain::model::{Record, Table};
use serde_json::Value;

const PROJECTION: [(&str, &str); 5] = [
    (columns::ARRIVAL, columns::ARRIVAL_DATE),
    (columns::SENTIDO, columns::DIRECTION),
    (columns::ORIGIN_LOCATION, columns::ORIGIN_LOCATION),
    (columns::MERCADORIA, columns::COMMODITY),
    (columns::FORECAST_WEIGHT, columns::WEIGHT),
];

/// Selects the canonical columns in output order and renames the working
/// vocabulary to the canonical external names. Does not filter rows; the
/// weight gate is `retain_weighted`.
pub fn project_columns(table: &Table) -> Table {
    let mut out = Table::with_columns(PROJECTION.iter().map(|(_, canonical)| *canonical));

    for row in &table.rows {
        let mut record = Record::new();
        for (working, canonical) in PROJECTION {
            if let Some(value) = row.get(working) {
                record.set(canonical, value.clone());
            }
        }
        out.push_row(record);
    }

    out
}

/// Drops every row without a resolved numeric weight. This is the last gate
/// before persistence: every retained canonical record has a number in its
/// weight cell.
pub fn retain_weighted(mut table: Table) -> Table {
    table
        .rows
        .retain(|row| matches!(row.get(columns::WEIGHT), Some(Value::Number(_))));
    table
}
