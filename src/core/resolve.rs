use crate::core::columns;
use crate::core::weight::normalize_weight;
use crate::domain::model::{Direction, Table};
use serde_json::Value;

/// Folds the legacy encoded-operation column into the direction column.
///
/// `"EMB"` forces Import and `"DESC"` forces Export, overriding whatever the
/// direction cell held. Any other legacy value (including an absent one)
/// only supplies the Import/Export default when no direction is set yet.
/// The legacy column is dropped afterward regardless of outcome; when it is
/// not present at all this is a no-op.
pub fn resolve_direction(mut table: Table) -> Table {
    if !table.has_column(columns::OPERATION_LEGACY) {
        return table;
    }
    table.ensure_column(columns::SENTIDO);

    for row in &mut table.rows {
        let legacy = row.get(columns::OPERATION_LEGACY).and_then(Value::as_str);
        let forced = match legacy {
            Some("EMB") => Some(Direction::Import),
            Some("DESC") => Some(Direction::Export),
            _ => None,
        };

        match forced {
            Some(direction) => {
                row.set(columns::SENTIDO, Value::String(direction.as_str().to_string()));
            }
            None if row.is_absent(columns::SENTIDO) => {
                row.set(
                    columns::SENTIDO,
                    Value::String(Direction::ImportExport.as_str().to_string()),
                );
            }
            None => {}
        }
    }

    table.drop_column(columns::OPERATION_LEGACY);
    table
}

/// Copies the alternate column into the canonical one wherever the
/// canonical cell is absent, then drops the alternate. The existing
/// canonical value always wins. No-op when the alternate column is missing
/// from the table.
fn fill_from_alternate(mut table: Table, canonical: &str, alternate: &str) -> Table {
    if !table.has_column(alternate) {
        return table;
    }
    table.ensure_column(canonical);

    for row in &mut table.rows {
        if row.is_absent(canonical) {
            if let Some(value) = row.get(alternate).cloned() {
                row.set(canonical, value);
            }
        }
    }

    table.drop_column(alternate);
    table
}

pub fn resolve_commodity(table: Table) -> Table {
    fill_from_alternate(table, columns::MERCADORIA, columns::MERCADORIA_ALT)
}

pub fn resolve_arrival_date(table: Table) -> Table {
    fill_from_alternate(table, columns::ARRIVAL, columns::ARRIVAL_ALT)
}

/// Resolves the working weight column. Where it is absent the raw forecast
/// text supplies the value; where it already holds something, that value is
/// re-run through the normalizer too, so both branches leave a cleaned
/// number (or absent) behind. No-op when the raw text column is missing.
pub fn resolve_weight(mut table: Table) -> Table {
    if !table.has_column(columns::WEIGHT_TEXT) {
        return table;
    }
    table.ensure_column(columns::FORECAST_WEIGHT);

    for row in &mut table.rows {
        let normalized = if row.is_absent(columns::FORECAST_WEIGHT) {
            normalize_weight(row.get(columns::WEIGHT_TEXT))
        } else {
            normalize_weight(row.get(columns::FORECAST_WEIGHT))
        };
        row.set(columns::FORECAST_WEIGHT, normalized);
    }

    table
}
