use crate::core::columns;
use crate::domain::model::{Record, Table};
use serde_json::Value;
use std::collections::HashMap;

struct Accumulator {
    location: String,
    direction: String,
    commodity: String,
    total_weight: Option<f64>,
    count: u64,
}

/// Groups the projected records by (origin_location, direction, commodity)
/// and produces summed weight and record count per group.
///
/// The two metrics deliberately run over different populations: the sum only
/// sees rows with a numeric weight, while the count covers every row sharing
/// the key, including those the projection gate later drops. The metrics are
/// joined by key with outer-join semantics, so a group whose rows all lack a
/// numeric weight still appears, with an absent total. A row with an absent
/// key component belongs to no group.
pub fn aggregate_by_key(table: &Table) -> Table {
    let mut index: HashMap<(String, String, String), usize> = HashMap::new();
    let mut accumulators: Vec<Accumulator> = Vec::new();

    for row in &table.rows {
        let (Some(location), Some(direction), Some(commodity)) = (
            key_text(row, columns::ORIGIN_LOCATION),
            key_text(row, columns::DIRECTION),
            key_text(row, columns::COMMODITY),
        ) else {
            continue;
        };

        let key = (location.clone(), direction.clone(), commodity.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            accumulators.push(Accumulator {
                location,
                direction,
                commodity,
                total_weight: None,
                count: 0,
            });
            accumulators.len() - 1
        });

        let accumulator = &mut accumulators[slot];
        accumulator.count += 1;
        if let Some(Value::Number(number)) = row.get(columns::WEIGHT) {
            if let Some(weight) = number.as_f64() {
                *accumulator.total_weight.get_or_insert(0.0) += weight;
            }
        }
    }

    let mut out = Table::with_columns([
        columns::ORIGIN_LOCATION,
        columns::DIRECTION,
        columns::COMMODITY,
        columns::TOTAL_WEIGHT,
        columns::COUNT,
    ]);
    for accumulator in accumulators {
        let mut record = Record::new();
        record.set(columns::ORIGIN_LOCATION, Value::String(accumulator.location));
        record.set(columns::DIRECTION, Value::String(accumulator.direction));
        record.set(columns::COMMODITY, Value::String(accumulator.commodity));
        record.set(
            columns::TOTAL_WEIGHT,
            accumulator.total_weight.map(Value::from).unwrap_or(Value::Null),
        );
        record.set(columns::COUNT, Value::from(accumulator.count));
        out.push_row(record);
    }

    out
}

fn key_text(record: &Record, column: &str) -> Option<String> {
    match record.get(column)? {
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn projected_row(
        location: &str,
        direction: &str,
        commodity: &str,
        weight: Option<f64>,
    ) -> Record {
        let mut record = Record::new();
        record.set(columns::ORIGIN_LOCATION, json!(location));
        record.set(columns::DIRECTION, json!(direction));
        record.set(columns::COMMODITY, json!(commodity));
        if let Some(weight) = weight {
            record.set(columns::WEIGHT, json!(weight));
        }
        record
    }

    fn projected_table(rows: Vec<Record>) -> Table {
        let mut table = Table::with_columns([
            columns::ARRIVAL_DATE,
            columns::DIRECTION,
            columns::ORIGIN_LOCATION,
            columns::COMMODITY,
            columns::WEIGHT,
        ]);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    #[test]
    fn test_count_covers_prefilter_population() {
        // Two weighted rows plus one whose weight failed to parse: the sum
        // sees 10 + 20, the count sees all three.
        let table = projected_table(vec![
            projected_row("A", "Import", "Soy", Some(10.0)),
            projected_row("A", "Import", "Soy", Some(20.0)),
            projected_row("A", "Import", "Soy", None),
        ]);

        let aggregate = aggregate_by_key(&table);

        assert_eq!(aggregate.len(), 1);
        let row = &aggregate.rows[0];
        assert_eq!(row.get(columns::TOTAL_WEIGHT), Some(&json!(30.0)));
        assert_eq!(row.get(columns::COUNT), Some(&json!(3)));
    }

    #[test]
    fn test_group_without_numeric_weight_still_appears() {
        let table = projected_table(vec![projected_row("B", "Export", "Corn", None)]);

        let aggregate = aggregate_by_key(&table);

        assert_eq!(aggregate.len(), 1);
        let row = &aggregate.rows[0];
        assert!(row.is_absent(columns::TOTAL_WEIGHT));
        assert_eq!(row.get(columns::COUNT), Some(&json!(1)));
    }

    #[test]
    fn test_distinct_keys_stay_separate() {
        let table = projected_table(vec![
            projected_row("A", "Import", "Soy", Some(1.0)),
            projected_row("A", "Export", "Soy", Some(2.0)),
            projected_row("B", "Import", "Soy", Some(3.0)),
        ]);

        let aggregate = aggregate_by_key(&table);
        assert_eq!(aggregate.len(), 3);
    }

    #[test]
    fn test_rows_with_absent_key_component_are_skipped() {
        let mut keyless = Record::new();
        keyless.set(columns::ORIGIN_LOCATION, json!("A"));
        keyless.set(columns::WEIGHT, json!(5.0));

        let table = projected_table(vec![
            keyless,
            projected_row("A", "Import", "Soy", Some(1.0)),
        ]);

        let aggregate = aggregate_by_key(&table);
        assert_eq!(aggregate.len(), 1);
        assert_eq!(aggregate.rows[0].get(columns::COUNT), Some(&json!(1)));
    }
}
