use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static UNIT_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*Tons\.\s*$").expect("unit suffix pattern is valid"));

/// Parses a free-form weight cell into a number.
///
/// Non-text values pass through unchanged (absent stays absent, numbers stay
/// numbers). Text is scrubbed of the trailing `" Tons."` annotation and
/// thousands-separator commas; a cell holding several whitespace-separated
/// readings yields their arithmetic mean. Anything unparseable becomes
/// absent rather than an error: malformed cells are a data-quality event,
/// not a fault.
pub fn normalize_weight(value: Option<&Value>) -> Value {
    let text = match value {
        None | Some(Value::Null) => return Value::Null,
        Some(Value::String(text)) => text,
        Some(other) => return other.clone(),
    };

    let cleaned = UNIT_SUFFIX.replace(text, "").replace(',', "");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    if tokens.is_empty() {
        return Value::Null;
    }

    let mut parsed = Vec::with_capacity(tokens.len());
    for token in &tokens {
        match token.parse::<f64>() {
            Ok(number) => parsed.push(number),
            Err(_) => return Value::Null,
        }
    }

    let result = if parsed.len() > 1 {
        parsed.iter().sum::<f64>() / parsed.len() as f64
    } else {
        parsed[0]
    };

    // Value::from maps non-finite floats to Null, which is the absent
    // marker we want for them anyway.
    Value::from(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_suffix_and_thousands_separator() {
        assert_eq!(normalize_weight(Some(&json!("12,345 Tons."))), json!(12345.0));
    }

    #[test]
    fn test_multi_value_cell_is_averaged() {
        assert_eq!(normalize_weight(Some(&json!("10 20"))), json!(15.0));
        assert_eq!(
            normalize_weight(Some(&json!("1,000 2,000 3,000 Tons."))),
            json!(2000.0)
        );
    }

    #[test]
    fn test_single_value() {
        assert_eq!(normalize_weight(Some(&json!("42.5"))), json!(42.5));
    }

    #[test]
    fn test_unparseable_text_becomes_absent() {
        assert_eq!(normalize_weight(Some(&json!("abc"))), Value::Null);
        assert_eq!(normalize_weight(Some(&json!("10 abc"))), Value::Null);
        assert_eq!(normalize_weight(Some(&json!(""))), Value::Null);
        assert_eq!(normalize_weight(Some(&json!(" Tons."))), Value::Null);
    }

    #[test]
    fn test_non_text_passes_through() {
        assert_eq!(normalize_weight(Some(&json!(99.9))), json!(99.9));
        assert_eq!(normalize_weight(Some(&Value::Null)), Value::Null);
        assert_eq!(normalize_weight(None), Value::Null);
    }

    #[test]
    fn test_suffix_only_stripped_when_trailing() {
        // The annotation is only recognized at the end of the cell.
        assert_eq!(normalize_weight(Some(&json!("Tons. 10"))), Value::Null);
    }
}
