use serde_json::Value;

/// Maps a JSON value to its SQL column type.
///
/// Every JSON number becomes `FLOAT`, never `INTEGER` — matching the
/// behaviour of a JSON decoder that has no integer/float distinction at
/// the document level, so a literal `51` and a literal `51.5` receive
/// the same column type. `INTEGER` remains a valid type name in the
/// dialect (see DESIGN.md) but nothing in this crate currently produces it.
pub fn sql_data_type(value: &Value) -> &'static str {
    match value {
        Value::Number(_) => "FLOAT",
        Value::Bool(_) => "BOOLEAN",
        _ => "VARCHAR(255)",
    }
}

/// Renders a JSON scalar as a SQL literal: bare numeric/boolean tokens,
/// single-quoted text for everything else. `null` falls through to the
/// same single-quoted default as any other non-numeric/boolean value,
/// rendering as the literal `'<nil>'` — matching the reference decoder's
/// `fmt.Sprintf("'%v'", value)` fallback for a nil interface value (see
/// DESIGN.md).
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Null => "'<nil>'".to_string(),
        other => format!("'{other}'"),
    }
}

/// Scalars become a single column; arrays and objects are expanded into
/// child tables instead (§4.3).
pub fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_are_always_float() {
        assert_eq!(sql_data_type(&json!(51)), "FLOAT");
        assert_eq!(sql_data_type(&json!(51.5)), "FLOAT");
    }

    #[test]
    fn test_booleans_and_strings() {
        assert_eq!(sql_data_type(&json!(true)), "BOOLEAN");
        assert_eq!(sql_data_type(&json!("Alice")), "VARCHAR(255)");
    }

    #[test]
    fn test_format_value_quotes_strings_not_numbers() {
        assert_eq!(format_value(&json!(51)), "51");
        assert_eq!(format_value(&json!("Alice")), "'Alice'");
        assert_eq!(format_value(&json!(true)), "true");
    }

    #[test]
    fn test_format_value_null_matches_reference_nil_rendering() {
        assert_eq!(format_value(&Value::Null), "'<nil>'");
    }

    #[test]
    fn test_is_scalar() {
        assert!(is_scalar(&json!("Alice")));
        assert!(!is_scalar(&json!([1, 2])));
        assert!(!is_scalar(&json!({"a": 1})));
    }
}
