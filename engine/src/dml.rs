use common::value::format_value;
use common::{OplogEntry, TranslateError};
use serde_json::{Map, Value};

/// `op: "u"`. Requires `o.diff` to be an object naming either `u` (set)
/// or `d` (unset); the match criteria come from `o2`.
pub fn generate_update(entry: &OplogEntry) -> Result<String, TranslateError> {
    let ns = entry.namespace().ok_or(TranslateError::InvalidOplog)?;
    let diff = entry.diff().ok_or(TranslateError::InvalidDiff)?;

    let set_clause = if let Some(set) = diff.get("u").and_then(Value::as_object) {
        fragment_sorted(set).join(", ")
    } else if let Some(unset) = diff.get("d").and_then(Value::as_object) {
        let mut cols: Vec<&String> = unset.keys().collect();
        cols.sort();
        cols.iter().map(|c| format!("{c} = NULL")).collect::<Vec<_>>().join(", ")
    } else {
        return Err(TranslateError::InvalidDiffOperation);
    };

    let where_clause = fragment_sorted(&entry.o2).join(" AND ");

    Ok(format!(
        "UPDATE {}.{} SET {set_clause} WHERE {where_clause};",
        ns.database, ns.collection
    ))
}

/// `op: "d"`. The match criteria live in `o` (not `o2`) for deletes; an
/// empty `o` means there is nothing to match against.
pub fn generate_delete(entry: &OplogEntry) -> Result<String, TranslateError> {
    if entry.o.is_empty() {
        return Err(TranslateError::InvalidDelete);
    }
    let ns = entry.namespace().ok_or(TranslateError::InvalidOplog)?;
    let where_clause = fragment_sorted(&entry.o).join(" AND ");
    Ok(format!("DELETE FROM {}.{} WHERE {where_clause};", ns.database, ns.collection))
}

/// Renders `col = value` for every entry and sorts by the rendered
/// fragment itself, not by column name (§4.3's ordering rule).
fn fragment_sorted(obj: &Map<String, Value>) -> Vec<String> {
    let mut frags: Vec<String> = obj.iter().map(|(k, v)| format!("{k} = {}", format_value(v))).collect();
    frags.sort();
    frags
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(op: &str, o: Value, o2: Value) -> OplogEntry {
        serde_json::from_value(json!({"op": op, "ns": "test.student", "o": o, "o2": o2})).unwrap()
    }

    #[test]
    fn test_update_set() {
        let e = entry(
            "u",
            json!({"$v": 2, "diff": {"u": {"roll_no": 50, "is_graduated": true}}}),
            json!({"_id": "635..."}),
        );
        assert_eq!(
            generate_update(&e).unwrap(),
            "UPDATE test.student SET is_graduated = true, roll_no = 50 WHERE _id = '635...';"
        );
    }

    #[test]
    fn test_update_unset() {
        let e = entry("u", json!({"diff": {"d": {"roll_no": false}}}), json!({"_id": "635..."}));
        assert_eq!(
            generate_update(&e).unwrap(),
            "UPDATE test.student SET roll_no = NULL WHERE _id = '635...';"
        );
    }

    #[test]
    fn test_update_missing_diff_is_invalid_diff() {
        let e = entry("u", json!({}), json!({"_id": "635..."}));
        assert_eq!(generate_update(&e).unwrap_err(), TranslateError::InvalidDiff);
    }

    #[test]
    fn test_update_diff_without_u_or_d_is_invalid_diff_operation() {
        let e = entry("u", json!({"diff": {"other": {}}}), json!({"_id": "635..."}));
        assert_eq!(generate_update(&e).unwrap_err(), TranslateError::InvalidDiffOperation);
    }

    #[test]
    fn test_delete_with_empty_o_is_invalid_delete() {
        let e = entry("d", json!({}), json!({}));
        assert_eq!(generate_delete(&e).unwrap_err(), TranslateError::InvalidDelete);
    }

    #[test]
    fn test_delete_builds_where_from_o() {
        let e = entry("d", json!({"_id": "635..."}), json!({}));
        assert_eq!(
            generate_delete(&e).unwrap(),
            "DELETE FROM test.student WHERE _id = '635...';"
        );
    }
}
