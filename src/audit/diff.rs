//! Human-readable diffs between entity snapshots

use serde_json::Value;

/// Bookkeeping fields that change on every write and add nothing to a diff
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Summarize top-level field changes between two JSON values
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(before_val),
                        format_value(after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(after_val)));
                }
            }

            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields() {
        let before = json!({"name": "Rent", "amount": 100, "updated_at": "a"});
        let after = json!({"name": "Rent", "amount": 150, "updated_at": "b"});
        assert_eq!(generate_diff(&before, &after), Some("amount: 100 -> 150".into()));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Rent"});
        assert_eq!(generate_diff(&value, &value), None);
    }

    #[test]
    fn test_added_and_removed() {
        let before = json!({"paid_date": "2024-01-05"});
        let after = json!({"budget_limit": 500});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("paid_date: \"2024-01-05\" -> (removed)"));
        assert!(diff.contains("budget_limit: (added) -> 500"));
    }

    #[test]
    fn test_nested_values_are_summarized() {
        let before = json!({"transactions": []});
        let after = json!({"transactions": [{"amount": 1}, {"amount": 2}]});
        assert_eq!(
            generate_diff(&before, &after),
            Some("transactions: [0 items] -> [2 items]".into())
        );
    }

    #[test]
    fn test_long_strings_truncated() {
        let long = "x".repeat(80);
        let diff = generate_diff(&json!({"d": "a"}), &json!({"d": long})).unwrap();
        assert!(diff.ends_with("...\""));
    }
}
