//! Shared list validators.

use serde_json::Value;

/// Whether `items` is a non-empty list of non-empty strings.
pub fn is_string_list<S: AsRef<str>>(items: &[S]) -> bool {
    !items.is_empty() && items.iter().all(|item| !item.as_ref().is_empty())
}

/// Extract a non-empty list of non-empty strings from a JSON value.
///
/// Returns `None` if the value is not an array, is empty, or holds anything
/// other than non-empty strings.
pub fn as_string_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }

    items
        .iter()
        .map(|item| match item {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_string_list() {
        assert!(is_string_list(&["a", "b"]));
        assert!(!is_string_list::<&str>(&[]));
        assert!(!is_string_list(&["a", ""]));
    }

    #[test]
    fn test_as_string_list() {
        assert_eq!(
            as_string_list(&json!(["rust", "go"])),
            Some(vec!["rust".to_string(), "go".to_string()])
        );
        assert_eq!(as_string_list(&json!([])), None);
        assert_eq!(as_string_list(&json!(["rust", 1])), None);
        assert_eq!(as_string_list(&json!(["rust", ""])), None);
        assert_eq!(as_string_list(&json!({"0": "rust"})), None);
        assert_eq!(as_string_list(&json!("rust")), None);
    }
}
