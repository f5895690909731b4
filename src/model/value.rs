use indexmap::IndexMap;
use serde_json::Value;

/// Runtime value captured from a request or response, reduced to a closed
/// set of shapes at capture time. Downstream classification is an
/// exhaustive match over these variants instead of dynamic inspection.
#[derive(Debug, Clone, PartialEq)]
pub enum CapturedValue {
    Integer(i64),
    Bool(bool),
    String(String),
    List(Vec<CapturedValue>),
    Map(IndexMap<String, CapturedValue>),
}

impl CapturedValue {
    /// Convert back into a JSON value, used when a captured payload becomes
    /// a literal example in the document.
    pub fn to_json(&self) -> Value {
        match self {
            CapturedValue::Integer(n) => Value::from(*n),
            CapturedValue::Bool(b) => Value::from(*b),
            CapturedValue::String(s) => Value::from(s.clone()),
            CapturedValue::List(items) => {
                Value::Array(items.iter().map(CapturedValue::to_json).collect())
            }
            CapturedValue::Map(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Textual form of a scalar, used by path templating. Lists and maps
    /// have no single occurrence in a path and yield `None`.
    pub fn as_scalar_text(&self) -> Option<String> {
        match self {
            CapturedValue::Integer(n) => Some(n.to_string()),
            CapturedValue::Bool(b) => Some(b.to_string()),
            CapturedValue::String(s) => Some(s.clone()),
            CapturedValue::List(_) | CapturedValue::Map(_) => None,
        }
    }
}

impl From<&Value> for CapturedValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => CapturedValue::Bool(*b),
            // Non-integral numbers truncate toward zero, matching the
            // integer-only schema vocabulary.
            Value::Number(n) => CapturedValue::Integer(
                n.as_i64().unwrap_or_else(|| n.as_f64().unwrap_or(0.0) as i64),
            ),
            Value::String(s) => CapturedValue::String(s.clone()),
            Value::Array(items) => {
                CapturedValue::List(items.iter().map(CapturedValue::from).collect())
            }
            Value::Object(fields) => CapturedValue::Map(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), CapturedValue::from(value)))
                    .collect(),
            ),
            // Null carries no structure; an empty map classifies as a bare
            // object downstream.
            Value::Null => CapturedValue::Map(IndexMap::new()),
        }
    }
}

impl From<Value> for CapturedValue {
    fn from(value: Value) -> Self {
        CapturedValue::from(&value)
    }
}

impl From<&str> for CapturedValue {
    fn from(value: &str) -> Self {
        CapturedValue::String(value.to_string())
    }
}

impl From<String> for CapturedValue {
    fn from(value: String) -> Self {
        CapturedValue::String(value)
    }
}

impl From<i64> for CapturedValue {
    fn from(value: i64) -> Self {
        CapturedValue::Integer(value)
    }
}

impl From<bool> for CapturedValue {
    fn from(value: bool) -> Self {
        CapturedValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip() {
        let value = json!({"name": "saddle", "price": 42, "flags": [true, false]});
        let captured = CapturedValue::from(&value);
        assert_eq!(captured.to_json(), value);
    }

    #[test]
    fn test_null_becomes_empty_map() {
        let captured = CapturedValue::from(&Value::Null);
        assert_eq!(captured, CapturedValue::Map(IndexMap::new()));
    }

    #[test]
    fn test_float_truncates_toward_zero() {
        assert_eq!(
            CapturedValue::from(&json!(12.9)),
            CapturedValue::Integer(12)
        );
        assert_eq!(
            CapturedValue::from(&json!(-3.7)),
            CapturedValue::Integer(-3)
        );
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(
            CapturedValue::from(42i64).as_scalar_text(),
            Some("42".to_string())
        );
        assert_eq!(
            CapturedValue::from("seven").as_scalar_text(),
            Some("seven".to_string())
        );
        assert_eq!(CapturedValue::List(Vec::new()).as_scalar_text(), None);
    }
}
