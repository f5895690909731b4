use indexmap::IndexMap;
use serde_json::Value;

use crate::model::{CapturedValue, PropertySchema, SchemaNode, SchemaType};

/// Result of classifying one runtime value: its structural schema plus a
/// representative example where the type carries one.
#[derive(Debug, Clone, PartialEq)]
pub struct Inferred {
    pub schema: SchemaNode,
    pub example: Option<Value>,
}

/// Classify a captured value. First match wins, in this order: numeric,
/// boolean-looking, string, list, map. The ordering is a deliberate lossy
/// heuristic (numeric strings lose formatting such as leading zeros) and is
/// reproduced exactly for output compatibility.
pub fn infer(value: &CapturedValue) -> Inferred {
    match value {
        CapturedValue::Integer(n) => integer(*n),
        CapturedValue::Bool(_) => boolean(),
        CapturedValue::String(s) => {
            if let Some(n) = numeric_string(s) {
                integer(n)
            } else if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
                boolean()
            } else {
                Inferred {
                    schema: SchemaNode::scalar(SchemaType::String),
                    example: Some(Value::from(s.clone())),
                }
            }
        }
        CapturedValue::List(_) => Inferred {
            schema: SchemaNode::scalar(SchemaType::Array),
            example: None,
        },
        CapturedValue::Map(fields) => {
            let mut properties = IndexMap::new();
            for (name, nested) in fields {
                let inferred = infer(nested);
                properties.insert(
                    name.clone(),
                    PropertySchema {
                        schema: inferred.schema,
                        example: inferred.example,
                    },
                );
            }
            Inferred {
                schema: SchemaNode::object(properties),
                example: None,
            }
        }
    }
}

fn integer(n: i64) -> Inferred {
    Inferred {
        schema: SchemaNode::scalar(SchemaType::Integer),
        example: Some(Value::from(n)),
    }
}

fn boolean() -> Inferred {
    Inferred {
        schema: SchemaNode::scalar(SchemaType::Boolean),
        example: None,
    }
}

/// The simpler conversion that feeds `Parameter.example`: numeric values
/// become integers, scalar strings pass through, everything else (and the
/// empty string) is omitted.
pub fn parameter_example(value: &CapturedValue) -> Option<Value> {
    match value {
        CapturedValue::Integer(n) => Some(Value::from(*n)),
        CapturedValue::String(s) => match numeric_string(s) {
            Some(n) => Some(Value::from(n)),
            None if s.is_empty() => None,
            None => Some(Value::from(s.clone())),
        },
        _ => None,
    }
}

/// Numeric classification for strings: anything that parses as a finite
/// number, with fractions truncating toward zero. A failed parse simply
/// means "not numeric"; no error crosses this boundary.
fn numeric_string(s: &str) -> Option<i64> {
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    s.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f as i64)
}
