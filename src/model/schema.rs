use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structural type classes the inferencer can assign to a runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Integer,
    Boolean,
    String,
    Array,
    Object,
}

/// Structural description of one runtime value. Only `object` nodes carry
/// `properties`; arrays stay opaque, no element schema is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, PropertySchema>>,
}

impl SchemaNode {
    pub fn scalar(kind: SchemaType) -> Self {
        Self {
            kind,
            properties: None,
        }
    }

    pub fn object(properties: IndexMap<String, PropertySchema>) -> Self {
        Self {
            kind: SchemaType::Object,
            properties: Some(properties),
        }
    }
}

/// Schema plus representative example for one named property of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySchema {
    #[serde(flatten)]
    pub schema: SchemaNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}
