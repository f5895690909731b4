use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::SchemaNode;

pub const APPLICATION_JSON: &str = "application/json";
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// One OpenAPI security requirement: scheme name mapped to its scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Operations keyed by lowercase HTTP method.
pub type PathOperations = IndexMap<String, Operation>;

/// The durable API description. With the scaffold disabled only `paths` is
/// serialized; scaffold keys precede it when present.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openapi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    #[serde(default)]
    pub paths: IndexMap<String, PathOperations>,
}

impl Document {
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path).and_then(|ops| ops.get(method))
    }

    /// Re-apply the configured OpenAPI scaffold. Runs on every write when
    /// enabled, so hand edits to scaffold keys do not survive.
    pub fn apply_scaffold(&mut self, info: Info, schemes: &[String]) {
        self.openapi = Some("3.0.0".to_string());
        self.info = Some(info);
        self.servers = Some(Vec::new());
        let mut security_schemes = IndexMap::new();
        for scheme in schemes {
            security_schemes.insert(
                scheme.clone(),
                SecurityScheme {
                    kind: "apiKey".to_string(),
                    location: "query".to_string(),
                    name: scheme.clone(),
                },
            );
        }
        self.components = Some(Components { security_schemes });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(rename = "securitySchemes", default)]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "in")]
    pub location: String,
    pub name: String,
}

/// The record of one HTTP method at one templated path. Field order is the
/// canonical serialization order and must not be rearranged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub tags: Vec<String>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<crate::model::Parameter>,
    #[serde(rename = "requestBody", default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<crate::model::RequestBody>,
    #[serde(default)]
    pub responses: IndexMap<String, ResponseEntry>,
    #[serde(default)]
    pub security: Vec<SecurityRequirement>,
}

/// One response status entry. `description` stays null for codes outside
/// the configured lookup; `headers` is recorded but always empty today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEntry {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub headers: IndexMap<String, Value>,
    #[serde(default)]
    pub content: IndexMap<String, ResponseContent>,
}

/// Response media type entry: a fixed opaque object schema plus the ordered
/// `example-N` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseContent {
    pub schema: SchemaNode,
    #[serde(default)]
    pub examples: IndexMap<String, ExampleObject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleObject {
    pub summary: String,
    pub value: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Parameter, ParameterLocation, SchemaType};

    fn sample_operation() -> Operation {
        Operation {
            tags: vec!["orders".to_string()],
            summary: "/orders/{id}".to_string(),
            parameters: vec![Parameter {
                name: "id".to_string(),
                location: ParameterLocation::Path,
                schema: SchemaNode::scalar(SchemaType::Integer),
                example: Some(Value::from(7)),
            }],
            request_body: None,
            responses: IndexMap::new(),
            security: Vec::new(),
        }
    }

    #[test]
    fn test_canonical_key_order_in_yaml() {
        let mut document = Document::default();
        let mut operations = PathOperations::new();
        operations.insert("get".to_string(), sample_operation());
        document.paths.insert("/orders/{id}".to_string(), operations);

        let yaml = serde_yaml::to_string(&document).unwrap();
        let tags = yaml.find("tags:").unwrap();
        let summary = yaml.find("summary:").unwrap();
        let parameters = yaml.find("parameters:").unwrap();
        let responses = yaml.find("responses:").unwrap();
        let security = yaml.find("security:").unwrap();
        assert!(tags < summary && summary < parameters);
        assert!(parameters < responses && responses < security);
    }

    #[test]
    fn test_empty_parameters_not_serialized() {
        let mut operation = sample_operation();
        operation.parameters.clear();
        let yaml = serde_yaml::to_string(&operation).unwrap();
        assert!(!yaml.contains("parameters:"));
        assert!(!yaml.contains("requestBody:"));
    }

    #[test]
    fn test_scaffold_precedes_paths() {
        let mut document = Document::default();
        document.apply_scaffold(
            Info {
                title: "title".to_string(),
                description: "description".to_string(),
                version: "1.0.0".to_string(),
            },
            &["locale".to_string()],
        );
        let yaml = serde_yaml::to_string(&document).unwrap();
        assert!(yaml.find("openapi: 3.0.0").unwrap() < yaml.find("paths:").unwrap());
        assert!(yaml.contains("securitySchemes:"));
        assert!(yaml.contains("type: apiKey"));
    }

    #[test]
    fn test_stray_keys_discarded_on_load() {
        let yaml = r#"
paths:
  /orders:
    get:
      tags: [orders]
      summary: /orders
      responses: {}
      security: []
      x-stray: dropped
"#;
        let document: Document = serde_yaml::from_str(yaml).unwrap();
        let operation = document.operation("/orders", "get").unwrap();
        assert_eq!(operation.tags, vec!["orders".to_string()]);
        let round_trip = serde_yaml::to_string(&document).unwrap();
        assert!(!round_trip.contains("x-stray"));
    }
}
