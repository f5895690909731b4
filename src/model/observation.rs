use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{
    ExampleObject, Operation, ResponseContent, ResponseEntry, SchemaNode, SchemaType,
    SecurityRequirement, APPLICATION_JSON,
};

/// Where a parameter was observed. Part of the serialized document but not
/// of parameter identity during merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Body,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub schema: SchemaNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// Request body media type entry. The opaque-JSON mode fills `example`
/// with the whole payload; the multipart mode fills the schema's
/// flattened properties instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyContent {
    pub schema: SchemaNode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    pub content: IndexMap<String, BodyContent>,
}

/// Everything learned from one captured exchange. Assembled by the
/// recorder, staged into the accumulator, consumed by the merger, then
/// dropped.
#[derive(Debug, Clone)]
pub struct Observation {
    pub templated_path: String,
    pub method: String,
    pub tags: Vec<String>,
    pub summary: String,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub status: u16,
    pub response_example: Value,
    pub response_description: Option<String>,
    pub security: Vec<SecurityRequirement>,
}

impl Observation {
    /// The tag that keys destination resolution. Tags are single-element by
    /// construction; the fallback only guards hand-built observations.
    pub fn primary_tag(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("api")
    }

    /// Build the Operation this observation stages, with a responses map
    /// containing only the just-observed status.
    pub fn to_operation(&self) -> Operation {
        let mut responses = IndexMap::new();
        responses.insert(self.status.to_string(), self.response_entry());
        Operation {
            tags: self.tags.clone(),
            summary: self.summary.clone(),
            parameters: self.parameters.clone(),
            request_body: self.request_body.clone(),
            responses,
            security: self.security.clone(),
        }
    }

    /// Fresh response entry for the observed status. The example starts the
    /// `example-N` sequence at zero; headers are recorded but always empty.
    pub fn response_entry(&self) -> ResponseEntry {
        let mut examples = IndexMap::new();
        examples.insert(
            "example-0".to_string(),
            ExampleObject {
                summary: String::new(),
                value: self.response_example.clone(),
            },
        );
        let mut content = IndexMap::new();
        content.insert(
            APPLICATION_JSON.to_string(),
            ResponseContent {
                schema: SchemaNode::scalar(SchemaType::Object),
                examples,
            },
        );
        ResponseEntry {
            description: self.response_description.clone(),
            headers: IndexMap::new(),
            content,
        }
    }
}
