use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::config::{RequestBodyMode, ScribeConfig, SummarySource};
use crate::logic::infer::{infer, parameter_example};
use crate::logic::normalize::templatize;
use crate::logic::status::ResponseDescriber;
use crate::model::{
    Bindings, BodyContent, CapturedValue, Exchange, Observation, Parameter, ParameterLocation,
    PropertySchema, RequestBody, SchemaNode, SchemaType, SecurityRequirement, APPLICATION_JSON,
    MULTIPART_FORM_DATA,
};

/// Assembles one Observation per captured exchange.
pub struct TraceRecorder<'a> {
    config: &'a ScribeConfig,
    describer: &'a ResponseDescriber,
}

impl<'a> TraceRecorder<'a> {
    pub fn new(config: &'a ScribeConfig, describer: &'a ResponseDescriber) -> Self {
        Self { config, describer }
    }

    pub fn record(&self, exchange: &Exchange) -> Observation {
        let templated_path = templatize(&exchange.path, &exchange.path_params);
        let method = exchange.method.to_lowercase();
        let summary = match self.config.summary {
            SummarySource::Templated => templated_path.clone(),
            SummarySource::Concrete => exchange.path.clone(),
        };
        let tags = vec![self
            .config
            .tag
            .clone()
            .unwrap_or_else(|| exchange.resource.clone())];

        let request_body = self.request_body(&exchange.body_params);

        // Fixed assembly order: path, then body (only when no request body
        // was recorded), then query.
        let mut parameters = Vec::new();
        push_parameters(&mut parameters, ParameterLocation::Path, &exchange.path_params);
        if request_body.is_none() {
            push_parameters(&mut parameters, ParameterLocation::Body, &exchange.body_params);
        }
        push_parameters(&mut parameters, ParameterLocation::Query, &exchange.query_params);

        Observation {
            templated_path,
            method,
            tags,
            summary,
            parameters,
            request_body,
            status: exchange.status,
            response_example: response_example(&exchange.response_body),
            response_description: self.describer.describe(exchange.status),
            security: self.security(),
        }
    }

    /// Static scheme references from configuration, not derived from the
    /// request. All configured schemes share one requirement entry.
    fn security(&self) -> Vec<SecurityRequirement> {
        if self.config.security.is_empty() {
            return Vec::new();
        }
        let requirement: SecurityRequirement = self
            .config
            .security
            .iter()
            .map(|scheme| (scheme.clone(), Vec::new()))
            .collect();
        vec![requirement]
    }

    fn request_body(&self, body_params: &Bindings) -> Option<RequestBody> {
        if body_params.is_empty() {
            return None;
        }
        let mut content = IndexMap::new();
        match self.config.request_body {
            RequestBodyMode::Json => {
                let payload = CapturedValue::Map(body_params.clone()).to_json();
                content.insert(
                    APPLICATION_JSON.to_string(),
                    BodyContent {
                        schema: SchemaNode::scalar(SchemaType::Object),
                        example: Some(payload),
                    },
                );
            }
            RequestBodyMode::Multipart => {
                content.insert(
                    MULTIPART_FORM_DATA.to_string(),
                    BodyContent {
                        schema: SchemaNode::object(flatten_multipart(body_params)),
                        example: None,
                    },
                );
            }
        }
        Some(RequestBody { content })
    }
}

fn push_parameters(parameters: &mut Vec<Parameter>, location: ParameterLocation, bindings: &Bindings) {
    for (name, value) in bindings {
        parameters.push(Parameter {
            name: name.clone(),
            location,
            schema: infer(value).schema,
            example: parameter_example(value),
        });
    }
}

/// Depth-first walk of the payload: nested maps extend the bracketed field
/// path (`a[b][c]`), every leaf becomes one flattened property.
fn flatten_multipart(params: &Bindings) -> IndexMap<String, PropertySchema> {
    let mut properties = IndexMap::new();
    for (key, value) in params {
        flatten_field(key.clone(), value, &mut properties);
    }
    properties
}

fn flatten_field(key: String, value: &CapturedValue, out: &mut IndexMap<String, PropertySchema>) {
    match value {
        CapturedValue::Map(fields) => {
            for (name, nested) in fields {
                flatten_field(format!("{key}[{name}]"), nested, out);
            }
        }
        leaf => {
            let inferred = infer(leaf);
            out.insert(
                key,
                PropertySchema {
                    schema: inferred.schema,
                    example: inferred.example,
                },
            );
        }
    }
}

/// The response body parsed as JSON; anything unparseable is replaced by a
/// fixed placeholder so observation never fails the exchange.
fn response_example(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or_else(|_| json!({"file": "file/data"}))
}
