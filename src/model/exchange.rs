use indexmap::IndexMap;

use crate::model::CapturedValue;

/// Ordered parameter bindings as supplied by the host's capture point.
pub type Bindings = IndexMap<String, CapturedValue>;

/// One captured request/response pair: the narrow input contract between
/// the host framework and the recorder. Routing internals (controller,
/// action, format) must already be stripped from `path_params`.
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Concrete request path, no query string.
    pub path: String,
    pub method: String,
    /// Resource name of the routing target, used as the default tag.
    pub resource: String,
    pub path_params: Bindings,
    pub query_params: Bindings,
    pub body_params: Bindings,
    pub status: u16,
    /// Raw response body; parsed as JSON by the recorder.
    pub response_body: Vec<u8>,
}

impl Exchange {
    pub fn new(method: &str, path: &str, resource: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            resource: resource.to_string(),
            path_params: Bindings::new(),
            query_params: Bindings::new(),
            body_params: Bindings::new(),
            status: 200,
            response_body: Vec::new(),
        }
    }
}
