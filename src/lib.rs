pub mod config;
pub mod logic;
pub mod model;
pub mod session;
pub mod store;

// Export configuration types
pub use config::{
    DescriptionSource, RequestBodyMode, RunMode, ScaffoldConfig, ScribeConfig, SummarySource,
};

// Export logic entry points
pub use logic::{
    builtin_description, canonicalize, fold, infer, parameter_example, templatize, Inferred,
    ResponseDescriber, TraceRecorder,
};

// Export all model types
pub use model::*;

// Export the run-scoped session
pub use session::TraceSession;

// Export store types
pub use store::{Destination, DocumentStore, StoreError, YamlFileStore};
