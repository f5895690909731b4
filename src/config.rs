use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Execution mode. Tracing activates only under `test`; everything else is
/// a no-op so the hook can be installed unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    Test,
    Disabled,
}

/// Where an operation summary comes from: the templated path or the
/// unmodified concrete one. Fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    Templated,
    Concrete,
}

/// How a captured request body is emitted. Exactly one mode is active at a
/// time; enabling both at once is unrepresentable by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestBodyMode {
    Json,
    Multipart,
}

/// Where response descriptions come from: the built-in table or the
/// configured status catalog. One mode, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionSource {
    Builtin,
    Catalog,
}

/// Values for the optional OpenAPI scaffold (`openapi`/`info`/`servers`/
/// `components`) re-applied on every write when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    pub title: String,
    pub description: String,
    pub version: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            title: "title".to_string(),
            description: "description".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScribeConfig {
    pub mode: RunMode,
    /// Literal document file when it ends in `.yaml`/`.yml`, otherwise a
    /// directory with file names derived from the primary tag.
    pub destination: Option<String>,
    /// Overrides the resource-derived tag on every observation.
    pub tag: Option<String>,
    pub summary: SummarySource,
    pub request_body: RequestBodyMode,
    pub descriptions: DescriptionSource,
    /// Status-code → text mapping consulted when `descriptions` is
    /// `catalog`. Keys are status codes as strings.
    pub status_catalog: HashMap<String, String>,
    /// Named security scheme references attached to every operation.
    pub security: Vec<String>,
    pub scaffold: Option<ScaffoldConfig>,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self {
            mode: RunMode::Disabled,
            destination: None,
            tag: None,
            summary: SummarySource::Templated,
            request_body: RequestBodyMode::Multipart,
            descriptions: DescriptionSource::Builtin,
            status_catalog: HashMap::new(),
            security: Vec::new(),
            scaffold: None,
        }
    }
}

impl ScribeConfig {
    /// Load configuration from defaults, an optional `scribe` config file
    /// and `SCRIBE_`-prefixed environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&ScribeConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("scribe").required(false));

        // Add environment variables with prefix "SCRIBE_"
        config = config.add_source(config::Environment::with_prefix("SCRIBE"));

        let config = config.build()?;
        let scribe_config: ScribeConfig = config.try_deserialize()?;

        Ok(scribe_config)
    }

    /// Tracing is active only under the test run mode with a configured
    /// destination; either one missing disables the whole subsystem.
    pub fn is_active(&self) -> bool {
        self.mode == RunMode::Test && self.destination.is_some()
    }
}
