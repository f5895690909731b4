use parking_lot::Mutex;

use crate::config::ScribeConfig;
use crate::logic::merge;
use crate::logic::record::TraceRecorder;
use crate::logic::status::ResponseDescriber;
use crate::model::{Accumulator, Exchange, Info};
use crate::store::{DocumentStore, YamlFileStore};

/// Run-scoped owner of the trace pipeline: configuration, the staging
/// accumulator and the document store. One instance lives for the whole
/// test run; each captured exchange flows through `observe`.
///
/// Everything is synchronous: record, merge and persist complete before
/// the triggering request's own lifecycle finishes. The accumulator sits
/// behind a mutex so concurrent test runners within one process serialize
/// cleanly; cross-process writes remain last-write-wins by design.
pub struct TraceSession<S: DocumentStore> {
    config: ScribeConfig,
    describer: ResponseDescriber,
    accumulator: Mutex<Accumulator>,
    store: S,
}

impl TraceSession<YamlFileStore> {
    /// Build a session from environment and file configuration. Returns
    /// `Ok(None)` when tracing is not active (wrong run mode or no
    /// destination) so hosts can install the hook unconditionally.
    pub fn from_env() -> anyhow::Result<Option<Self>> {
        // Load environment variables from .env file if it exists
        dotenvy::dotenv().ok();

        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or("info"),
        )
        .try_init();

        let config = ScribeConfig::load()?;
        if !config.is_active() {
            return Ok(None);
        }
        let destination = config.destination.clone().unwrap_or_default();
        Ok(Some(Self::new(
            config,
            YamlFileStore::from_destination(&destination),
        )))
    }
}

impl<S: DocumentStore> TraceSession<S> {
    pub fn new(config: ScribeConfig, store: S) -> Self {
        let describer = ResponseDescriber::from_config(&config);
        Self {
            config,
            describer,
            accumulator: Mutex::new(Accumulator::new()),
            store,
        }
    }

    pub fn config(&self) -> &ScribeConfig {
        &self.config
    }

    /// Observe one exchange. Failures are logged and swallowed: a broken
    /// merge must never fail the request or test it instruments.
    pub fn observe(&self, exchange: &Exchange) {
        if let Err(err) = self.try_observe(exchange) {
            log::warn!(
                "skipping exchange {} {}: {:#}",
                exchange.method,
                exchange.path,
                err
            );
        }
    }

    /// Record, merge and persist one exchange, surfacing errors to callers
    /// that want them.
    pub fn try_observe(&self, exchange: &Exchange) -> anyhow::Result<()> {
        let recorder = TraceRecorder::new(&self.config, &self.describer);
        let observation = recorder.record(exchange);

        let staged = self.accumulator.lock().stage(&observation);
        let tag = observation.primary_tag().to_string();

        let document = self.store.load(&tag)?.unwrap_or_default();
        let mut merged = merge::fold(
            document,
            &observation.templated_path,
            &observation.method,
            &staged,
        );
        if let Some(scaffold) = &self.config.scaffold {
            merged.apply_scaffold(
                Info {
                    title: scaffold.title.clone(),
                    description: scaffold.description.clone(),
                    version: scaffold.version.clone(),
                },
                &self.config.security,
            );
        }
        self.store.save(&tag, &merged)
    }

    /// Drop run-scoped staging state. Call once at run end.
    pub fn flush(&self) {
        self.accumulator.lock().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunMode;
    use crate::model::{CapturedValue, Document};
    use parking_lot::Mutex as PlMutex;

    /// In-memory store used to exercise the session without touching disk.
    #[derive(Default)]
    struct MemoryStore {
        saved: PlMutex<Option<Document>>,
        fail_saves: bool,
    }

    impl DocumentStore for MemoryStore {
        fn load(&self, _tag: &str) -> anyhow::Result<Option<Document>> {
            Ok(self.saved.lock().clone())
        }

        fn save(&self, _tag: &str, document: &Document) -> anyhow::Result<()> {
            if self.fail_saves {
                anyhow::bail!("disk full");
            }
            *self.saved.lock() = Some(document.clone());
            Ok(())
        }
    }

    fn test_config() -> ScribeConfig {
        let mut config = ScribeConfig::default();
        config.mode = RunMode::Test;
        config.destination = Some("doc/api".to_string());
        config
    }

    fn sample_exchange() -> Exchange {
        let mut exchange = Exchange::new("GET", "/orders/7", "orders");
        exchange
            .path_params
            .insert("id".to_string(), CapturedValue::from("7"));
        exchange.response_body = br#"{"id": 7}"#.to_vec();
        exchange
    }

    #[test]
    fn test_observe_persists_merged_document() {
        let session = TraceSession::new(test_config(), MemoryStore::default());
        session.observe(&sample_exchange());

        let saved = session.store.saved.lock().clone().unwrap();
        assert!(saved.operation("/orders/{id}", "get").is_some());
    }

    #[test]
    fn test_observe_swallows_store_failures() {
        let store = MemoryStore {
            fail_saves: true,
            ..MemoryStore::default()
        };
        let session = TraceSession::new(test_config(), store);
        // Must not panic or propagate; the instrumented test goes on.
        session.observe(&sample_exchange());
        assert!(session.try_observe(&sample_exchange()).is_err());
    }

    #[test]
    fn test_flush_clears_accumulator() {
        let session = TraceSession::new(test_config(), MemoryStore::default());
        session.observe(&sample_exchange());
        assert!(!session.accumulator.lock().is_empty());
        session.flush();
        assert!(session.accumulator.lock().is_empty());
    }
}
