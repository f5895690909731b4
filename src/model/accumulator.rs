use indexmap::IndexMap;

use crate::model::{Observation, Operation, PathOperations};

/// Run-scoped staging area: the latest observed Operation per templated
/// path and method. One instance is owned by the session for the lifetime
/// of a run and discarded at run end; nothing here is global state.
#[derive(Debug, Default)]
pub struct Accumulator {
    staged: IndexMap<String, PathOperations>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage the observation's Operation, replacing any earlier staging for
    /// the same path and method, and return the staged copy for the merger.
    pub fn stage(&mut self, observation: &Observation) -> Operation {
        let operation = observation.to_operation();
        self.staged
            .entry(observation.templated_path.clone())
            .or_default()
            .insert(observation.method.clone(), operation.clone());
        operation
    }

    /// Latest staged Operation for a path and method, if any.
    pub fn staged(&self, path: &str, method: &str) -> Option<&Operation> {
        self.staged.get(path).and_then(|ops| ops.get(method))
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Drop all staged state. Called at run end.
    pub fn flush(&mut self) {
        self.staged.clear();
    }
}
