use crate::model::Document;
use anyhow::Result;

/// Durable home of the synthesized document. The core only ever loads and
/// saves; the physical encoding, directory bootstrap and destination-path
/// resolution live entirely behind this boundary.
pub trait DocumentStore: Send + Sync {
    /// Load the document filed under `tag`. `None` when nothing usable is
    /// persisted yet; a missing or unreadable document is not an error.
    fn load(&self, tag: &str) -> Result<Option<Document>>;

    /// Persist the document under `tag`, replacing whatever was there.
    /// Unprotected read-modify-write across processes: last write wins.
    fn save(&self, tag: &str, document: &Document) -> Result<()>;
}
