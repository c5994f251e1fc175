use async_trait::async_trait;

use crate::core::entry::Entry;
use crate::core::error::BackendUnavailable;

/// Uniform contract over every storage backend the panel can inspect.
///
/// Implementations are siblings selected at composition time; nothing here
/// assumes how a backend keys or persists its entries, only that it can
/// enumerate, append, and wipe them.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    /// Stable identity, used for panel commands and log lines
    /// (e.g. "kv-local").
    fn name(&self) -> &'static str;

    /// All previously added, non-cleared entries in ascending key order.
    async fn list(&self) -> Result<Vec<Entry>, BackendUnavailable>;

    /// Append one entry valued with the current timestamp at the next
    /// unused key.
    async fn add(&self) -> Result<(), BackendUnavailable>;

    /// Remove every entry and reset the key sequence. Idempotent.
    async fn clear(&self) -> Result<(), BackendUnavailable>;
}
