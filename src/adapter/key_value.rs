//! Ordinal-counter adapter over the asynchronous key/value capability.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapter::COUNTER_KEY;
use crate::area::kv::KeyValueArea;
use crate::core::adapter::StorageAdapter;
use crate::core::entry::{Entry, timestamp_now};
use crate::core::error::BackendUnavailable;

/// One adapter type, two flavors: the device-local and the account-synced
/// area share the counter scheme and differ only in the injected area.
///
/// Keys are ordinals assigned from a counter stored in the same area under
/// [`COUNTER_KEY`]; an absent or unparseable counter reads as zero, so a
/// collection springs into existence on the first `add`.
pub struct KeyValueAdapter {
    name: &'static str,
    area: Arc<dyn KeyValueArea>,
}

impl KeyValueAdapter {
    pub fn local(area: Arc<dyn KeyValueArea>) -> Self {
        Self {
            name: "kv-local",
            area,
        }
    }

    pub fn synced(area: Arc<dyn KeyValueArea>) -> Self {
        Self {
            name: "kv-sync",
            area,
        }
    }

    fn fail(&self, err: anyhow::Error) -> BackendUnavailable {
        BackendUnavailable::new(self.name, err)
    }

    async fn counter(&self) -> Result<u64, BackendUnavailable> {
        let raw = self.area.get(COUNTER_KEY).await.map_err(|e| self.fail(e))?;
        Ok(raw.and_then(|v| v.parse().ok()).unwrap_or(0))
    }
}

#[async_trait]
impl StorageAdapter for KeyValueAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn list(&self) -> Result<Vec<Entry>, BackendUnavailable> {
        let count = self.counter().await?;
        let mut entries = Vec::with_capacity(count as usize);
        for ordinal in 0..count {
            let key = ordinal.to_string();
            let value = self.area.get(&key).await.map_err(|e| self.fail(e))?;
            entries.push(match value {
                Some(value) => Entry::new(key, value),
                None => Entry::missing(key),
            });
        }
        Ok(entries)
    }

    async fn add(&self) -> Result<(), BackendUnavailable> {
        let count = self.counter().await?;
        // Entry before counter: a rejected entry write leaves the counter
        // alone and never becomes visible to `list`.
        self.area
            .set(&count.to_string(), &timestamp_now())
            .await
            .map_err(|e| self.fail(e))?;
        self.area
            .set(COUNTER_KEY, &(count + 1).to_string())
            .await
            .map_err(|e| self.fail(e))
    }

    async fn clear(&self) -> Result<(), BackendUnavailable> {
        self.area.clear().await.map_err(|e| self.fail(e))
    }
}
