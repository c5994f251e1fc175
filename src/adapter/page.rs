//! Ordinal-counter adapter over the synchronous key/value capability.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapter::COUNTER_KEY;
use crate::area::web::WebArea;
use crate::core::adapter::StorageAdapter;
use crate::core::entry::{Entry, timestamp_now};
use crate::core::error::BackendUnavailable;

/// Same counter scheme as [`KeyValueAdapter`](crate::adapter::KeyValueAdapter),
/// against the synchronous capability. The local flavor is expected to be
/// bound to a persistent area, the session flavor to an in-memory one.
pub struct PageAdapter {
    name: &'static str,
    area: Arc<dyn WebArea>,
}

impl PageAdapter {
    pub fn local(area: Arc<dyn WebArea>) -> Self {
        Self {
            name: "page-local",
            area,
        }
    }

    pub fn session(area: Arc<dyn WebArea>) -> Self {
        Self {
            name: "page-session",
            area,
        }
    }

    fn fail(&self, err: anyhow::Error) -> BackendUnavailable {
        BackendUnavailable::new(self.name, err)
    }

    fn counter(&self) -> Result<u64, BackendUnavailable> {
        let raw = self.area.get_item(COUNTER_KEY).map_err(|e| self.fail(e))?;
        Ok(raw.and_then(|v| v.parse().ok()).unwrap_or(0))
    }
}

#[async_trait]
impl StorageAdapter for PageAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn list(&self) -> Result<Vec<Entry>, BackendUnavailable> {
        let count = self.counter()?;
        let mut entries = Vec::with_capacity(count as usize);
        for ordinal in 0..count {
            let key = ordinal.to_string();
            let value = self.area.get_item(&key).map_err(|e| self.fail(e))?;
            entries.push(match value {
                Some(value) => Entry::new(key, value),
                None => Entry::missing(key),
            });
        }
        Ok(entries)
    }

    async fn add(&self) -> Result<(), BackendUnavailable> {
        let count = self.counter()?;
        self.area
            .set_item(&count.to_string(), &timestamp_now())
            .map_err(|e| self.fail(e))?;
        self.area
            .set_item(COUNTER_KEY, &(count + 1).to_string())
            .map_err(|e| self.fail(e))
    }

    async fn clear(&self) -> Result<(), BackendUnavailable> {
        self.area.clear().map_err(|e| self.fail(e))
    }
}
