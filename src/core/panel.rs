//! Panel controller: binds storage adapters to list views and chains a
//! refresh behind every successful mutation.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::core::adapter::StorageAdapter;
use crate::core::display::ListView;
use crate::core::error::BackendUnavailable;

/// Re-render a view from the adapter's current listing.
///
/// The view is replaced in one call only after a successful `list`, so a
/// failing backend leaves the previous rendering in place and concurrent
/// refreshes settle on whichever listing was written last.
pub async fn refresh(
    adapter: &dyn StorageAdapter,
    view: &dyn ListView,
) -> Result<(), BackendUnavailable> {
    let entries = adapter.list().await?;
    view.replace(entries.iter().map(|entry| entry.render()).collect());
    Ok(())
}

struct Binding {
    adapter: Arc<dyn StorageAdapter>,
    view: Arc<dyn ListView>,
}

/// One (adapter, view) binding per backend. Failures are logged with the
/// backend identity and the triggering event, never propagated: a broken
/// backend must not take the panel down, and its siblings keep working.
#[derive(Default)]
pub struct Panel {
    bindings: Vec<Binding>,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(mut self, adapter: Arc<dyn StorageAdapter>, view: Arc<dyn ListView>) -> Self {
        self.bindings.push(Binding { adapter, view });
        self
    }

    /// Names of all bound backends, in binding order.
    pub fn backends(&self) -> Vec<&'static str> {
        self.bindings.iter().map(|b| b.adapter.name()).collect()
    }

    /// Startup pass: render every backend once. Must run after the
    /// composition root finished wiring; the document store cannot be
    /// touched during construction.
    pub async fn init(&self) {
        info!("initial refresh of {} backends", self.bindings.len());
        self.refresh_all().await;
    }

    /// Append an entry to the named backend, then re-render it.
    pub async fn add(&self, backend: &str) {
        if let Some(binding) = self.binding(backend) {
            let result = binding.adapter.add().await;
            Self::finish(binding, "add", result).await;
        }
    }

    /// Wipe the named backend, then re-render it.
    pub async fn clear(&self, backend: &str) {
        if let Some(binding) = self.binding(backend) {
            let result = binding.adapter.clear().await;
            Self::finish(binding, "clear", result).await;
        }
    }

    /// Re-render every backend. Bindings refresh independently; one
    /// failing backend does not stop the others.
    pub async fn refresh_all(&self) {
        let tasks = self.bindings.iter().map(|binding| async move {
            if let Err(err) = refresh(binding.adapter.as_ref(), binding.view.as_ref()).await {
                warn!("refresh of `{}` failed: {}", err.backend(), err);
            }
        });
        join_all(tasks).await;
    }

    fn binding(&self, backend: &str) -> Option<&Binding> {
        let found = self
            .bindings
            .iter()
            .find(|b| b.adapter.name() == backend);
        if found.is_none() {
            warn!("unknown backend `{}`, known: {:?}", backend, self.backends());
        }
        found
    }

    /// The refresh is chained on the success path only; a failed mutation
    /// leaves the previous rendering in place.
    async fn finish(binding: &Binding, event: &str, result: Result<(), BackendUnavailable>) {
        match result {
            Ok(()) => {
                if let Err(err) = refresh(binding.adapter.as_ref(), binding.view.as_ref()).await {
                    error!("refresh after {} of `{}` failed: {}", event, err.backend(), err);
                }
            }
            Err(err) => {
                error!("{} on `{}` failed: {}", event, err.backend(), err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::core::display::BufferView;
    use crate::core::entry::Entry;

    /// Scripted adapter: a fixed entry list and switchable failure.
    struct StubAdapter {
        name: &'static str,
        entries: Mutex<Vec<Entry>>,
        failing: Mutex<bool>,
    }

    impl StubAdapter {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                entries: Mutex::new(Vec::new()),
                failing: Mutex::new(false),
            }
        }

        fn set_failing(&self, failing: bool) {
            *self.failing.lock() = failing;
        }

        fn check(&self) -> Result<(), BackendUnavailable> {
            if *self.failing.lock() {
                Err(BackendUnavailable::new(self.name, anyhow::anyhow!("down")))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl StorageAdapter for StubAdapter {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn list(&self) -> Result<Vec<Entry>, BackendUnavailable> {
            self.check()?;
            Ok(self.entries.lock().clone())
        }

        async fn add(&self) -> Result<(), BackendUnavailable> {
            self.check()?;
            let mut entries = self.entries.lock();
            let key = entries.len().to_string();
            entries.push(Entry::new(key, "tick"));
            Ok(())
        }

        async fn clear(&self) -> Result<(), BackendUnavailable> {
            self.check()?;
            self.entries.lock().clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn refresh_renders_one_line_per_entry() {
        let adapter = StubAdapter::new("stub");
        adapter.add().await.unwrap();
        adapter.add().await.unwrap();
        let view = BufferView::new();

        refresh(&adapter, &view).await.unwrap();
        assert_eq!(view.lines(), vec!["[0] tick".to_string(), "[1] tick".to_string()]);
    }

    #[tokio::test]
    async fn failed_list_leaves_previous_rendering() {
        let adapter = StubAdapter::new("stub");
        adapter.add().await.unwrap();
        let view = BufferView::new();
        refresh(&adapter, &view).await.unwrap();

        adapter.set_failing(true);
        let err = refresh(&adapter, &view).await.unwrap_err();
        assert_eq!(err.backend(), "stub");
        assert_eq!(view.lines(), vec!["[0] tick".to_string()]);
    }

    #[tokio::test]
    async fn add_command_chains_a_refresh() {
        let adapter = Arc::new(StubAdapter::new("stub"));
        let view = Arc::new(BufferView::new());
        let panel = Panel::new().bind(adapter.clone(), view.clone());

        panel.add("stub").await;
        assert_eq!(view.lines(), vec!["[0] tick".to_string()]);

        panel.clear("stub").await;
        assert!(view.lines().is_empty());
    }

    #[tokio::test]
    async fn failed_add_skips_the_chained_refresh() {
        let adapter = Arc::new(StubAdapter::new("stub"));
        let view = Arc::new(BufferView::new());
        let panel = Panel::new().bind(adapter.clone(), view.clone());
        panel.add("stub").await;

        adapter.set_failing(true);
        panel.add("stub").await;
        // Still the rendering from the first, successful add.
        assert_eq!(view.lines(), vec!["[0] tick".to_string()]);
    }

    #[tokio::test]
    async fn unknown_backend_is_ignored() {
        let adapter = Arc::new(StubAdapter::new("stub"));
        let view = Arc::new(BufferView::new());
        let panel = Panel::new().bind(adapter, view.clone());

        panel.add("nope").await;
        assert!(view.lines().is_empty());
    }

    #[tokio::test]
    async fn refresh_all_isolates_failures() {
        let healthy = Arc::new(StubAdapter::new("healthy"));
        healthy.add().await.unwrap();
        let broken = Arc::new(StubAdapter::new("broken"));
        broken.set_failing(true);

        let healthy_view = Arc::new(BufferView::new());
        let broken_view = Arc::new(BufferView::new());
        let panel = Panel::new()
            .bind(broken, broken_view.clone())
            .bind(healthy, healthy_view.clone());

        panel.refresh_all().await;
        assert_eq!(healthy_view.lines(), vec!["[0] tick".to_string()]);
        assert!(broken_view.lines().is_empty());
    }
}
