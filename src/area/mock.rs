//! Failure-injecting areas for tests.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::area::kv::{KeyValueArea, MemoryArea};
use crate::area::web::{MemoryWebArea, WebArea};

/// In-memory asynchronous area that can be told to reject reads or
/// writes, for exercising the error path of the adapters.
#[derive(Default)]
pub struct FlakyArea {
    inner: MemoryArea,
    reject_reads: AtomicBool,
    reject_writes: AtomicBool,
}

impl FlakyArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_reads(&self, reject: bool) {
        self.reject_reads.store(reject, Ordering::SeqCst);
    }

    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueArea for FlakyArea {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.reject_reads.load(Ordering::SeqCst) {
            bail!("injected read failure");
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            bail!("injected write failure");
        }
        self.inner.set(key, value).await
    }

    async fn clear(&self) -> Result<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            bail!("injected write failure");
        }
        self.inner.clear().await
    }
}

/// Synchronous sibling of [`FlakyArea`].
#[derive(Default)]
pub struct FlakyWebArea {
    inner: MemoryWebArea,
    reject_reads: AtomicBool,
    reject_writes: AtomicBool,
}

impl FlakyWebArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_reads(&self, reject: bool) {
        self.reject_reads.store(reject, Ordering::SeqCst);
    }

    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }
}

impl WebArea for FlakyWebArea {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.reject_reads.load(Ordering::SeqCst) {
            bail!("injected read failure");
        }
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            bail!("injected write failure");
        }
        self.inner.set_item(key, value)
    }

    fn clear(&self) -> Result<()> {
        if self.reject_writes.load(Ordering::SeqCst) {
            bail!("injected write failure");
        }
        self.inner.clear()
    }
}
