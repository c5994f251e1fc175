// Convenience re-exports: use storepeek::prelude::*;
pub use crate::adapter::{DocumentStore, KeyValueAdapter, PageAdapter};
pub use crate::area::{
    FileWebArea, JsonFileArea, KeyValueArea, MemoryArea, MemoryWebArea, WebArea,
};
pub use crate::core::{
    BackendUnavailable, BufferView, Entry, ListView, Panel, StorageAdapter, TermView, refresh,
};

// Re-export async_trait for StorageAdapter impls downstream.
pub use async_trait::async_trait;
