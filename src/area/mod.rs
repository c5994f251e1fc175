pub mod kv;
pub mod mock;
pub mod web;

pub use kv::{JsonFileArea, KeyValueArea, MemoryArea};
pub use web::{FileWebArea, MemoryWebArea, WebArea};
