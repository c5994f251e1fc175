//! Storepeek
//!
//! An interactive panel for exercising and inspecting storage backends:
//! two asynchronous key/value areas, two synchronous web-storage-style
//! areas, and a SQLite-backed document store, all behind one
//! [`StorageAdapter`](core::StorageAdapter) contract.

#![forbid(unsafe_code)]

pub mod adapter;
pub mod area;
pub mod core;
pub mod prelude;
