//! # Reference Host Framework
//!
//! A symbolic attribute needs a host that stores raw values, runs validators
//! on save and evaluates named filters. [`RecordStore`] is that host in its
//! smallest useful form: it installs [`ModelSchema`](crate::model::ModelSchema)s,
//! validates [`Record`](crate::record::Record)s before persisting them, and
//! answers scope and query reads.
//!
//! ## Backends
//!
//! Raw I/O sits behind [`backend::RecordBackend`]. The store only ever loads or
//! replaces the full table of one model, so a backend is two methods.
//!
//! - [`fs::FileStore`]: one JSON table per model under a data directory.
//! - [`memory::InMemoryStore`]: for tests and one-shot CLI runs.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── user.json           # [{ "id": ..., "values": { "status": "active" } }]
//! └── user_skill.json
//! ```
//!
//! Values are stored in their raw form. Symbol-like values are written as
//! strings, so a table written by one process reads back the same way in
//! another.

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod record_store;

pub use backend::{RecordBackend, StoredRecord};
pub use record_store::RecordStore;
