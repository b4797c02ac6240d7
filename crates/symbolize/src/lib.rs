//! # Symbolize Architecture
//!
//! Symbolize gives record models **symbolic attributes**: fields whose values
//! come from a small declared set (`:active`, `:inactive`; `true`, `false`;
//! `1..=9`). One declaration drives everything the field needs: coercion of
//! raw storage values, display labels with optional localization, membership
//! validation, boolean predicates and named query scopes.
//!
//! The library does not persist anything itself. It plugs into a host
//! persistence framework through the traits in [`host`], and ships a small
//! reference host ([`record`], [`store`]) used by the tests and the CLI.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Declaration Layer (model.rs, schema.rs)                    │
//! │  - ModelBuilder / TOML schema files → ModelSchema           │
//! │  - Registry of models, written once at start-up             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Attribute Layer (attributes/)                              │
//! │  - Allowed sets, coercion, labels, validation               │
//! │  - Predicates and scopes derived from one declaration       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host Layer (host.rs, record.rs, store/)                    │
//! │  - AttributeHost: raw get/set on one record                 │
//! │  - ModelHost: validator and scope registration              │
//! │  - RecordStore over memory or JSON-file backends            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Declarations Are Immutable
//!
//! Every malformed declaration fails when the model is built, never later.
//! Once built, a [`model::ModelSchema`] and its attributes are read-only and
//! can be shared across threads behind an `Arc`. Per-record state lives only
//! in the host record.
//!
//! ## Module Overview
//!
//! - [`attributes`]: The per-attribute engine
//! - [`model`]: Model builder, schemas and the registry
//! - [`schema`]: Declarations loaded from TOML
//! - [`value`]: Raw and canonical value types
//! - [`i18n`]: Translator trait and the in-memory catalog
//! - [`host`]: Host framework interfaces
//! - [`record`]: Reference record with dirty tracking
//! - [`store`]: Reference record store and backends
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod attributes;
pub mod config;
pub mod error;
pub mod host;
pub mod i18n;
pub mod model;
pub mod record;
pub mod schema;
pub mod store;
pub mod value;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
