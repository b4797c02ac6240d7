//! # Host Framework Interfaces
//!
//! The engine does not store records, run validation pipelines or build
//! queries. It plugs into a host persistence framework through these seams:
//!
//! - [`AttributeHost`]: raw attribute storage on a single record. Symbolic
//!   reads and writes are layered on top of it by
//!   [`SymbolAttribute::read`](crate::attributes::SymbolAttribute::read) and
//!   [`SymbolAttribute::write`](crate::attributes::SymbolAttribute::write).
//! - [`ModelHost`]: per-model registration of validators and named query
//!   predicates, fed by [`ModelSchema::install`](crate::model::ModelSchema::install).
//! - [`Translator`](crate::i18n::Translator): the localization lookup.
//!
//! [`Record`](crate::record::Record) and
//! [`RecordStore`](crate::store::record_store::RecordStore) are the reference
//! implementations used by the tests and the CLI.

use crate::attributes::{Scope, Validator};
use crate::value::Scalar;

/// Raw attribute access on one record.
pub trait AttributeHost {
    /// The stored value, without coercion.
    fn read_raw(&self, attribute: &str) -> Option<Scalar>;

    /// Replace the stored value. Implementations mark the attribute dirty
    /// only when the stored representation actually changes.
    fn write_raw(&mut self, attribute: &str, value: Option<Scalar>);
}

/// Registration points a host framework exposes per model type.
pub trait ModelHost {
    fn register_validator(&mut self, model: &str, validator: Validator);

    fn register_predicate(&mut self, model: &str, scope: Scope);
}
