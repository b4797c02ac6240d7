//! # Symbolic Attributes
//!
//! Everything derived from a single attribute declaration lives here. One
//! declaration feeds every component, so coercion, validation, labels,
//! predicates and scopes always agree on the allowed set.
//!
//! | Module | Role |
//! |--------|------|
//! | `allowed` | Normalizes the declared values into an ordered set |
//! | `spec` | Options and the immutable per-attribute configuration |
//! | `coerce` | Raw ↔ canonical transform on reads and writes |
//! | `label` | Display labels, localized or literal |
//! | `validation` | Membership rules and validation errors |
//! | `accessors` | Text accessor and boolean predicates |
//! | `filter` | Generated scopes and composable query filters |
//!
//! ## Usage
//!
//! ```ignore
//! let status = SymbolAttribute::declare(
//!     "User",
//!     "symbolizes.user",
//!     "status",
//!     SymbolOptions::new()
//!         .within(Declaration::values(["active", "inactive"]))
//!         .capitalize(),
//! )?;
//!
//! let value = status.decode(Some(&Scalar::from("inactive")));   // Some(:inactive)
//! let label = status.label(&value.unwrap(), &LabelContext::plain()); // "Inactive"
//! ```

mod accessors;
mod allowed;
mod coerce;
mod filter;
mod label;
mod spec;
mod validation;

pub use accessors::{Accessors, Predicate, TextAccessor};
pub use allowed::{AllowedValue, AllowedValues, Declaration};
pub use filter::{Filter, FilterOp, Query, Scope};
pub use label::LabelContext;
pub use spec::{SymbolAttribute, SymbolOptions};
pub use validation::{ValidationError, ValidationErrors, Validator};
