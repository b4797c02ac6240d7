//! Membership validation for symbolic attributes.
//!
//! Rules:
//! - A value must be a member of the allowed set.
//! - A missing value is accepted when `allow_nil` or `allow_blank` is set
//!   (blank input is stored as nil, and allowing blank admits nil too).
//! - Attributes declared without an allowed set are never validated.
//!
//! Validation runs when the host validates a record, not on assignment, and
//! reports at most one failure per attribute.

use super::spec::SymbolAttribute;
use crate::host::AttributeHost;
use crate::value::Symbol;
use std::fmt;
use std::sync::Arc;

/// A single attribute failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No value, and neither nil nor blank is allowed.
    Missing { attribute: String },
    /// A value outside the allowed set.
    NotIncluded { attribute: String, value: Symbol },
}

impl ValidationError {
    pub fn attribute(&self) -> &str {
        match self {
            ValidationError::Missing { attribute } => attribute,
            ValidationError::NotIncluded { attribute, .. } => attribute,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Missing { attribute } => {
                write!(f, "{} can't be blank", attribute)
            }
            ValidationError::NotIncluded { attribute, value } => {
                write!(f, "{} '{}' is not included in the list", attribute, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// All failures of one record, at most one per attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a failure unless the attribute already has one.
    pub fn add(&mut self, error: ValidationError) {
        if self.on(error.attribute()).is_none() {
            self.errors.push(error);
        }
    }

    pub fn on(&self, attribute: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.attribute() == attribute)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// `Ok(())` when there are no failures.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl SymbolAttribute {
    /// Check one canonical value against this attribute's rules.
    pub fn check(&self, value: Option<&Symbol>) -> Result<(), ValidationError> {
        let Some(allowed) = &self.allowed else {
            return Ok(());
        };
        match value {
            None if self.allow_nil || self.allow_blank => Ok(()),
            None => Err(ValidationError::Missing {
                attribute: self.name.clone(),
            }),
            Some(v) if allowed.contains(v) => Ok(()),
            Some(v) => Err(ValidationError::NotIncluded {
                attribute: self.name.clone(),
                value: v.clone(),
            }),
        }
    }

    /// Whether this attribute registers a validator at all.
    pub fn validates(&self) -> bool {
        self.allowed.is_some()
    }
}

/// The validator registered into a host pipeline for one attribute.
#[derive(Debug, Clone)]
pub struct Validator {
    attribute: Arc<SymbolAttribute>,
}

impl Validator {
    pub fn new(attribute: Arc<SymbolAttribute>) -> Self {
        Self { attribute }
    }

    pub fn attribute(&self) -> &str {
        self.attribute.name()
    }

    pub fn validate(&self, record: &dyn AttributeHost) -> Result<(), ValidationError> {
        self.attribute.check(self.attribute.read(record).as_ref())
    }
}
