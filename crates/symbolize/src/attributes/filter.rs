//! Query filters and generated scopes.
//!
//! A [`Filter`] compares an attribute's *storage* representation against one
//! or more storage values, the way a `WHERE` clause would. Generated
//! [`Scope`]s are named filters, and a [`Query`] is a conjunction of filters.
//! Missing values never match, including for the negated operators.

use super::spec::SymbolAttribute;
use crate::host::AttributeHost;
use crate::value::{Scalar, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Stored value equals the filter value.
    Eq,
    /// Stored value differs from the filter value.
    Ne,
    /// Stored value is one of the filter values.
    In,
    /// Stored value is none of the filter values.
    NotIn,
}

/// A condition on one attribute's stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub attribute: String,
    pub op: FilterOp,
    pub values: Vec<Scalar>,
}

impl Filter {
    pub fn new(attribute: impl Into<String>, op: FilterOp, values: Vec<Scalar>) -> Self {
        Self {
            attribute: attribute.into(),
            op,
            values,
        }
    }

    pub fn eq(attribute: impl Into<String>, value: Scalar) -> Self {
        Self::new(attribute, FilterOp::Eq, vec![value])
    }

    pub fn ne(attribute: impl Into<String>, value: Scalar) -> Self {
        Self::new(attribute, FilterOp::Ne, vec![value])
    }

    pub fn matches(&self, record: &dyn AttributeHost) -> bool {
        let Some(stored) = record.read_raw(&self.attribute) else {
            return false;
        };
        let found = self.values.iter().any(|v| storage_eq(&stored, v));
        match self.op {
            FilterOp::Eq | FilterOp::In => found,
            FilterOp::Ne | FilterOp::NotIn => !found,
        }
    }
}

/// Storage equality. Strings and symbols compare by text; everything else
/// must match in kind and value.
fn storage_eq(a: &Scalar, b: &Scalar) -> bool {
    match (a, b) {
        (Scalar::Str(x) | Scalar::Sym(x), Scalar::Str(y) | Scalar::Sym(y)) => x == y,
        _ => a == b,
    }
}

/// A named, generated query predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub name: String,
    pub filter: Filter,
}

impl Scope {
    pub fn matches(&self, record: &dyn AttributeHost) -> bool {
        self.filter.matches(record)
    }
}

/// Conjunction of filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<Filter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn and_scope(self, scope: &Scope) -> Self {
        self.and(scope.filter.clone())
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// An empty query matches everything.
    pub fn matches(&self, record: &dyn AttributeHost) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

impl From<Scope> for Query {
    fn from(scope: Scope) -> Self {
        Query::new().and(scope.filter)
    }
}

impl SymbolAttribute {
    /// Named scopes for every allowed value, or nothing when scopes are off.
    ///
    /// Identifier values are named after themselves, integers as
    /// `<attribute>_<n>`. Booleans are named after the attribute:
    /// `<attr>`/`with_<attr>` for true, `not_<attr>`/`without_<attr>` for false.
    pub fn scopes(&self) -> Vec<Scope> {
        let Some(allowed) = self.allowed.as_ref().filter(|_| self.scopes) else {
            return Vec::new();
        };
        allowed
            .values()
            .flat_map(|value| {
                let filter = Filter::eq(self.name.clone(), value.storage());
                self.scope_names(value).into_iter().map(move |name| Scope {
                    name,
                    filter: filter.clone(),
                })
            })
            .collect()
    }

    fn scope_names(&self, value: &Symbol) -> Vec<String> {
        match value {
            Symbol::Bool(true) => vec![self.name.clone(), format!("with_{}", self.name)],
            Symbol::Bool(false) => vec![
                format!("not_{}", self.name),
                format!("without_{}", self.name),
            ],
            Symbol::Int(i) => vec![format!("{}_{}", self.name, i)],
            Symbol::Name(_) => vec![value.ident()],
        }
    }

    /// Records whose value is any of `values`.
    pub fn with<I, T>(&self, values: I) -> Filter
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Filter::new(self.name.clone(), FilterOp::In, self.storage_values(values))
    }

    /// Records whose value is none of `values`.
    pub fn without<I, T>(&self, values: I) -> Filter
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Filter::new(
            self.name.clone(),
            FilterOp::NotIn,
            self.storage_values(values),
        )
    }

    fn storage_values<I, T>(&self, values: I) -> Vec<Scalar>
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        values
            .into_iter()
            .filter_map(|v| self.encode(Some(&v.into())))
            .collect()
    }
}
