//! Scalar and canonical value types.
//!
//! Two representations flow through the engine:
//!
//! - [`Scalar`] is what a host framework stores or what a caller assigns:
//!   a string, an integer, a boolean, or an already-symbolic identifier.
//! - [`Symbol`] is the canonical, in-memory member of an allowed set. It is
//!   compared by value and never carries its storage form.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A raw attribute value, as stored by the host or assigned by a caller.
///
/// `Sym` marks a value the caller already considers symbolic. It matches
/// identifier members by exact type, while `Str` only matches through its
/// string form. Storage never produces `Sym`; it serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Str(String),
    #[serde(skip_deserializing)]
    Sym(String),
}

impl Scalar {
    /// Create a symbolic identifier value.
    pub fn sym(name: impl Into<String>) -> Self {
        Scalar::Sym(name.into())
    }

    /// Blank means an empty or whitespace-only string form.
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Str(s) | Scalar::Sym(s) => s.trim().is_empty(),
            Scalar::Bool(_) | Scalar::Int(_) => false,
        }
    }

    /// The value's string form, used for cross-kind matching.
    pub fn string_form(&self) -> Cow<'_, str> {
        match self {
            Scalar::Str(s) | Scalar::Sym(s) => Cow::Borrowed(s),
            Scalar::Int(i) => Cow::Owned(i.to_string()),
            Scalar::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }

    /// Best-effort canonical form for values that match no allowed member.
    pub fn canonicalize(&self) -> Symbol {
        match self {
            Scalar::Bool(b) => Symbol::Bool(*b),
            Scalar::Int(i) => Symbol::Int(*i),
            Scalar::Str(s) | Scalar::Sym(s) => Symbol::Name(s.clone()),
        }
    }

    /// Convert a JSON scalar. `null` maps to `Ok(None)`; arrays, objects and
    /// non-integer numbers are rejected.
    pub fn from_json(value: &serde_json::Value) -> Result<Option<Scalar>, String> {
        use serde_json::Value;
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(Scalar::Bool(*b))),
            Value::Number(n) => n
                .as_i64()
                .map(|i| Some(Scalar::Int(i)))
                .ok_or_else(|| format!("unsupported number {}", n)),
            Value::String(s) => Ok(Some(Scalar::Str(s.clone()))),
            Value::Array(_) => Err("nested sequence is not a scalar".to_string()),
            Value::Object(_) => Err("nested mapping is not a scalar".to_string()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Sym(s) => write!(f, ":{}", s),
            other => f.write_str(&other.string_form()),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<Symbol> for Scalar {
    fn from(value: Symbol) -> Self {
        match value {
            Symbol::Bool(b) => Scalar::Bool(b),
            Symbol::Int(i) => Scalar::Int(i),
            Symbol::Name(s) => Scalar::Sym(s),
        }
    }
}

impl From<&Symbol> for Scalar {
    fn from(value: &Symbol) -> Self {
        value.clone().into()
    }
}

/// A canonical member of an allowed-value set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Symbol {
    Bool(bool),
    Int(i64),
    Name(String),
}

impl Symbol {
    pub fn name(name: impl Into<String>) -> Self {
        Symbol::Name(name.into())
    }

    /// The storage representation: string form for identifiers, native
    /// form for booleans and integers.
    pub fn storage(&self) -> Scalar {
        match self {
            Symbol::Bool(b) => Scalar::Bool(*b),
            Symbol::Int(i) => Scalar::Int(*i),
            Symbol::Name(s) => Scalar::Str(s.clone()),
        }
    }

    /// Identifier form used to derive predicate and scope names.
    ///
    /// Anything outside `[A-Za-z0-9_]` becomes `_`.
    pub fn ident(&self) -> String {
        self.to_string()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// `in_progress` → `In progress`, `true` → `True`.
    pub fn humanize(&self) -> String {
        humanize(&self.to_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Bool(b) => write!(f, "{}", b),
            Symbol::Int(i) => write!(f, "{}", i),
            Symbol::Name(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Symbol::Name(value.to_string())
    }
}

impl From<bool> for Symbol {
    fn from(value: bool) -> Self {
        Symbol::Bool(value)
    }
}

impl From<i64> for Symbol {
    fn from(value: i64) -> Self {
        Symbol::Int(value)
    }
}

pub(crate) fn humanize(text: &str) -> String {
    let spaced = text.replace('_', " ");
    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

/// Uppercase the first letter and leave the remainder unchanged.
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `UserSkill` → `user_skill`; already snake-cased names pass through.
pub(crate) fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else if c == '-' || c == ' ' {
            out.push('_');
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}
