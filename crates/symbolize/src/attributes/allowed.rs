//! Allowed-value sets.
//!
//! A [`Declaration`] is what a model author writes; [`AllowedValues`] is the
//! normalized, ordered form every other component consults.

use crate::value::{Scalar, Symbol};
use std::ops::RangeInclusive;

/// Largest number of members an integer range may expand to.
pub const MAX_RANGE_MEMBERS: u64 = 10_000;

/// The shape an allowed-value set is declared in.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// Plain values; labels derive from the values themselves.
    Values(Vec<Scalar>),
    /// Values with explicit labels, from a mapping or a list of pairs.
    Labeled(Vec<(Scalar, String)>),
    /// A contiguous integer range, e.g. `1..=9`.
    Range(RangeInclusive<i64>),
}

impl Declaration {
    pub fn values<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Declaration::Values(values.into_iter().map(Into::into).collect())
    }

    pub fn labeled<I, T, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, L)>,
        T: Into<Scalar>,
        L: Into<String>,
    {
        Declaration::Labeled(
            pairs
                .into_iter()
                .map(|(value, label)| (value.into(), label.into()))
                .collect(),
        )
    }

    pub fn range(range: RangeInclusive<i64>) -> Self {
        Declaration::Range(range)
    }

    /// Whether labels were given explicitly. Labeled declarations default
    /// to no localization.
    pub fn is_labeled(&self) -> bool {
        matches!(self, Declaration::Labeled(_))
    }

    /// Parse a declaration from JSON.
    ///
    /// Accepted shapes:
    /// - `["active", "inactive"]`
    /// - `[[1, "One"], [2, "Two"]]`
    /// - `{"linux": "Linux", "mac": "Mac OS X"}`
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        use serde_json::Value;
        match value {
            Value::Array(items) => {
                let pairs = items.iter().filter(|item| item.is_array()).count();
                if pairs == 0 {
                    let values = items
                        .iter()
                        .map(required_scalar)
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Declaration::Values(values))
                } else if pairs == items.len() {
                    let labeled = items
                        .iter()
                        .map(parse_pair)
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Declaration::Labeled(labeled))
                } else {
                    Err("cannot mix plain values and [value, label] pairs".to_string())
                }
            }
            Value::Object(map) => {
                let labeled = map
                    .iter()
                    .map(|(key, label)| {
                        let label = label
                            .as_str()
                            .ok_or_else(|| format!("label for '{}' must be a string", key))?;
                        Ok((Scalar::Str(key.clone()), label.to_string()))
                    })
                    .collect::<Result<Vec<_>, String>>()?;
                Ok(Declaration::Labeled(labeled))
            }
            other => Err(format!(
                "expected a sequence or a mapping of allowed values, found {}",
                json_kind(other)
            )),
        }
    }
}

fn required_scalar(value: &serde_json::Value) -> Result<Scalar, String> {
    Scalar::from_json(value)?.ok_or_else(|| "null is not an allowed value".to_string())
}

fn parse_pair(value: &serde_json::Value) -> Result<(Scalar, String), String> {
    match value.as_array().map(Vec::as_slice) {
        Some([scalar, label]) => {
            let label = label
                .as_str()
                .ok_or_else(|| "pair label must be a string".to_string())?;
            Ok((required_scalar(scalar)?, label.to_string()))
        }
        _ => Err("pairs must have exactly two elements: [value, label]".to_string()),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// One member of an allowed set and its declared label, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedValue {
    pub value: Symbol,
    pub label: Option<String>,
}

/// Ordered, duplicate-free set of canonical values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedValues {
    entries: Vec<AllowedValue>,
}

impl AllowedValues {
    /// Normalize a declaration. Strings and symbols become identifiers,
    /// booleans and integers pass through, order is preserved.
    pub fn build(declaration: &Declaration) -> Result<Self, String> {
        let raw: Vec<(Scalar, Option<String>)> = match declaration {
            Declaration::Values(values) => values.iter().map(|v| (v.clone(), None)).collect(),
            Declaration::Labeled(pairs) => pairs
                .iter()
                .map(|(v, label)| (v.clone(), Some(label.clone())))
                .collect(),
            Declaration::Range(range) => {
                if range.is_empty() {
                    return Err(format!(
                        "range {}..={} is empty",
                        range.start(),
                        range.end()
                    ));
                }
                let members = range
                    .end()
                    .checked_sub(*range.start())
                    .and_then(|span| u64::try_from(span).ok())
                    .and_then(|span| span.checked_add(1));
                match members {
                    Some(n) if n <= MAX_RANGE_MEMBERS => {}
                    _ => {
                        return Err(format!(
                            "range {}..={} has more than {} members",
                            range.start(),
                            range.end(),
                            MAX_RANGE_MEMBERS
                        ));
                    }
                }
                range.clone().map(|i| (Scalar::Int(i), None)).collect()
            }
        };

        if raw.is_empty() {
            return Err("allowed set is empty".to_string());
        }

        let mut entries: Vec<AllowedValue> = Vec::with_capacity(raw.len());
        for (scalar, label) in raw {
            if scalar.is_blank() {
                return Err("blank values cannot be allowed members".to_string());
            }
            let value = scalar.canonicalize();
            if entries.iter().any(|e| e.value == value) {
                return Err(format!("duplicate allowed value '{}'", value));
            }
            entries.push(AllowedValue { value, label });
        }

        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = &AllowedValue> {
        self.entries.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().map(|e| &e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &Symbol) -> bool {
        self.entries.iter().any(|e| &e.value == value)
    }

    /// The explicitly declared label for a member.
    pub fn label_source(&self, value: &Symbol) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.value == value)
            .and_then(|e| e.label.as_deref())
    }

    /// True when every member is a boolean.
    pub fn is_boolean(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e.value, Symbol::Bool(_)))
    }

    /// Find the member a raw value refers to.
    ///
    /// Exact typed matches win (booleans with booleans, integers with
    /// integers, strings and symbols with identifiers). Only when none
    /// exists is the string form compared, so `"7"` can still find `7`
    /// while a set holding both `1` and `"1"` resolves each to itself.
    pub fn find(&self, raw: &Scalar) -> Option<&Symbol> {
        self.values()
            .find(|member| exact_match(raw, member))
            .or_else(|| {
                let form = raw.string_form();
                self.values().find(|member| member.to_string() == form)
            })
    }
}

fn exact_match(raw: &Scalar, member: &Symbol) -> bool {
    match (raw, member) {
        (Scalar::Bool(a), Symbol::Bool(b)) => a == b,
        (Scalar::Int(a), Symbol::Int(b)) => a == b,
        (Scalar::Str(a), Symbol::Name(b)) | (Scalar::Sym(a), Symbol::Name(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_preserve_declaration_order() {
        let set = AllowedValues::build(&Declaration::values(["cocoa", "qt", "gtk"])).unwrap();
        let names: Vec<String> = set.values().map(|v| v.to_string()).collect();
        assert_eq!(names, vec!["cocoa", "qt", "gtk"]);
        assert!(set.iter().all(|e| e.label.is_none()));
    }

    #[test]
    fn labeled_keeps_labels() {
        let set = AllowedValues::build(&Declaration::labeled([
            ("linux", "Linux"),
            ("mac", "Mac OS X"),
        ]))
        .unwrap();
        assert_eq!(set.label_source(&Symbol::name("mac")), Some("Mac OS X"));
        assert_eq!(set.label_source(&Symbol::name("win")), None);
    }

    #[test]
    fn strings_and_symbols_normalize_to_identifiers() {
        let set = AllowedValues::build(&Declaration::Values(vec![
            Scalar::sym("pt"),
            Scalar::from("en"),
        ]))
        .unwrap();
        assert!(set.contains(&Symbol::name("pt")));
        assert!(set.contains(&Symbol::name("en")));
    }

    #[test]
    fn booleans_and_integers_pass_through() {
        let set = AllowedValues::build(&Declaration::values([true, false])).unwrap();
        assert!(set.is_boolean());
        let set = AllowedValues::build(&Declaration::range(1..=9)).unwrap();
        assert_eq!(set.len(), 9);
        assert!(set.contains(&Symbol::Int(9)));
        assert!(!set.is_boolean());
    }

    #[test]
    fn rejects_duplicates_and_blanks() {
        assert!(AllowedValues::build(&Declaration::values(["a", "a"])).is_err());
        assert!(AllowedValues::build(&Declaration::Values(vec![
            Scalar::sym("a"),
            Scalar::from("a")
        ]))
        .is_err());
        assert!(AllowedValues::build(&Declaration::values(["a", " "])).is_err());
    }

    #[test]
    fn rejects_empty_sets() {
        assert!(AllowedValues::build(&Declaration::Values(vec![])).is_err());
        #[allow(clippy::reversed_empty_ranges)]
        let empty = Declaration::range(9..=1);
        assert!(AllowedValues::build(&empty).is_err());
    }

    #[test]
    fn rejects_oversized_ranges() {
        let huge = AllowedValues::build(&Declaration::range(0..=i64::MAX)).unwrap_err();
        assert!(huge.contains("more than 10000 members"));
        assert!(AllowedValues::build(&Declaration::range(i64::MIN..=i64::MAX)).is_err());
        assert!(AllowedValues::build(&Declaration::range(1..=10_001)).is_err());

        let hundred = AllowedValues::build(&Declaration::range(1..=100)).unwrap();
        assert_eq!(hundred.len(), 100);
    }

    #[test]
    fn find_prefers_exact_type() {
        let set = AllowedValues::build(&Declaration::Values(vec![
            Scalar::from("1"),
            Scalar::Int(1),
        ]))
        .unwrap();
        assert_eq!(set.find(&Scalar::Int(1)), Some(&Symbol::Int(1)));
        assert_eq!(set.find(&Scalar::from("1")), Some(&Symbol::name("1")));
    }

    #[test]
    fn find_falls_back_to_string_form() {
        let set = AllowedValues::build(&Declaration::range(1..=9)).unwrap();
        assert_eq!(set.find(&Scalar::from("7")), Some(&Symbol::Int(7)));

        let set = AllowedValues::build(&Declaration::values([true, false])).unwrap();
        assert_eq!(set.find(&Scalar::from("false")), Some(&Symbol::Bool(false)));

        let set = AllowedValues::build(&Declaration::values(["active"])).unwrap();
        assert_eq!(set.find(&Scalar::from("43")), None);
    }

    #[test]
    fn declaration_from_json_shapes() {
        let decl = Declaration::from_json(&json!(["pt", "en"])).unwrap();
        assert_eq!(decl, Declaration::values(["pt", "en"]));

        let decl = Declaration::from_json(&json!({"linux": "Linux", "mac": "Mac OS X"})).unwrap();
        assert!(decl.is_labeled());
        let set = AllowedValues::build(&decl).unwrap();
        let names: Vec<String> = set.values().map(|v| v.to_string()).collect();
        assert_eq!(names, vec!["linux", "mac"]);

        let decl = Declaration::from_json(&json!([[1, "One"], [2, "Two"]])).unwrap();
        assert_eq!(decl, Declaration::labeled([(1, "One"), (2, "Two")]));
    }

    #[test]
    fn malformed_json_declarations_fail() {
        assert!(Declaration::from_json(&json!("active")).is_err());
        assert!(Declaration::from_json(&json!(42)).is_err());
        assert!(Declaration::from_json(&json!(["a", ["b", "B"]])).is_err());
        assert!(Declaration::from_json(&json!([null])).is_err());
        assert!(Declaration::from_json(&json!([[1, 2]])).is_err());
        assert!(Declaration::from_json(&json!({"a": 1})).is_err());
        assert!(Declaration::from_json(&json!([{"a": "b"}])).is_err());
    }
}
