//! Reference record implementation.
//!
//! [`Record`] is a minimal host record: a bag of raw attribute values with
//! a snapshot of what was last persisted, used for dirty tracking. Declared
//! attributes are read and written through the coercion engine; undeclared
//! ones are stored as given.

use crate::attributes::{LabelContext, ValidationErrors};
use crate::error::{Result, SymbolizeError};
use crate::host::AttributeHost;
use crate::model::ModelSchema;
use crate::value::{Scalar, Symbol};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Record {
    id: Uuid,
    schema: Arc<ModelSchema>,
    values: BTreeMap<String, Scalar>,
    original: BTreeMap<String, Scalar>,
}

impl Record {
    /// A new record with every declared default applied.
    pub fn new(schema: Arc<ModelSchema>) -> Self {
        let values: BTreeMap<String, Scalar> = schema
            .attributes()
            .filter_map(|a| {
                a.default_value()
                    .map(|d| (a.name().to_string(), d.storage()))
            })
            .collect();
        Self {
            id: Uuid::new_v4(),
            schema,
            original: values.clone(),
            values,
        }
    }

    /// A record loaded from storage; its values are the clean snapshot.
    pub fn load(schema: Arc<ModelSchema>, id: Uuid, values: BTreeMap<String, Scalar>) -> Self {
        Self {
            id,
            schema,
            original: values.clone(),
            values,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn schema(&self) -> &Arc<ModelSchema> {
        &self.schema
    }

    /// The raw stored values.
    pub fn values(&self) -> &BTreeMap<String, Scalar> {
        &self.values
    }

    /// The stored value before coercion (`<attr>_before_type_cast`).
    pub fn raw(&self, attribute: &str) -> Option<&Scalar> {
        self.values.get(attribute)
    }

    /// Read an attribute. Declared attributes are decoded to their
    /// canonical value; others are canonicalized as stored.
    pub fn get(&self, attribute: &str) -> Option<Symbol> {
        match self.schema.attribute(attribute) {
            Some(attr) => attr.read(self),
            None => self
                .values
                .get(attribute)
                .filter(|v| !v.is_blank())
                .map(Scalar::canonicalize),
        }
    }

    /// Assign a value and return the attribute's canonical value.
    pub fn set(&mut self, attribute: &str, value: impl Into<Scalar>) -> Option<Symbol> {
        self.assign(attribute, Some(value.into()))
    }

    /// Assign nil.
    pub fn clear(&mut self, attribute: &str) {
        self.assign(attribute, None);
    }

    /// Assign an optional value; nil and blank clear the attribute.
    pub fn assign(&mut self, attribute: &str, value: Option<Scalar>) -> Option<Symbol> {
        let schema = Arc::clone(&self.schema);
        match schema.attribute(attribute) {
            Some(attr) => attr.write(self, value.as_ref()),
            None => {
                let result = value.as_ref().map(Scalar::canonicalize);
                self.write_raw(attribute, value);
                result
            }
        }
    }

    /// Whether the value differs from the persisted snapshot. Declared
    /// attributes compare canonical values, so `"7"` and `7` are the same.
    pub fn changed(&self, attribute: &str) -> bool {
        let current = self.values.get(attribute);
        let original = self.original.get(attribute);
        match self.schema.attribute(attribute) {
            Some(attr) => attr.decode(current) != attr.decode(original),
            None => current != original,
        }
    }

    /// Names of all changed attributes.
    pub fn changes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .values
            .keys()
            .chain(self.original.keys())
            .map(String::as_str)
            .filter(|name| self.changed(name))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes().is_empty()
    }

    /// `<attr>_text`: label of the current value.
    pub fn text(&self, attribute: &str, ctx: &LabelContext<'_>) -> Result<Option<String>> {
        let attr = self.schema.require(attribute)?;
        Ok(attr.text(attr.read(self).as_ref(), ctx))
    }

    /// Instance-level enumeration of `(label, value)` pairs.
    pub fn options(&self, attribute: &str, ctx: &LabelContext<'_>) -> Result<Vec<(String, Symbol)>> {
        Ok(self.schema.require(attribute)?.options(ctx))
    }

    /// Evaluate a generated predicate such as `active` or `not_cool`.
    pub fn is(&self, predicate: &str) -> Result<bool> {
        let predicate = self.schema.predicate(predicate).ok_or_else(|| {
            SymbolizeError::UnknownPredicate {
                model: self.schema.name().to_string(),
                predicate: predicate.to_string(),
            }
        })?;
        Ok(predicate.test(self))
    }

    /// Run every attribute validator of the schema.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for validator in self.schema.validators() {
            if let Err(error) = validator.validate(self) {
                errors.add(error);
            }
        }
        errors.into_result()
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Accept the current values as persisted.
    pub(crate) fn mark_persisted(&mut self) {
        self.original = self.values.clone();
    }
}

impl AttributeHost for Record {
    fn read_raw(&self, attribute: &str) -> Option<Scalar> {
        self.values.get(attribute).cloned()
    }

    fn write_raw(&mut self, attribute: &str, value: Option<Scalar>) {
        match value {
            Some(v) => {
                self.values.insert(attribute.to_string(), v);
            }
            None => {
                self.values.remove(attribute);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{Declaration, SymbolOptions};
    use crate::model::ModelBuilder;

    fn schema() -> Arc<ModelSchema> {
        Arc::new(
            ModelBuilder::new("Profile")
                .symbolize(
                    "language",
                    SymbolOptions::new().within(Declaration::values(["pt", "en"])),
                )
                .unwrap()
                .symbolize(
                    "kind",
                    SymbolOptions::new()
                        .within(Declaration::values(["temp", "perm"]))
                        .default_value(Scalar::sym("perm")),
                )
                .unwrap()
                .symbolize(
                    "karma",
                    SymbolOptions::new()
                        .within(Declaration::values(["good", "bad", "ugly"]))
                        .methods()
                        .allow_nil(),
                )
                .unwrap()
                .symbolize(
                    "lvl",
                    SymbolOptions::new().within(Declaration::Range(1..=9)),
                )
                .unwrap()
                .build()
                .unwrap(),
        )
    }

    fn persisted(pairs: &[(&str, Scalar)]) -> Record {
        let values = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Record::load(schema(), Uuid::new_v4(), values)
    }

    #[test]
    fn defaults_apply_on_new() {
        let record = Record::new(schema());
        assert_eq!(record.get("kind"), Some(Symbol::name("perm")));
        assert_eq!(record.get("language"), None);
        assert!(!record.is_dirty());
    }

    #[test]
    fn string_assignment_reads_canonical() {
        let mut record = Record::new(schema());
        assert_eq!(record.set("language", "en"), Some(Symbol::name("en")));
        assert_eq!(record.get("language"), Some(Symbol::name("en")));
        assert_eq!(record.raw("language"), Some(&Scalar::from("en")));
    }

    #[test]
    fn same_value_is_not_dirty() {
        let mut record = persisted(&[("language", Scalar::from("pt"))]);
        assert!(!record.changed("language"));

        assert_eq!(record.set("language", Scalar::sym("pt")), Some(Symbol::name("pt")));
        assert!(!record.changed("language"));

        assert_eq!(record.set("language", Scalar::sym("en")), Some(Symbol::name("en")));
        assert!(record.changed("language"));
        assert_eq!(record.get("language"), Some(Symbol::name("en")));
        assert_eq!(record.changes(), vec!["language"]);
    }

    #[test]
    fn setting_back_to_original_is_clean() {
        let mut record = persisted(&[("language", Scalar::from("pt"))]);
        record.set("language", "en");
        record.set("language", "pt");
        assert!(!record.is_dirty());
    }

    #[test]
    fn legacy_storage_form_compares_canonically() {
        let mut record = persisted(&[("lvl", Scalar::from("7"))]);
        assert!(!record.is_dirty());

        record.set("lvl", 8);
        assert!(record.changed("lvl"));

        record.set("lvl", 7);
        assert_eq!(record.get("lvl"), Some(Symbol::Int(7)));
        assert_eq!(record.raw("lvl"), Some(&Scalar::Int(7)));
        assert!(!record.changed("lvl"));
        assert!(!record.is_dirty());
        assert!(record.changes().is_empty());
    }

    #[test]
    fn nil_and_blank_clear() {
        let mut record = persisted(&[("language", Scalar::from("pt"))]);
        assert_eq!(record.set("language", ""), None);
        assert_eq!(record.raw("language"), None);
        record.set("language", "pt");
        record.clear("language");
        assert_eq!(record.get("language"), None);
    }

    #[test]
    fn predicates_follow_value() {
        let mut record = Record::new(schema());
        assert!(!record.is("good").unwrap());
        record.set("karma", Scalar::sym("ugly"));
        assert!(record.is("ugly").unwrap());
        record.set("karma", "good");
        assert!(record.is("good").unwrap());
        assert!(!record.is("bad").unwrap());
        assert!(matches!(
            record.is("nonexistent"),
            Err(SymbolizeError::UnknownPredicate { predicate, .. }) if predicate == "nonexistent"
        ));
    }

    #[test]
    fn validation_reports_one_error_per_attribute() {
        let mut record = Record::new(schema());
        record.set("language", "pt");
        assert!(record.is_valid());

        record.clear("language");
        let errors = record.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.on("language").is_some());

        record.set("language", 43);
        assert_eq!(record.get("language"), Some(Symbol::Int(43)));
        assert_eq!(record.validate().unwrap_err().len(), 1);
    }

    #[test]
    fn undeclared_attributes_are_stored_as_given() {
        let mut record = Record::new(schema());
        record.set("name", "Anna");
        assert_eq!(record.raw("name"), Some(&Scalar::from("Anna")));
        assert_eq!(record.get("name"), Some(Symbol::name("Anna")));
        assert!(record.text("name", &LabelContext::plain()).is_err());
    }

    #[test]
    fn mark_persisted_resets_changes() {
        let mut record = Record::new(schema());
        record.set("language", "pt");
        assert!(record.is_dirty());
        record.mark_persisted();
        assert!(!record.is_dirty());
    }
}
