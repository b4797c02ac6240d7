//! # Model Schemas and the Registry
//!
//! A [`ModelSchema`] holds every symbolic attribute declared on one model
//! type, plus the accessor, predicate and scope tables derived from them.
//! It is built once through [`ModelBuilder`] and is read-only afterwards.
//!
//! ```ignore
//! let user = ModelBuilder::new("User")
//!     .symbolize("status", SymbolOptions::new()
//!         .within(Declaration::values(["active", "inactive"]))
//!         .scopes())?
//!     .symbolize("other", SymbolOptions::new())?
//!     .register()?;
//! ```
//!
//! ## Registry
//!
//! Schemas live in a [`Registry`] keyed by model name. The process-wide
//! registry ([`register`], [`lookup`]) is written only during model
//! initialization: registering a name twice is an error, and nothing is ever
//! removed. After start-up it is only read, so concurrent readers never
//! contend for the write lock.

use crate::attributes::{Accessors, Predicate, Scope, SymbolAttribute, SymbolOptions, Validator};
use crate::config::SymbolizeConfig;
use crate::error::{Result, SymbolizeError};
use crate::host::ModelHost;
use crate::value::snake_case;
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

/// Declares the symbolic attributes of one model type.
#[derive(Debug)]
pub struct ModelBuilder {
    name: String,
    key: String,
    i18n_scope: String,
    attributes: Vec<SymbolAttribute>,
}

impl ModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = snake_case(&name);
        Self {
            name,
            key,
            i18n_scope: SymbolizeConfig::default().i18n_scope,
            attributes: Vec::new(),
        }
    }

    /// Use the localization prefix from a loaded configuration.
    pub fn with_config(mut self, config: &SymbolizeConfig) -> Self {
        self.i18n_scope = config.i18n_scope.clone();
        self
    }

    pub fn i18n_scope(mut self, scope: impl Into<String>) -> Self {
        self.i18n_scope = scope.into();
        self
    }

    /// Declare a symbolic attribute. Fails immediately on malformed options
    /// or a repeated attribute name.
    pub fn symbolize(mut self, attribute: &str, options: SymbolOptions) -> Result<Self> {
        if self.attributes.iter().any(|a| a.name() == attribute) {
            return Err(SymbolizeError::declaration(
                &self.name,
                attribute,
                "attribute declared twice",
            ));
        }
        let i18n_key = if self.i18n_scope.is_empty() {
            self.key.clone()
        } else {
            format!("{}.{}", self.i18n_scope, self.key)
        };
        let declared = SymbolAttribute::declare(&self.name, &i18n_key, attribute, options)?;
        self.attributes.push(declared);
        Ok(self)
    }

    /// Freeze the declarations and derive accessor, predicate and scope tables.
    pub fn build(self) -> Result<ModelSchema> {
        let mut attributes = Vec::with_capacity(self.attributes.len());
        let mut accessors = HashMap::new();
        let mut predicates: BTreeMap<String, Predicate> = BTreeMap::new();
        let mut scopes: Vec<Scope> = Vec::new();

        for attribute in self.attributes {
            let attribute = Arc::new(attribute);
            let table = Accessors::build(&attribute);

            for predicate in &table.predicates {
                if let Some(existing) = predicates.get(&predicate.name) {
                    return Err(SymbolizeError::declaration(
                        &self.name,
                        attribute.name(),
                        format!(
                            "predicate '{}' already defined by '{}'",
                            predicate.name,
                            existing.attribute()
                        ),
                    ));
                }
                predicates.insert(predicate.name.clone(), predicate.clone());
            }
            for scope in &table.scopes {
                if let Some(existing) = scopes.iter().find(|s| s.name == scope.name) {
                    return Err(SymbolizeError::declaration(
                        &self.name,
                        attribute.name(),
                        format!(
                            "scope '{}' already defined by '{}'",
                            scope.name, existing.filter.attribute
                        ),
                    ));
                }
                scopes.push(scope.clone());
            }

            accessors.insert(attribute.name().to_string(), table);
            attributes.push(attribute);
        }

        Ok(ModelSchema {
            name: self.name,
            key: self.key,
            attributes,
            accessors,
            predicates,
            scopes,
        })
    }

    /// Build and add to the process-wide registry.
    pub fn register(self) -> Result<Arc<ModelSchema>> {
        register(self.build()?)
    }
}

/// The symbolic attributes of one model type and everything derived from them.
#[derive(Debug)]
pub struct ModelSchema {
    name: String,
    key: String,
    attributes: Vec<Arc<SymbolAttribute>>,
    accessors: HashMap<String, Accessors>,
    predicates: BTreeMap<String, Predicate>,
    scopes: Vec<Scope>,
}

impl ModelSchema {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// snake_case model key, used for localization and storage.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Declared attributes in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = &Arc<SymbolAttribute>> {
        self.attributes.iter()
    }

    pub fn attribute(&self, name: &str) -> Option<&Arc<SymbolAttribute>> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn require(&self, name: &str) -> Result<&Arc<SymbolAttribute>> {
        self.attribute(name)
            .ok_or_else(|| SymbolizeError::UnknownAttribute {
                model: self.name.clone(),
                attribute: name.to_string(),
            })
    }

    /// The accessor table of an attribute.
    pub fn accessors(&self, attribute: &str) -> Option<&Accessors> {
        self.accessors.get(attribute)
    }

    /// A boolean predicate by name, across all attributes.
    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.values()
    }

    /// A generated scope by name, across all attributes.
    pub fn scope(&self, name: &str) -> Option<&Scope> {
        self.scopes.iter().find(|s| s.name == name)
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// One validator per attribute that has an allowed set.
    pub fn validators(&self) -> Vec<Validator> {
        self.attributes
            .iter()
            .filter(|a| a.validates())
            .map(|a| Validator::new(Arc::clone(a)))
            .collect()
    }

    /// Register validators and scopes with a host framework.
    pub fn install(&self, host: &mut dyn ModelHost) {
        for validator in self.validators() {
            host.register_validator(&self.name, validator);
        }
        for scope in &self.scopes {
            host.register_predicate(&self.name, scope.clone());
        }
        tracing::debug!(
            model = %self.name,
            scopes = self.scopes.len(),
            "installed model into host"
        );
    }
}

/// Model schemas keyed by model name.
#[derive(Debug, Default)]
pub struct Registry {
    models: BTreeMap<String, Arc<ModelSchema>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, schema: ModelSchema) -> Result<Arc<ModelSchema>> {
        if self.models.contains_key(schema.name()) {
            return Err(SymbolizeError::Declaration(format!(
                "model {} is already registered",
                schema.name()
            )));
        }
        let schema = Arc::new(schema);
        self.models
            .insert(schema.name().to_string(), Arc::clone(&schema));
        tracing::debug!(model = %schema.name(), "registered model");
        Ok(schema)
    }

    pub fn get(&self, name: &str) -> Option<Arc<ModelSchema>> {
        self.models.get(name).cloned()
    }

    pub fn require(&self, name: &str) -> Result<Arc<ModelSchema>> {
        self.get(name)
            .ok_or_else(|| SymbolizeError::UnknownModel(name.to_string()))
    }

    pub fn models(&self) -> impl Iterator<Item = &Arc<ModelSchema>> {
        self.models.values()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

static GLOBAL: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

/// Add a schema to the process-wide registry. Call during initialization only.
pub fn register(schema: ModelSchema) -> Result<Arc<ModelSchema>> {
    let mut registry = GLOBAL
        .write()
        .map_err(|_| SymbolizeError::Store("model registry lock poisoned".to_string()))?;
    registry.insert(schema)
}

/// Look up a schema in the process-wide registry.
pub fn lookup(name: &str) -> Option<Arc<ModelSchema>> {
    GLOBAL.read().ok()?.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Declaration;

    fn user() -> ModelBuilder {
        ModelBuilder::new("RegistryUser")
            .symbolize(
                "status",
                SymbolOptions::new()
                    .within(Declaration::values(["active", "inactive"]))
                    .scopes()
                    .methods(),
            )
            .unwrap()
            .symbolize(
                "so",
                SymbolOptions::new()
                    .within(Declaration::labeled([("linux", "Linux"), ("mac", "Mac OS X")]))
                    .allow_blank()
                    .scopes(),
            )
            .unwrap()
            .symbolize("other", SymbolOptions::new())
            .unwrap()
    }

    #[test]
    fn schema_keeps_declaration_order() {
        let schema = user().build().unwrap();
        let names: Vec<&str> = schema.attributes().map(|a| a.name()).collect();
        assert_eq!(names, vec!["status", "so", "other"]);
        assert_eq!(schema.key(), "registry_user");
    }

    #[test]
    fn localization_key_uses_model_key() {
        let schema = ModelBuilder::new("UserSkill")
            .symbolize(
                "kind",
                SymbolOptions::new().within(Declaration::values(["magic"])),
            )
            .unwrap()
            .build()
            .unwrap();
        let kind = schema.require("kind").unwrap();
        assert_eq!(
            kind.translation_key(&crate::value::Symbol::name("magic")),
            "symbolizes.user_skill.kind.magic"
        );
    }

    #[test]
    fn lookup_tables() {
        let schema = user().build().unwrap();
        assert!(schema.scope("linux").is_some());
        assert!(schema.scope("inactive").is_some());
        assert!(schema.predicate("active").is_some());
        assert!(schema.predicate("linux").is_none());
        assert_eq!(schema.accessors("so").unwrap().scopes.len(), 2);
        assert_eq!(schema.validators().len(), 2);
        assert!(schema.require("missing").is_err());
    }

    #[test]
    fn duplicate_attribute_fails() {
        let err = user().symbolize("status", SymbolOptions::new()).unwrap_err();
        assert!(err.to_string().contains("declared twice"));
    }

    #[test]
    fn scope_collisions_fail_at_build() {
        let err = ModelBuilder::new("Clash")
            .symbolize(
                "a",
                SymbolOptions::new()
                    .within(Declaration::values(["open"]))
                    .scopes(),
            )
            .unwrap()
            .symbolize(
                "b",
                SymbolOptions::new()
                    .within(Declaration::values(["open"]))
                    .scopes(),
            )
            .unwrap()
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("scope 'open'"));
    }

    #[test]
    fn registry_rejects_duplicates() {
        let mut registry = Registry::new();
        registry.insert(user().build().unwrap()).unwrap();
        assert!(registry.insert(user().build().unwrap()).is_err());
        assert_eq!(registry.len(), 1);
        assert!(registry.require("RegistryUser").is_ok());
        assert!(registry.require("Nobody").is_err());
    }

    #[test]
    fn global_registry_is_init_only() {
        let schema = ModelBuilder::new("GlobalRegistryProbe")
            .symbolize("other", SymbolOptions::new())
            .unwrap()
            .register()
            .unwrap();
        assert_eq!(schema.name(), "GlobalRegistryProbe");
        assert!(lookup("GlobalRegistryProbe").is_some());
        assert!(ModelBuilder::new("GlobalRegistryProbe").register().is_err());
    }

    struct Collect {
        validators: Vec<String>,
        scopes: Vec<String>,
    }

    impl ModelHost for Collect {
        fn register_validator(&mut self, _model: &str, validator: Validator) {
            self.validators.push(validator.attribute().to_string());
        }

        fn register_predicate(&mut self, _model: &str, scope: Scope) {
            self.scopes.push(scope.name);
        }
    }

    #[test]
    fn install_registers_with_host() {
        let schema = user().build().unwrap();
        let mut host = Collect {
            validators: vec![],
            scopes: vec![],
        };
        schema.install(&mut host);
        assert_eq!(host.validators, vec!["status", "so"]);
        assert_eq!(host.scopes, vec!["active", "inactive", "linux", "mac"]);
    }
}
