use super::backend::{RecordBackend, StoredRecord};
use crate::attributes::{Query, Scope, ValidationErrors, Validator};
use crate::error::{Result, SymbolizeError};
use crate::host::ModelHost;
use crate::model::ModelSchema;
use crate::record::Record;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A small host framework over a [`RecordBackend`].
///
/// Models are installed once; the store keeps the validators and scopes
/// they register and uses them on save and on scoped reads.
pub struct RecordStore<B: RecordBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    validators: HashMap<String, Vec<Validator>>,
    scopes: HashMap<String, Vec<Scope>>,
}

impl<B: RecordBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            validators: HashMap::new(),
            scopes: HashMap::new(),
        }
    }

    /// Register a model's validators and scopes with this store.
    /// Installing the same model again is a no-op.
    pub fn install(&mut self, schema: &ModelSchema) {
        if self.is_installed(schema.name()) {
            return;
        }
        self.validators.entry(schema.name().to_string()).or_default();
        self.scopes.entry(schema.name().to_string()).or_default();
        schema.install(self);
    }

    pub fn is_installed(&self, model: &str) -> bool {
        self.validators.contains_key(model)
    }

    /// Validate with the registered validators, then persist.
    pub fn save(&mut self, record: &mut Record) -> Result<()> {
        let schema = Arc::clone(record.schema());
        let validators = self
            .validators
            .get(schema.name())
            .ok_or_else(|| SymbolizeError::UnknownModel(schema.name().to_string()))?;

        let mut errors = ValidationErrors::new();
        for validator in validators {
            if let Err(error) = validator.validate(&*record) {
                errors.add(error);
            }
        }
        if !errors.is_empty() {
            return Err(SymbolizeError::Invalid(errors));
        }

        let mut rows = self.backend.load(schema.key())?;
        let row = StoredRecord {
            id: record.id(),
            values: record.values().clone(),
        };
        match rows.iter_mut().find(|r| r.id == row.id) {
            Some(existing) => *existing = row,
            None => rows.push(row),
        }
        self.backend.save(schema.key(), &rows)?;
        record.mark_persisted();

        tracing::debug!(model = %schema.name(), id = %record.id(), "saved record");
        Ok(())
    }

    pub fn find(&self, schema: &Arc<ModelSchema>, id: &Uuid) -> Result<Record> {
        self.backend
            .load(schema.key())?
            .into_iter()
            .find(|r| &r.id == id)
            .map(|r| Record::load(Arc::clone(schema), r.id, r.values))
            .ok_or(SymbolizeError::RecordNotFound(*id))
    }

    /// Every record of a model, in insertion order.
    pub fn all(&self, schema: &Arc<ModelSchema>) -> Result<Vec<Record>> {
        Ok(self
            .backend
            .load(schema.key())?
            .into_iter()
            .map(|r| Record::load(Arc::clone(schema), r.id, r.values))
            .collect())
    }

    /// Records matching a registered scope.
    pub fn scope(&self, schema: &Arc<ModelSchema>, name: &str) -> Result<Vec<Record>> {
        let scope = self
            .scopes
            .get(schema.name())
            .and_then(|scopes| scopes.iter().find(|s| s.name == name))
            .ok_or_else(|| SymbolizeError::UnknownScope {
                model: schema.name().to_string(),
                scope: name.to_string(),
            })?;
        self.query(schema, &Query::new().and_scope(scope))
    }

    /// Records matching every filter of a query.
    pub fn query(&self, schema: &Arc<ModelSchema>, query: &Query) -> Result<Vec<Record>> {
        Ok(self
            .all(schema)?
            .into_iter()
            .filter(|record| query.matches(record))
            .collect())
    }

    pub fn delete(&mut self, schema: &Arc<ModelSchema>, id: &Uuid) -> Result<()> {
        let mut rows = self.backend.load(schema.key())?;
        let before = rows.len();
        rows.retain(|r| &r.id != id);
        if rows.len() == before {
            return Err(SymbolizeError::RecordNotFound(*id));
        }
        self.backend.save(schema.key(), &rows)
    }
}

impl<B: RecordBackend> ModelHost for RecordStore<B> {
    fn register_validator(&mut self, model: &str, validator: Validator) {
        self.validators
            .entry(model.to_string())
            .or_default()
            .push(validator);
    }

    fn register_predicate(&mut self, model: &str, scope: Scope) {
        self.scopes.entry(model.to_string()).or_default().push(scope);
    }
}
