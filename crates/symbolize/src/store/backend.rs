use crate::error::Result;
use crate::value::Scalar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A record as persisted: its id and raw attribute values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,
    #[serde(default)]
    pub values: BTreeMap<String, Scalar>,
}

/// Abstract interface for raw record I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (validation, scopes, queries).
pub trait RecordBackend {
    /// Load every record of a model, keyed by the model's snake_case key.
    fn load(&self, model: &str) -> Result<Vec<StoredRecord>>;

    /// Replace every record of a model.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save(&self, model: &str, records: &[StoredRecord]) -> Result<()>;
}
