use super::backend::{RecordBackend, StoredRecord};
use crate::error::{Result, SymbolizeError};
use std::fs;
use std::path::{Path, PathBuf};

/// JSON-file backend: one `<model>.json` array per model under `root`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn table_path(&self, model: &str) -> PathBuf {
        self.root.join(format!("{}.json", model))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(SymbolizeError::Io)?;
        }
        Ok(())
    }
}

impl RecordBackend for FsBackend {
    fn load(&self, model: &str) -> Result<Vec<StoredRecord>> {
        let path = self.table_path(model);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            SymbolizeError::Store(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    fn save(&self, model: &str, records: &[StoredRecord]) -> Result<()> {
        self.ensure_dir(&self.root)?;
        let path = self.table_path(model);
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(records)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;
    use uuid::Uuid;

    #[test]
    fn missing_table_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path());
        assert!(backend.load("user").unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FsBackend::new(dir.path().join("data"));
        let record = StoredRecord {
            id: Uuid::new_v4(),
            values: [
                ("status".to_string(), Scalar::from("active")),
                ("lvl".to_string(), Scalar::Int(7)),
            ]
            .into_iter()
            .collect(),
        };
        backend.save("user", &[record.clone()]).unwrap();
        assert!(dir.path().join("data").join("user.json").exists());
        assert_eq!(backend.load("user").unwrap(), vec![record]);
    }

    #[test]
    fn corrupt_table_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("user.json"), "{not json").unwrap();
        let backend = FsBackend::new(dir.path());
        assert!(matches!(
            backend.load("user"),
            Err(SymbolizeError::Store(_))
        ));
    }
}
