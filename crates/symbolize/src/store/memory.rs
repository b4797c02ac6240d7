use super::mem_backend::MemBackend;
use super::record_store::RecordStore;

pub type InMemoryStore = RecordStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        RecordStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::ModelSchema;
    use crate::record::Record;
    use crate::test_utils::{anna, mary, user_model, user_with};
    use crate::value::Scalar;
    use std::sync::Arc;

    /// An in-memory store with the sample `User` model installed.
    pub struct StoreFixture {
        pub store: InMemoryStore,
        pub users: Arc<ModelSchema>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            let users = Arc::new(user_model());
            let mut store = InMemoryStore::new();
            store.install(&users);
            Self { store, users }
        }

        pub fn with_anna(mut self) -> Self {
            let mut record = anna(&self.users);
            self.store.save(&mut record).unwrap();
            self
        }

        pub fn with_mary(mut self) -> Self {
            let mut record = mary(&self.users);
            self.store.save(&mut record).unwrap();
            self
        }

        pub fn with_user(mut self, pairs: &[(&str, Scalar)]) -> Self {
            let mut record = user_with(&self.users, pairs);
            self.store.save(&mut record).unwrap();
            self
        }

        pub fn names(records: &[Record]) -> Vec<String> {
            records
                .iter()
                .filter_map(|r| r.get("name").map(|n| n.to_string()))
                .collect()
        }
    }
}
