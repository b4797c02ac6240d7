//! Sample models and fixtures shared by unit and integration tests.
//!
//! The models mirror a small user directory: `User` exercises every
//! declaration shape, `UserSkill` a multi-word model key and `Permission`
//! defaults and integer sets.

use crate::attributes::{Declaration, SymbolOptions};
use crate::i18n::Catalog;
use crate::model::{ModelBuilder, ModelSchema, Registry};
use crate::record::Record;
use crate::store::fs::FileStore;
use crate::store::memory::InMemoryStore;
use crate::value::Scalar;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub fn user_model() -> ModelSchema {
    ModelBuilder::new("User")
        .symbolize("other", SymbolOptions::new())
        .and_then(|m| {
            m.symbolize(
                "language",
                SymbolOptions::new().within(Declaration::values(["pt", "en"])),
            )
        })
        .and_then(|m| {
            m.symbolize(
                "sex",
                SymbolOptions::new()
                    .within(Declaration::values([true, false]))
                    .scopes(),
            )
        })
        .and_then(|m| {
            m.symbolize(
                "status",
                SymbolOptions::new()
                    .within(Declaration::values(["active", "inactive"]))
                    .i18n(false)
                    .capitalize()
                    .scopes()
                    .methods()
                    .default_value(Scalar::sym("active")),
            )
        })
        .and_then(|m| {
            m.symbolize(
                "so",
                SymbolOptions::new()
                    .within(Declaration::labeled([
                        ("linux", "Linux"),
                        ("mac", "Mac OS X"),
                        ("win", "Videogame"),
                    ]))
                    .allow_blank()
                    .scopes(),
            )
        })
        .and_then(|m| {
            m.symbolize(
                "gui",
                SymbolOptions::new()
                    .within(Declaration::values(["cocoa", "qt", "gtk"]))
                    .allow_blank()
                    .i18n(false),
            )
        })
        .and_then(|m| {
            m.symbolize(
                "karma",
                SymbolOptions::new()
                    .within(Declaration::values(["good", "bad", "ugly"]))
                    .methods()
                    .i18n(false)
                    .allow_nil(),
            )
        })
        .and_then(|m| {
            m.symbolize(
                "cool",
                SymbolOptions::new()
                    .within(Declaration::values([true, false]))
                    .scopes(),
            )
        })
        .and_then(ModelBuilder::build)
        .expect("sample User model is well formed")
}

pub fn user_skill_model() -> ModelSchema {
    ModelBuilder::new("UserSkill")
        .symbolize(
            "kind",
            SymbolOptions::new().within(Declaration::values(["agility", "magic"])),
        )
        .and_then(ModelBuilder::build)
        .expect("sample UserSkill model is well formed")
}

pub fn permission_model() -> ModelSchema {
    ModelBuilder::new("Permission")
        .symbolize(
            "kind",
            SymbolOptions::new()
                .within(Declaration::values(["temp", "perm"]))
                .default_value(Scalar::sym("perm")),
        )
        .and_then(|m| {
            m.symbolize(
                "lvl",
                SymbolOptions::new()
                    .within(Declaration::range(1..=9))
                    .i18n(false),
            )
        })
        .and_then(ModelBuilder::build)
        .expect("sample Permission model is well formed")
}

/// A registry holding every sample model.
pub fn sample_registry() -> Registry {
    let mut registry = Registry::new();
    for schema in [user_model(), user_skill_model(), permission_model()] {
        registry
            .insert(schema)
            .expect("sample models have distinct names");
    }
    registry
}

/// Portuguese labels for the sample models.
pub fn pt_catalog() -> Catalog {
    Catalog::new()
        .with("pt", "symbolizes.user.language.pt", "Português")
        .with("pt", "symbolizes.user.language.en", "Inglês")
        .with("pt", "symbolizes.user.sex.true", "Feminino")
        .with("pt", "symbolizes.user.sex.false", "Masculino")
        .with("pt", "symbolizes.user_skill.kind.magic", "Mágica")
        .with("pt", "symbolizes.user_skill.kind.agility", "Agilidade")
}

/// A user record assigned from `(attribute, value)` pairs.
pub fn user_with(schema: &Arc<ModelSchema>, pairs: &[(&str, Scalar)]) -> Record {
    let mut record = Record::new(Arc::clone(schema));
    for (attribute, value) in pairs {
        record.assign(attribute, Some(value.clone()));
    }
    record
}

/// "Anna": a valid user touching every declared attribute.
pub fn anna(schema: &Arc<ModelSchema>) -> Record {
    user_with(
        schema,
        &[
            ("name", Scalar::from("Anna")),
            ("other", Scalar::sym("fo")),
            ("status", Scalar::sym("active")),
            ("so", Scalar::sym("linux")),
            ("gui", Scalar::sym("qt")),
            ("language", Scalar::sym("pt")),
            ("sex", Scalar::from(true)),
            ("cool", Scalar::from(true)),
        ],
    )
}

/// "Mary": an inactive user on another operating system.
pub fn mary(schema: &Arc<ModelSchema>) -> Record {
    user_with(
        schema,
        &[
            ("name", Scalar::from("Mary")),
            ("other", Scalar::sym("fo")),
            ("status", Scalar::sym("inactive")),
            ("so", Scalar::sym("mac")),
            ("language", Scalar::sym("pt")),
            ("sex", Scalar::from(true)),
            ("cool", Scalar::from(true)),
        ],
    )
}

/// In-memory store with the sample models installed.
pub fn sample_store(registry: &Registry) -> InMemoryStore {
    let mut store = InMemoryStore::new();
    for schema in registry.models() {
        store.install(schema);
    }
    store
}

/// A file store in a temporary directory.
pub struct TestEnv {
    // Held so the directory outlives the test.
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::new(root.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    pub fn with_models(mut self, registry: &Registry) -> Self {
        for schema in registry.models() {
            self.store.install(schema);
        }
        self
    }
}
