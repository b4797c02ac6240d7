//! Localization lookup.
//!
//! The engine only needs [`Translator::translate`]. [`Catalog`] is a small
//! in-memory implementation loaded from nested TOML or JSON documents whose
//! first level is the locale:
//!
//! ```toml
//! [pt.symbolizes.user.language]
//! pt = "Português"
//! en = "Inglês"
//! ```
//!
//! Nested tables are flattened into dotted keys, so the entry above is found
//! under `symbolizes.user.language.pt` for locale `pt`.

use crate::error::{Result, SymbolizeError};
use std::collections::HashMap;
use std::path::Path;

/// Synchronous, side-effect-free key lookup. `None` means the key is missing.
pub trait Translator {
    fn translate(&self, key: &str, locale: &str) -> Option<String>;
}

/// A translator that knows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTranslations;

impl Translator for NoTranslations {
    fn translate(&self, _key: &str, _locale: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Default, Clone)]
pub struct Catalog {
    locales: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.locales
            .entry(locale.into())
            .or_default()
            .insert(key.into(), text.into());
    }

    pub fn with(mut self, locale: &str, key: &str, text: &str) -> Self {
        self.insert(locale, key, text);
        self
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locales.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = toml::from_str(text)?;
        Self::from_value(&value)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Load a catalog file; `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_toml_str(&text),
        }
    }

    /// Merge `other` into this catalog; entries in `other` win.
    pub fn merge(&mut self, other: Catalog) {
        for (locale, entries) in other.locales {
            self.locales.entry(locale).or_default().extend(entries);
        }
    }

    fn from_value(value: &serde_json::Value) -> Result<Self> {
        let root = value.as_object().ok_or_else(|| {
            SymbolizeError::Config("translations must be a table keyed by locale".to_string())
        })?;
        let mut catalog = Catalog::new();
        for (locale, tree) in root {
            let mut entries = HashMap::new();
            flatten(tree, String::new(), &mut entries)
                .map_err(|e| SymbolizeError::Config(format!("locale {}: {}", locale, e)))?;
            catalog.locales.insert(locale.clone(), entries);
        }
        Ok(catalog)
    }
}

fn flatten(
    value: &serde_json::Value,
    prefix: String,
    out: &mut HashMap<String, String>,
) -> std::result::Result<(), String> {
    use serde_json::Value;
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(child, path, out)?;
            }
            Ok(())
        }
        Value::String(s) => {
            out.insert(prefix, s.clone());
            Ok(())
        }
        Value::Bool(_) | Value::Number(_) => {
            out.insert(prefix, value.to_string());
            Ok(())
        }
        Value::Null | Value::Array(_) => Err(format!("unsupported entry at '{}'", prefix)),
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, locale: &str) -> Option<String> {
        self.locales.get(locale)?.get(key).cloned()
    }
}
