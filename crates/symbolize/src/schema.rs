//! # Declarations from Files
//!
//! Models can be declared in TOML instead of code. Each attribute table takes
//! the same options as [`SymbolOptions`]:
//!
//! ```toml
//! [models.User.attributes.status]
//! in = ["active", "inactive"]
//! i18n = false
//! capitalize = true
//! scopes = true
//! methods = true
//!
//! [models.User.attributes.so]
//! in = { linux = "Linux", mac = "Mac OS X" }
//! allow_blank = true
//!
//! [models.Permission.attributes.lvl]
//! range = [1, 9]
//! ```
//!
//! `in` accepts a list of values, a list of `[value, label]` pairs or a
//! table of labels. Models and attributes keep their file order. Every
//! malformed entry fails the whole load, naming the model and attribute.

use crate::attributes::{Declaration, SymbolOptions};
use crate::config::SymbolizeConfig;
use crate::error::{Result, SymbolizeError};
use crate::model::{ModelBuilder, Registry};
use crate::value::Scalar;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaFile {
    #[serde(default)]
    models: toml::Table,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ModelDecl {
    #[serde(default)]
    attributes: toml::Table,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AttributeDecl {
    #[serde(rename = "in")]
    within: Option<toml::Value>,
    range: Option<[i64; 2]>,
    #[serde(default)]
    scopes: bool,
    #[serde(default)]
    methods: bool,
    i18n: Option<bool>,
    #[serde(default)]
    capitalize: bool,
    #[serde(default)]
    allow_nil: bool,
    #[serde(default)]
    allow_blank: bool,
    default: Option<toml::Value>,
}

impl AttributeDecl {
    fn into_options(self) -> std::result::Result<SymbolOptions, String> {
        let mut options = SymbolOptions::new();

        match (self.within, self.range) {
            (Some(_), Some(_)) => return Err("use either `in` or `range`, not both".to_string()),
            (Some(within), None) => {
                options = options.within(Declaration::from_json(&to_json(&within)?)?);
            }
            (None, Some([start, end])) => {
                options = options.within(Declaration::range(start..=end));
            }
            (None, None) => {}
        }

        if self.scopes {
            options = options.scopes();
        }
        if self.methods {
            options = options.methods();
        }
        if let Some(enabled) = self.i18n {
            options = options.i18n(enabled);
        }
        if self.capitalize {
            options = options.capitalize();
        }
        if self.allow_nil {
            options = options.allow_nil();
        }
        if self.allow_blank {
            options = options.allow_blank();
        }
        if let Some(default) = self.default {
            if let Some(value) = Scalar::from_json(&to_json(&default)?)? {
                options = options.default_value(value);
            }
        }
        Ok(options)
    }
}

fn to_json(value: &toml::Value) -> std::result::Result<serde_json::Value, String> {
    serde_json::to_value(value).map_err(|e| e.to_string())
}

/// Parse a schema document into a registry of model schemas.
pub fn load_schema_str(text: &str, config: &SymbolizeConfig) -> Result<Registry> {
    let file: SchemaFile = toml::from_str(text)?;
    let mut registry = Registry::new();

    for (model, decl) in file.models {
        let decl: ModelDecl = decl
            .try_into()
            .map_err(|e: toml::de::Error| SymbolizeError::Declaration(format!("{}: {}", model, e)))?;

        let mut builder = ModelBuilder::new(model.as_str()).with_config(config);
        for (attribute, attr_decl) in decl.attributes {
            let options = attr_decl
                .try_into::<AttributeDecl>()
                .map_err(|e| e.to_string())
                .and_then(AttributeDecl::into_options)
                .map_err(|reason| SymbolizeError::declaration(&model, &attribute, reason))?;
            builder = builder.symbolize(&attribute, options)?;
        }
        registry.insert(builder.build()?)?;
    }

    tracing::debug!(models = registry.len(), "loaded schema");
    Ok(registry)
}

/// Read and parse a schema file.
pub fn load_schema_file(path: &Path, config: &SymbolizeConfig) -> Result<Registry> {
    let text = std::fs::read_to_string(path)?;
    load_schema_str(&text, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Symbol;

    const USERS: &str = r#"
[models.User.attributes.other]

[models.User.attributes.status]
in = ["active", "inactive"]
i18n = false
capitalize = true
scopes = true
methods = true

[models.User.attributes.so]
in = { linux = "Linux", mac = "Mac OS X", win = "Videogame" }
allow_blank = true
scopes = true

[models.User.attributes.sex]
in = [true, false]

[models.Permission.attributes.kind]
in = ["temp", "perm"]
default = "perm"

[models.Permission.attributes.lvl]
range = [1, 9]
i18n = false
"#;

    fn load(text: &str) -> Result<Registry> {
        load_schema_str(text, &SymbolizeConfig::default())
    }

    #[test]
    fn test_loads_models_in_order() {
        let registry = load(USERS).unwrap();
        assert_eq!(registry.len(), 2);

        let user = registry.require("User").unwrap();
        let names: Vec<&str> = user.attributes().map(|a| a.name()).collect();
        assert_eq!(names, vec!["other", "status", "so", "sex"]);
        assert!(user.require("other").unwrap().allowed().is_none());
    }

    #[test]
    fn test_options_carry_over() {
        let registry = load(USERS).unwrap();
        let user = registry.require("User").unwrap();

        let status = user.require("status").unwrap();
        assert!(!status.uses_i18n());
        assert!(status.capitalizes());
        assert!(user.predicate("inactive").is_some());
        assert!(user.scope("inactive").is_some());

        let so = user.require("so").unwrap();
        assert!(!so.uses_i18n());
        assert!(so.allows_blank());
        assert_eq!(so.base_label(&Symbol::name("mac")), "Mac OS X");

        assert!(user.require("sex").unwrap().is_boolean());
    }

    #[test]
    fn test_defaults_and_ranges() {
        let registry = load(USERS).unwrap();
        let permission = registry.require("Permission").unwrap();
        assert_eq!(
            permission.require("kind").unwrap().default_value(),
            Some(&Symbol::name("perm"))
        );
        let lvl = permission.require("lvl").unwrap();
        assert_eq!(lvl.allowed().unwrap().len(), 9);
        assert!(lvl.allowed().unwrap().contains(&Symbol::Int(9)));
    }

    #[test]
    fn test_model_scope_follows_config() {
        let config = SymbolizeConfig {
            i18n_scope: "activerecord.symbolizes".to_string(),
            ..Default::default()
        };
        let registry = load_schema_str(USERS, &config).unwrap();
        let sex = registry.require("User").unwrap().require("sex").unwrap().clone();
        assert_eq!(
            sex.translation_key(&Symbol::Bool(true)),
            "activerecord.symbolizes.user.sex.true"
        );
    }

    #[test]
    fn test_malformed_in_names_attribute() {
        let err = load("[models.User.attributes.status]\nin = 42\n").unwrap_err();
        assert!(err.to_string().contains("User.status"), "{}", err);

        let err = load("[models.User.attributes.status]\nin = []\n").unwrap_err();
        assert!(err.to_string().contains("User.status"), "{}", err);
    }

    #[test]
    fn test_unknown_option_fails() {
        let err = load("[models.User.attributes.status]\nin = [\"a\"]\nscope = true\n").unwrap_err();
        assert!(err.to_string().contains("User.status"), "{}", err);
    }

    #[test]
    fn test_oversized_range_is_a_declaration_error() {
        let err = load("[models.P.attributes.lvl]\nrange = [0, 9223372036854775807]\n").unwrap_err();
        assert!(matches!(err, SymbolizeError::Declaration(_)));
        assert!(err.to_string().contains("P.lvl"));
    }

    #[test]
    fn test_in_and_range_conflict() {
        let err = load("[models.P.attributes.lvl]\nin = [1]\nrange = [1, 2]\n").unwrap_err();
        assert!(err.to_string().contains("either"), "{}", err);
    }

    #[test]
    fn test_default_outside_set_fails() {
        let err = load("[models.P.attributes.kind]\nin = [\"temp\"]\ndefault = \"perm\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("P.kind"), "{}", err);
    }

    #[test]
    fn test_load_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.toml");
        std::fs::write(&path, USERS).unwrap();
        let registry = load_schema_file(&path, &SymbolizeConfig::default()).unwrap();
        assert!(registry.get("Permission").is_some());

        assert!(matches!(
            load_schema_file(&dir.path().join("missing.toml"), &SymbolizeConfig::default()),
            Err(SymbolizeError::Io(_))
        ));
    }
}
