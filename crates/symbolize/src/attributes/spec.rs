//! Symbolic attribute declarations.
//!
//! [`SymbolOptions`] is the option bag a model author passes when declaring
//! an attribute. [`SymbolAttribute`] is the immutable configuration built
//! from it once, at declaration time.

use super::allowed::{AllowedValues, Declaration};
use crate::error::{Result, SymbolizeError};
use crate::value::{Scalar, Symbol};
use std::collections::HashMap;

/// Options recognized when declaring a symbolic attribute.
///
/// Mirrors `{in, scopes, methods, i18n, capitalize, allow_nil, allow_blank, default}`.
/// `i18n` left as `None` resolves to "localize unless labels were given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolOptions {
    pub within: Option<Declaration>,
    pub scopes: bool,
    pub methods: bool,
    pub i18n: Option<bool>,
    pub capitalize: bool,
    pub allow_nil: bool,
    pub allow_blank: bool,
    pub default: Option<Scalar>,
}

impl SymbolOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the attribute to an allowed-value set.
    pub fn within(mut self, declaration: Declaration) -> Self {
        self.within = Some(declaration);
        self
    }

    pub fn scopes(mut self) -> Self {
        self.scopes = true;
        self
    }

    pub fn methods(mut self) -> Self {
        self.methods = true;
        self
    }

    pub fn i18n(mut self, enabled: bool) -> Self {
        self.i18n = Some(enabled);
        self
    }

    pub fn capitalize(mut self) -> Self {
        self.capitalize = true;
        self
    }

    pub fn allow_nil(mut self) -> Self {
        self.allow_nil = true;
        self
    }

    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Scalar>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Immutable configuration of one symbolic attribute.
#[derive(Debug, Clone)]
pub struct SymbolAttribute {
    pub(crate) name: String,
    pub(crate) model: String,
    /// Localization key prefix for this model, e.g. `symbolizes.user_skill`.
    pub(crate) i18n_key: String,
    pub(crate) allowed: Option<AllowedValues>,
    pub(crate) use_i18n: bool,
    pub(crate) capitalize: bool,
    pub(crate) allow_nil: bool,
    pub(crate) allow_blank: bool,
    pub(crate) scopes: bool,
    pub(crate) methods: bool,
    pub(crate) default: Option<Symbol>,
    /// Locale-independent labels, computed once.
    pub(crate) base_labels: HashMap<Symbol, String>,
}

impl SymbolAttribute {
    /// Build the configuration for `model.name`. Every malformed option
    /// fails here, never later at runtime.
    pub fn declare(
        model: &str,
        i18n_key: &str,
        name: &str,
        options: SymbolOptions,
    ) -> Result<Self> {
        if !is_identifier(name) {
            return Err(SymbolizeError::declaration(
                model,
                name,
                "attribute names must be non-empty identifiers",
            ));
        }

        let allowed = options
            .within
            .as_ref()
            .map(AllowedValues::build)
            .transpose()
            .map_err(|reason| SymbolizeError::declaration(model, name, reason))?;

        if allowed.is_none() && (options.scopes || options.methods) {
            return Err(SymbolizeError::declaration(
                model,
                name,
                "scopes and methods require an allowed-value set",
            ));
        }

        let default = match (&options.default, &allowed) {
            (None, _) => None,
            (Some(raw), _) if raw.is_blank() => None,
            (Some(raw), Some(set)) => Some(set.find(raw).cloned().ok_or_else(|| {
                SymbolizeError::declaration(
                    model,
                    name,
                    format!("default {} is not an allowed value", raw),
                )
            })?),
            (Some(raw), None) => Some(raw.canonicalize()),
        };

        let labeled = options
            .within
            .as_ref()
            .map(Declaration::is_labeled)
            .unwrap_or(false);
        let use_i18n = options.i18n.unwrap_or(allowed.is_some() && !labeled);

        let mut attribute = Self {
            name: name.to_string(),
            model: model.to_string(),
            i18n_key: i18n_key.to_string(),
            allowed,
            use_i18n,
            capitalize: options.capitalize,
            allow_nil: options.allow_nil,
            allow_blank: options.allow_blank,
            scopes: options.scopes,
            methods: options.methods,
            default,
            base_labels: HashMap::new(),
        };
        attribute.base_labels = attribute.build_base_labels();

        tracing::debug!(
            model,
            attribute = name,
            values = attribute.allowed.as_ref().map(|a| a.len()).unwrap_or(0),
            i18n = attribute.use_i18n,
            scopes = attribute.scopes,
            methods = attribute.methods,
            "declared symbolic attribute"
        );

        Ok(attribute)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn allowed(&self) -> Option<&AllowedValues> {
        self.allowed.as_ref()
    }

    pub fn uses_i18n(&self) -> bool {
        self.use_i18n
    }

    pub fn capitalizes(&self) -> bool {
        self.capitalize
    }

    pub fn allows_nil(&self) -> bool {
        self.allow_nil
    }

    pub fn allows_blank(&self) -> bool {
        self.allow_blank
    }

    pub fn has_scopes(&self) -> bool {
        self.scopes
    }

    pub fn has_methods(&self) -> bool {
        self.methods
    }

    pub fn default_value(&self) -> Option<&Symbol> {
        self.default.as_ref()
    }

    /// Whether the values of this attribute are booleans.
    pub fn is_boolean(&self) -> bool {
        self.allowed
            .as_ref()
            .map(AllowedValues::is_boolean)
            .unwrap_or(false)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declare(name: &str, options: SymbolOptions) -> Result<SymbolAttribute> {
        SymbolAttribute::declare("User", "symbolizes.user", name, options)
    }

    #[test]
    fn sequence_declarations_localize_by_default() {
        let attr = declare(
            "language",
            SymbolOptions::new().within(Declaration::values(["pt", "en"])),
        )
        .unwrap();
        assert!(attr.uses_i18n());
    }

    #[test]
    fn labeled_declarations_do_not_localize_by_default() {
        let attr = declare(
            "so",
            SymbolOptions::new().within(Declaration::labeled([("linux", "Linux")])),
        )
        .unwrap();
        assert!(!attr.uses_i18n());
    }

    #[test]
    fn explicit_i18n_flag_wins() {
        let attr = declare(
            "gui",
            SymbolOptions::new()
                .within(Declaration::values(["qt"]))
                .i18n(false),
        )
        .unwrap();
        assert!(!attr.uses_i18n());
    }

    #[test]
    fn free_attribute_has_no_allowed_set() {
        let attr = declare("other", SymbolOptions::new()).unwrap();
        assert!(attr.allowed().is_none());
        assert!(!attr.uses_i18n());
    }

    #[test]
    fn default_must_be_allowed() {
        let attr = declare(
            "kind",
            SymbolOptions::new()
                .within(Declaration::values(["temp", "perm"]))
                .default_value(Scalar::sym("perm")),
        )
        .unwrap();
        assert_eq!(attr.default_value(), Some(&Symbol::name("perm")));

        let err = declare(
            "kind",
            SymbolOptions::new()
                .within(Declaration::values(["temp", "perm"]))
                .default_value("forever"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("User.kind"));
    }

    #[test]
    fn malformed_declarations_fail_immediately() {
        assert!(declare("status", SymbolOptions::new().within(Declaration::Values(vec![]))).is_err());
        assert!(declare("bad name", SymbolOptions::new()).is_err());
        assert!(declare("", SymbolOptions::new()).is_err());
        assert!(declare("status", SymbolOptions::new().scopes()).is_err());
    }
}
