//! Label resolution.
//!
//! Labels come from one of three sources, in this order:
//!
//! 1. The localization table, when the attribute localizes
//!    (`<i18n_key>.<attribute>.<value>`, current locale then default locale).
//! 2. The label given in the declaration.
//! 3. The value itself: humanized when a localized lookup missed, otherwise
//!    its literal string form, capitalized if the attribute asks for it.
//!
//! Resolution is recomputed on every call against the caller's
//! [`LabelContext`]; nothing is cached across locale changes.

use super::spec::SymbolAttribute;
use crate::config::SymbolizeConfig;
use crate::i18n::{NoTranslations, Translator};
use crate::value::{capitalize, Symbol};
use std::collections::HashMap;

static NO_TRANSLATIONS: NoTranslations = NoTranslations;

/// Ambient localization state for one lookup.
#[derive(Clone, Copy)]
pub struct LabelContext<'a> {
    pub translator: &'a dyn Translator,
    pub locale: &'a str,
    pub default_locale: &'a str,
    /// Humanize values whose translation is missing (`in_progress` →
    /// `In progress`) instead of using the literal value.
    pub humanize_missing: bool,
}

impl<'a> LabelContext<'a> {
    pub fn new(translator: &'a dyn Translator, locale: &'a str) -> Self {
        Self {
            translator,
            locale,
            default_locale: locale,
            humanize_missing: true,
        }
    }

    /// A context without any translations, in the `en` locale.
    pub fn plain() -> LabelContext<'static> {
        LabelContext::new(&NO_TRANSLATIONS, "en")
    }

    pub fn from_config(config: &'a SymbolizeConfig, translator: &'a dyn Translator) -> Self {
        Self {
            translator,
            locale: config.locale(),
            default_locale: &config.default_locale,
            humanize_missing: config.humanize_missing,
        }
    }

    pub fn with_default_locale(mut self, default_locale: &'a str) -> Self {
        self.default_locale = default_locale;
        self
    }

    pub fn with_locale(mut self, locale: &'a str) -> Self {
        self.locale = locale;
        self
    }
}

impl SymbolAttribute {
    /// Localization key for a value, e.g. `symbolizes.user.sex.true`.
    pub fn translation_key(&self, value: &Symbol) -> String {
        format!("{}.{}.{}", self.i18n_key, self.name, value)
    }

    /// Display label for a value.
    pub fn label(&self, value: &Symbol, ctx: &LabelContext<'_>) -> String {
        if !self.use_i18n {
            return self.base_label(value);
        }

        let key = self.translation_key(value);
        if let Some(text) = ctx.translator.translate(&key, ctx.locale) {
            return text;
        }
        if ctx.default_locale != ctx.locale {
            if let Some(text) = ctx.translator.translate(&key, ctx.default_locale) {
                return text;
            }
        }
        tracing::debug!(key = %key, locale = ctx.locale, "missing translation");

        if let Some(label) = self.declared_label(value) {
            return label.to_string();
        }
        if ctx.humanize_missing {
            value.humanize()
        } else {
            value.to_string()
        }
    }

    /// Label of the attribute's current value; `None` when there is none.
    pub fn text(&self, value: Option<&Symbol>, ctx: &LabelContext<'_>) -> Option<String> {
        value.map(|v| self.label(v, ctx))
    }

    /// Ordered `(label, value)` pairs for selection widgets, resolved in the
    /// context's locale.
    pub fn options(&self, ctx: &LabelContext<'_>) -> Vec<(String, Symbol)> {
        self.allowed
            .iter()
            .flat_map(|set| set.values())
            .map(|value| (self.label(value, ctx), value.clone()))
            .collect()
    }

    /// Locale-independent labels, built once at declaration time.
    ///
    /// These never consult a translator: declared labels, else the literal
    /// value (capitalized if configured). Use [`options`](Self::options)
    /// for localized listings.
    pub fn value_labels(&self) -> &HashMap<Symbol, String> {
        &self.base_labels
    }

    /// The locale-independent label of any value, allowed or not.
    pub fn base_label(&self, value: &Symbol) -> String {
        if let Some(label) = self.declared_label(value) {
            return label.to_string();
        }
        let literal = value.to_string();
        if self.capitalize {
            capitalize(&literal)
        } else {
            literal
        }
    }

    fn declared_label(&self, value: &Symbol) -> Option<&str> {
        self.allowed.as_ref()?.label_source(value)
    }

    pub(crate) fn build_base_labels(&self) -> HashMap<Symbol, String> {
        self.allowed
            .iter()
            .flat_map(|set| set.values())
            .map(|value| (value.clone(), self.base_label(value)))
            .collect()
    }
}
