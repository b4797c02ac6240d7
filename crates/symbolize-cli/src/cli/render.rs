//! # Rendering
//!
//! Every command builds a small view struct and hands it to [`emit`]. Views
//! are `Serialize`, which gives the `--json` output for free, and implement
//! [`TextView`] for the styled terminal form. Keeping both in one place means
//! the text and JSON outputs can never disagree on content.

use super::styles::THEME;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use symbolize::config::SymbolizeConfig;
use symbolize::model::ModelSchema;
use symbolize::record::Record;
use symbolize::value::{Scalar, Symbol};

pub trait TextView {
    fn text(&self) -> String;
}

/// Render a view as pretty JSON or styled text.
pub fn emit<V: Serialize + TextView>(view: &V, json: bool) -> anyhow::Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(view)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(view.text())
    }
}

/// Storage values are shown with their type visible: strings quoted.
fn storage_repr(value: &Scalar) -> String {
    match value {
        Scalar::Str(s) => format!("{:?}", s),
        other => other.to_string(),
    }
}

fn nil_or<T: ToString>(value: Option<&T>) -> String {
    value
        .map(ToString::to_string)
        .unwrap_or_else(|| "nil".to_string())
}

// --- describe ---

#[derive(Serialize)]
pub struct ValueView {
    pub value: Symbol,
    pub label: String,
}

#[derive(Serialize)]
pub struct AttributeView {
    pub name: String,
    pub values: Vec<ValueView>,
    pub i18n: bool,
    pub capitalize: bool,
    pub allow_nil: bool,
    pub allow_blank: bool,
    pub default: Option<Symbol>,
    pub predicates: Vec<String>,
    pub scopes: Vec<String>,
}

#[derive(Serialize)]
pub struct ModelView {
    pub name: String,
    pub key: String,
    pub attributes: Vec<AttributeView>,
}

impl ModelView {
    pub fn from_schema(schema: &ModelSchema) -> Self {
        let attributes = schema
            .attributes()
            .map(|attr| {
                let accessors = schema.accessors(attr.name());
                AttributeView {
                    name: attr.name().to_string(),
                    values: attr
                        .allowed()
                        .map(|set| {
                            set.values()
                                .map(|v| ValueView {
                                    value: v.clone(),
                                    label: attr.base_label(v),
                                })
                                .collect()
                        })
                        .unwrap_or_default(),
                    i18n: attr.uses_i18n(),
                    capitalize: attr.capitalizes(),
                    allow_nil: attr.allows_nil(),
                    allow_blank: attr.allows_blank(),
                    default: attr.default_value().cloned(),
                    predicates: accessors
                        .map(|a| a.predicates.iter().map(|p| p.name.clone()).collect())
                        .unwrap_or_default(),
                    scopes: accessors
                        .map(|a| a.scopes.iter().map(|s| s.name.clone()).collect())
                        .unwrap_or_default(),
                }
            })
            .collect();
        Self {
            name: schema.name().to_string(),
            key: schema.key().to_string(),
            attributes,
        }
    }
}

#[derive(Serialize)]
pub struct DescribeView {
    pub models: Vec<ModelView>,
}

impl TextView for DescribeView {
    fn text(&self) -> String {
        let mut out = String::new();
        for (i, model) in self.models.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(
                out,
                "{} {}",
                THEME.title.apply_to(&model.name),
                THEME.muted.apply_to(format!("({})", model.key))
            );
            for attr in &model.attributes {
                let mut flags = Vec::new();
                if attr.i18n {
                    flags.push("i18n".to_string());
                }
                if attr.capitalize {
                    flags.push("capitalize".to_string());
                }
                if attr.allow_nil {
                    flags.push("allow_nil".to_string());
                }
                if attr.allow_blank {
                    flags.push("allow_blank".to_string());
                }
                if let Some(default) = &attr.default {
                    flags.push(format!("default={}", default));
                }
                let _ = write!(out, "  {}", THEME.attribute.apply_to(&attr.name));
                if attr.values.is_empty() {
                    let _ = write!(out, " {}", THEME.muted.apply_to("(any value)"));
                }
                if !flags.is_empty() {
                    let _ = write!(out, " {}", THEME.muted.apply_to(format!("[{}]", flags.join(", "))));
                }
                out.push('\n');
                for value in &attr.values {
                    let _ = writeln!(
                        out,
                        "    {} {}",
                        THEME.value.apply_to(format!("{:<12}", value.value.to_string())),
                        value.label
                    );
                }
                if !attr.predicates.is_empty() {
                    let _ = writeln!(out, "    predicates: {}", attr.predicates.join(", "));
                }
                if !attr.scopes.is_empty() {
                    let _ = writeln!(out, "    scopes: {}", attr.scopes.join(", "));
                }
            }
        }
        out
    }
}

// --- decode / encode ---

#[derive(Serialize)]
pub struct DecodedView {
    pub attribute: String,
    pub input: String,
    pub value: Option<Symbol>,
}

impl TextView for DecodedView {
    fn text(&self) -> String {
        format!("{}\n", THEME.value.apply_to(nil_or(self.value.as_ref())))
    }
}

#[derive(Serialize)]
pub struct EncodedView {
    pub attribute: String,
    pub input: String,
    pub storage: Option<Scalar>,
}

impl TextView for EncodedView {
    fn text(&self) -> String {
        let repr = self
            .storage
            .as_ref()
            .map(storage_repr)
            .unwrap_or_else(|| "nil".to_string());
        format!("{}\n", THEME.value.apply_to(repr))
    }
}

// --- labels ---

#[derive(Serialize)]
pub struct LabelView {
    pub attribute: String,
    pub locale: String,
    pub value: Symbol,
    pub label: String,
}

impl TextView for LabelView {
    fn text(&self) -> String {
        format!("{}\n", self.label)
    }
}

#[derive(Serialize)]
pub struct OptionView {
    pub label: String,
    pub value: Symbol,
}

#[derive(Serialize)]
pub struct OptionsView {
    pub attribute: String,
    pub locale: String,
    pub options: Vec<OptionView>,
}

impl TextView for OptionsView {
    fn text(&self) -> String {
        let mut out = String::new();
        for option in &self.options {
            let _ = writeln!(
                out,
                "{} {}",
                THEME.value.apply_to(format!("{:<12}", option.value.to_string())),
                option.label
            );
        }
        out
    }
}

// --- records ---

#[derive(Serialize)]
pub struct ErrorView {
    pub attribute: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ValidationView {
    pub model: String,
    pub valid: bool,
    pub errors: Vec<ErrorView>,
}

impl TextView for ValidationView {
    fn text(&self) -> String {
        if self.valid {
            return format!("{}\n", THEME.success.apply_to("valid"));
        }
        let mut out = String::new();
        for error in &self.errors {
            let _ = writeln!(out, "{} {}", THEME.error.apply_to("✗"), error.message);
        }
        out
    }
}

#[derive(Serialize)]
pub struct RecordView {
    pub id: String,
    pub values: BTreeMap<String, Scalar>,
}

impl RecordView {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id().to_string(),
            values: record.values().clone(),
        }
    }

    fn line(&self) -> String {
        let values: Vec<String> = self
            .values
            .iter()
            .map(|(k, v)| format!("{}={}", THEME.attribute.apply_to(k), storage_repr(v)))
            .collect();
        format!("{} {}", THEME.muted.apply_to(&self.id), values.join(" "))
    }
}

#[derive(Serialize)]
pub struct CreatedView {
    pub model: String,
    pub record: RecordView,
}

impl TextView for CreatedView {
    fn text(&self) -> String {
        format!(
            "{} {} {}\n",
            THEME.success.apply_to("created"),
            self.model,
            self.record.id
        )
    }
}

#[derive(Serialize)]
pub struct RecordsView {
    pub model: String,
    pub scope: String,
    pub records: Vec<RecordView>,
}

impl TextView for RecordsView {
    fn text(&self) -> String {
        if self.records.is_empty() {
            return format!("{}\n", THEME.muted.apply_to("no records"));
        }
        let mut out = String::new();
        for record in &self.records {
            let _ = writeln!(out, "{}", record.line());
        }
        out
    }
}

// --- config ---

impl TextView for SymbolizeConfig {
    fn text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "i18n_scope = {:?}", self.i18n_scope);
        let _ = writeln!(out, "default_locale = {:?}", self.default_locale);
        match &self.locale {
            Some(locale) => {
                let _ = writeln!(out, "locale = {:?}", locale);
            }
            None => {
                let _ = writeln!(
                    out,
                    "{}",
                    THEME.muted.apply_to("# locale unset, using default_locale")
                );
            }
        }
        let _ = writeln!(out, "humanize_missing = {}", self.humanize_missing);
        out
    }
}
