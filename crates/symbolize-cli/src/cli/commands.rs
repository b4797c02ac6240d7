use super::render::{
    emit, CreatedView, DecodedView, DescribeView, EncodedView, ErrorView, LabelView, ModelView,
    OptionView, OptionsView, RecordView, RecordsView, ValidationView,
};
use super::setup::{Cli, Commands, ModelCommand};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use symbolize::attributes::{LabelContext, SymbolAttribute};
use symbolize::config::{load_config, SymbolizeConfig};
use symbolize::error::SymbolizeError;
use symbolize::i18n::Catalog;
use symbolize::model::{ModelSchema, Registry};
use symbolize::record::Record;
use symbolize::schema::load_schema_file;
use symbolize::store::fs::FileStore;
use symbolize::value::Scalar;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = load_config(&cwd);

    let command = match &cli.command {
        Commands::Config => {
            print!("{}", emit(&config, cli.json)?);
            return Ok(());
        }
        Commands::Model(command) => command,
    };

    let ctx = AppContext::load(&cli, config)?;
    let output = ctx.dispatch(command, cli.json)?;
    print!("{}", output.text);
    if output.failed {
        bail!("record is invalid");
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_env("SYMBOLIZE_LOG")
        .unwrap_or_else(|_| filter.into());
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Rendered command output. `failed` turns into a non-zero exit after the
/// output is printed.
struct Output {
    text: String,
    failed: bool,
}

impl Output {
    fn ok(text: String) -> Self {
        Self {
            text,
            failed: false,
        }
    }
}

struct AppContext {
    config: SymbolizeConfig,
    registry: Registry,
    catalog: Catalog,
    data_dir: PathBuf,
}

impl AppContext {
    fn load(cli: &Cli, config: SymbolizeConfig) -> Result<Self> {
        let registry = load_schema_file(&cli.schema, &config)
            .with_context(|| format!("loading schema {}", cli.schema.display()))?;

        let mut catalog = Catalog::new();
        for path in &cli.locales {
            let loaded = Catalog::load(path)
                .with_context(|| format!("loading translations {}", path.display()))?;
            catalog.merge(loaded);
        }
        tracing::debug!(
            models = registry.len(),
            locales = catalog.locales().count(),
            "loaded context"
        );

        Ok(Self {
            config,
            registry,
            catalog,
            data_dir: cli.data.clone(),
        })
    }

    fn model(&self, name: &str) -> Result<Arc<ModelSchema>> {
        Ok(self.registry.require(name)?)
    }

    fn attribute(&self, model: &str, attribute: &str) -> Result<Arc<SymbolAttribute>> {
        Ok(Arc::clone(self.model(model)?.require(attribute)?))
    }

    fn labels<'a>(&'a self, locale: Option<&'a str>) -> LabelContext<'a> {
        let ctx = LabelContext::from_config(&self.config, &self.catalog);
        match locale {
            Some(locale) => ctx.with_locale(locale),
            None => ctx,
        }
    }

    fn store(&self) -> FileStore {
        let mut store = FileStore::new(self.data_dir.clone());
        for schema in self.registry.models() {
            store.install(schema);
        }
        store
    }

    fn dispatch(&self, command: &ModelCommand, json: bool) -> Result<Output> {
        let text = match command {
            ModelCommand::Describe { model } => {
                let models = match model {
                    Some(name) => vec![ModelView::from_schema(&*self.model(name)?)],
                    None => self
                        .registry
                        .models()
                        .map(|schema| ModelView::from_schema(schema))
                        .collect(),
                };
                emit(&DescribeView { models }, json)?
            }
            ModelCommand::Decode {
                model,
                attribute,
                raw,
            } => {
                let attr = self.attribute(model, attribute)?;
                let value = attr.decode(Some(&parse_scalar(raw)));
                emit(
                    &DecodedView {
                        attribute: attribute.clone(),
                        input: raw.clone(),
                        value,
                    },
                    json,
                )?
            }
            ModelCommand::Encode {
                model,
                attribute,
                value,
            } => {
                let attr = self.attribute(model, attribute)?;
                let storage = attr.encode(Some(&parse_scalar(value)));
                emit(
                    &EncodedView {
                        attribute: attribute.clone(),
                        input: value.clone(),
                        storage,
                    },
                    json,
                )?
            }
            ModelCommand::Label {
                model,
                attribute,
                value,
                locale,
            } => {
                let attr = self.attribute(model, attribute)?;
                let labels = self.labels(locale.as_deref());
                let value = attr
                    .decode(Some(&parse_scalar(value)))
                    .ok_or_else(|| anyhow!("a blank value has no label"))?;
                emit(
                    &LabelView {
                        attribute: attribute.clone(),
                        locale: labels.locale.to_string(),
                        label: attr.label(&value, &labels),
                        value,
                    },
                    json,
                )?
            }
            ModelCommand::Options {
                model,
                attribute,
                locale,
            } => {
                let attr = self.attribute(model, attribute)?;
                let labels = self.labels(locale.as_deref());
                let options = attr
                    .options(&labels)
                    .into_iter()
                    .map(|(label, value)| OptionView { label, value })
                    .collect();
                emit(
                    &OptionsView {
                        attribute: attribute.clone(),
                        locale: labels.locale.to_string(),
                        options,
                    },
                    json,
                )?
            }
            ModelCommand::Validate { model, assignments } => {
                let record = self.build_record(model, assignments)?;
                let errors = match record.validate() {
                    Ok(()) => Vec::new(),
                    Err(errors) => errors
                        .iter()
                        .map(|e| ErrorView {
                            attribute: e.attribute().to_string(),
                            message: e.to_string(),
                        })
                        .collect(),
                };
                let failed = !errors.is_empty();
                let text = emit(
                    &ValidationView {
                        model: model.clone(),
                        valid: !failed,
                        errors,
                    },
                    json,
                )?;
                return Ok(Output { text, failed });
            }
            ModelCommand::Create { model, assignments } => {
                let mut record = self.build_record(model, assignments)?;
                let mut store = self.store();
                match store.save(&mut record) {
                    Ok(()) => emit(
                        &CreatedView {
                            model: model.clone(),
                            record: RecordView::from_record(&record),
                        },
                        json,
                    )?,
                    Err(SymbolizeError::Invalid(errors)) => bail!("{}", errors),
                    Err(e) => return Err(e.into()),
                }
            }
            ModelCommand::Scope { model, name } => {
                let schema = self.model(model)?;
                let records = self
                    .store()
                    .scope(&schema, name)?
                    .iter()
                    .map(RecordView::from_record)
                    .collect();
                emit(
                    &RecordsView {
                        model: model.clone(),
                        scope: name.clone(),
                        records,
                    },
                    json,
                )?
            }
        };
        Ok(Output::ok(text))
    }

    fn build_record(&self, model: &str, assignments: &[String]) -> Result<Record> {
        let mut record = Record::new(self.model(model)?);
        for assignment in assignments {
            let (attribute, value) = parse_assignment(assignment)?;
            record.assign(attribute, value);
        }
        Ok(record)
    }
}

/// Read a command-line value: `true`/`false`, an integer, `:name` for a
/// symbol, anything else as text.
fn parse_scalar(text: &str) -> Scalar {
    if let Some(name) = text.strip_prefix(':').filter(|n| !n.is_empty()) {
        return Scalar::sym(name);
    }
    match text {
        "true" => Scalar::Bool(true),
        "false" => Scalar::Bool(false),
        _ => text
            .parse::<i64>()
            .map(Scalar::Int)
            .unwrap_or_else(|_| Scalar::from(text)),
    }
}

/// `attr=value`; `attr=` assigns blank.
fn parse_assignment(text: &str) -> Result<(&str, Option<Scalar>)> {
    let (attribute, value) = text
        .split_once('=')
        .ok_or_else(|| anyhow!("expected attr=value, got '{}'", text))?;
    if attribute.is_empty() {
        bail!("missing attribute name in '{}'", text);
    }
    Ok((attribute, Some(parse_scalar(value))))
}
