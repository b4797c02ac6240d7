use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2024-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "symbolize",
    bin_name = "symbolize",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Inspect and exercise symbolic attribute declarations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Schema file declaring the models
    #[arg(long, global = true, default_value = "schema.toml", help_heading = "Options")]
    pub schema: PathBuf,

    /// Translation catalog (TOML or JSON), may be repeated
    #[arg(long = "locales", global = true, help_heading = "Options")]
    pub locales: Vec<PathBuf>,

    /// Directory holding stored records
    #[arg(long, global = true, default_value = ".symbolize", help_heading = "Options")]
    pub data: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Model(ModelCommand),

    /// Print the resolved configuration
    #[command(display_order = 20)]
    Config,
}

/// Commands that need the loaded schema.
#[derive(Subcommand, Debug)]
pub enum ModelCommand {
    /// Show declared attributes, values, predicates and scopes
    #[command(display_order = 1)]
    Describe {
        /// Only this model
        model: Option<String>,
    },

    /// Read a raw stored value the way the model would
    #[command(display_order = 2)]
    Decode {
        model: String,
        attribute: String,
        /// Raw value: `true`/`false`, an integer, `:name` or text
        raw: String,
    },

    /// Show the storage form of an assigned value
    #[command(display_order = 3)]
    Encode {
        model: String,
        attribute: String,
        value: String,
    },

    /// Resolve the display label of a value
    #[command(display_order = 4)]
    Label {
        model: String,
        attribute: String,
        value: String,

        /// Locale to resolve in (defaults to the configured one)
        #[arg(long)]
        locale: Option<String>,
    },

    /// List (label, value) pairs for an attribute
    #[command(display_order = 5)]
    Options {
        model: String,
        attribute: String,

        /// Locale to resolve in (defaults to the configured one)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Build a record from assignments and validate it
    #[command(display_order = 10)]
    Validate {
        model: String,
        /// Assignments as attr=value
        #[arg(num_args = 0..)]
        assignments: Vec<String>,
    },

    /// Validate and store a record
    #[command(display_order = 11)]
    Create {
        model: String,
        /// Assignments as attr=value
        #[arg(num_args = 0..)]
        assignments: Vec<String>,
    },

    /// List stored records matching a named scope
    #[command(display_order = 12)]
    Scope { model: String, name: String },
}
