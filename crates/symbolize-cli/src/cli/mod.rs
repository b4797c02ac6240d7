//! # CLI Layer
//!
//! This module is **one possible UI client** for symbolize. It is the only
//! place that knows about terminal I/O, exit codes and output formatting.
//!
//! 1. **Argument Parsing** (`setup.rs`): typed commands via clap.
//! 2. **Context Loading** (`commands.rs`): configuration, schema file,
//!    translation catalogs and the record store.
//! 3. **Rendering** (`render.rs`): each command produces a view, printed as
//!    styled text or as JSON with `--json`.
//!
//! Values on the command line are read as `true`/`false`, integers, `:name`
//! for an explicit symbol, or otherwise as text.

mod commands;
mod render;
mod setup;
mod styles;

pub use commands::run;
