//! # Symbolize CLI
//!
//! The `symbolize` binary inspects model declarations written in a TOML
//! schema file and exercises them end to end: decoding and encoding raw
//! values, resolving labels in any locale, validating and storing records,
//! and running named scopes over stored records.
//!
//! The binary is intentionally thin. Argument parsing, dispatch and
//! rendering live in `src/cli/`; everything else is the `symbolize`
//! library.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/symbolize-cli/src/cli/)                  │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context loading + dispatch (commands.rs)                 │
//! │  - Text and JSON rendering (render.rs, styles.rs)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (crates/symbolize/)                                │
//! │  - Schema loading, attribute engine, record store           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Logging
//!
//! Library events go through `tracing`. Set `SYMBOLIZE_LOG` (e.g.
//! `SYMBOLIZE_LOG=symbolize=trace`) or pass `-v` for debug output on stderr.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
