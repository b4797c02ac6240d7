//! # Configuration
//!
//! Symbolize configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `SYMBOLIZE__LOCALE`, `SYMBOLIZE__I18N_SCOPE`, etc.
//! 2. **Local Config**: `symbolize.toml` in the working directory.
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `i18n_scope` | `symbolizes` | Prefix of every localization key |
//! | `default_locale` | `en` | Locale tried when the current one misses |
//! | `locale` | unset | Current locale; falls back to `default_locale` |
//! | `humanize_missing` | `true` | Humanize values whose translation is missing |

use clapfig::{Clapfig, SearchMode, SearchPath};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for symbolize, stored in `symbolize.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SymbolizeConfig {
    /// Prefix of localization keys: `<i18n_scope>.<model>.<attribute>.<value>`
    #[config(default = "symbolizes")]
    pub i18n_scope: String,

    /// Locale used when a lookup misses in the current locale
    #[config(default = "en")]
    pub default_locale: String,

    /// Current locale. When absent, `default_locale` is used.
    pub locale: Option<String>,

    /// Humanize values whose translation is missing (`in_progress` → `In progress`)
    #[config(default = true)]
    pub humanize_missing: bool,
}

impl Default for SymbolizeConfig {
    fn default() -> Self {
        Self {
            i18n_scope: "symbolizes".to_string(),
            default_locale: "en".to_string(),
            locale: None,
            humanize_missing: true,
        }
    }
}

impl SymbolizeConfig {
    /// The current locale.
    pub fn locale(&self) -> &str {
        self.locale.as_deref().unwrap_or(&self.default_locale)
    }
}

/// Load the configuration for a working directory.
///
/// The global config directory provides defaults and `cwd/symbolize.toml`
/// overrides it. Unreadable or invalid files fall back to defaults.
pub fn load_config(cwd: &Path) -> SymbolizeConfig {
    let mut search_paths = Vec::new();
    if let Some(dirs) = ProjectDirs::from("com", "symbolize", "symbolize") {
        search_paths.push(SearchPath::Path(dirs.config_dir().to_path_buf()));
    }
    search_paths.push(SearchPath::Path(cwd.to_path_buf()));

    let config: SymbolizeConfig = Clapfig::builder()
        .app_name("symbolize")
        .file_name("symbolize.toml")
        .search_paths(search_paths)
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default();

    tracing::debug!(
        locale = config.locale(),
        i18n_scope = %config.i18n_scope,
        "loaded configuration"
    );
    config
}
