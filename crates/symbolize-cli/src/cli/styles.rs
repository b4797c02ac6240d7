//! Styles for the symbolize CLI.
//!
//! Renderers refer to styles by meaning (a model name, a value, a muted hint)
//! rather than by color, so the palette can change in one place. `console`
//! drops the escape codes by itself when stdout is not a terminal.

use console::Style;
use once_cell::sync::Lazy;

pub struct Theme {
    pub title: Style,
    pub attribute: Style,
    pub value: Style,
    pub muted: Style,
    pub success: Style,
    pub error: Style,
}

pub static THEME: Lazy<Theme> = Lazy::new(|| Theme {
    title: Style::new().bold(),
    attribute: Style::new().cyan(),
    value: Style::new().green(),
    muted: Style::new().color256(245),
    success: Style::new().green().bold(),
    error: Style::new().red().bold(),
});
