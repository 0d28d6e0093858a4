//! Named terminal styles.
//!
//! Render code refers to styles by what the text *is* (a key, a time, a
//! warning), never by color. Changing the look means editing this file only.

use console::Style;

pub fn key() -> Style {
    Style::new().yellow()
}

pub fn title() -> Style {
    Style::new().bold()
}

pub fn time() -> Style {
    Style::new().dim()
}

pub fn muted() -> Style {
    Style::new().dim()
}

pub fn source(name: &str) -> Style {
    match name {
        "session" => Style::new().magenta(),
        "override" => Style::new().cyan(),
        _ => Style::new(),
    }
}

pub fn success() -> Style {
    Style::new().green()
}

pub fn warning() -> Style {
    Style::new().yellow()
}
