//! ANSI styling for representations printed to a terminal.
//!
//! Styles are named by the JSON role they paint:
//! - `key`: member names, blue
//! - `string`: string values, green
//! - `punct`: braces, brackets, `:`, `,` and `null`, dim
//!
//! Numbers and booleans keep the terminal's default color.

/// Escape sequences used by [`Representation::format`](crate::Representation::format).
///
/// When coloring is off every field is empty, so the formatter pushes them
/// unconditionally. Only basic 16-color codes are used, which keeps output
/// legible on light and dark themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub key: &'static str,
    pub string: &'static str,
    pub punct: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// Blue keys, green strings, dim punctuation.
    pub const ON: Self = Self {
        key: "\x1b[34m",
        string: "\x1b[32m",
        punct: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// No escapes at all.
    pub const OFF: Self = Self {
        key: "",
        string: "",
        punct: "",
        reset: "",
    };

    /// [`Colors::ON`] when `enabled`, else [`Colors::OFF`].
    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        *self != Self::OFF
    }

    /// Appends `text` between `style` and a reset; bare `text` when `style` is empty.
    pub fn paint(&self, out: &mut String, style: &str, text: &str) {
        if style.is_empty() {
            out.push_str(text);
            return;
        }
        out.push_str(style);
        out.push_str(text);
        out.push_str(self.reset);
    }
}
