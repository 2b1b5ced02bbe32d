//! Terminal theme for the dashboard
//!
//! Maps the dashboard's semantic colors onto `colored` styles, or onto
//! nothing at all when output is not a terminal.

use std::io::IsTerminal;

use colored::{Color, Colorize};

// ============================================================================
// Theme Structure
// ============================================================================

/// Semantic styles used by the views
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub id: &'static str,

    // Core colors
    pub primary: Style,
    pub accent: Style,

    // Status colors
    pub error: Style,
    pub warning: Style,
    pub success: Style,

    // Text colors
    pub text_muted: Style,
    pub heading: Style,
}

/// Foreground color plus emphasis for one semantic slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    color: Option<Color>,
    bold: bool,
    dimmed: bool,
}

impl Style {
    pub const NONE: Style = Style {
        color: None,
        bold: false,
        dimmed: false,
    };

    const fn fg(color: Color) -> Self {
        Style {
            color: Some(color),
            ..Self::NONE
        }
    }

    const fn strong(self) -> Self {
        Style { bold: true, ..self }
    }

    const fn faint(self) -> Self {
        Style {
            dimmed: true,
            ..self
        }
    }

    fn is_none(&self) -> bool {
        self.color.is_none() && !self.bold && !self.dimmed
    }

    pub fn paint(&self, text: &str) -> String {
        if self.is_none() {
            return text.to_string();
        }

        let mut painted = match self.color {
            Some(color) => text.color(color),
            None => text.normal(),
        };
        if self.bold {
            painted = painted.bold();
        }
        if self.dimmed {
            painted = painted.dimmed();
        }
        painted.to_string()
    }
}

impl Theme {
    /// Pick the theme for standard output.
    ///
    /// `--plain` or a non-terminal stdout also turns `colored` off globally.
    pub fn for_stdout(force_plain: bool) -> Self {
        if force_plain || !std::io::stdout().is_terminal() {
            colored::control::set_override(false);
            Self::plain()
        } else {
            Self::ansi()
        }
    }

    /// Colored output for interactive terminals
    pub fn ansi() -> Self {
        Self {
            id: "ansi",
            primary: Style::fg(Color::Blue),
            accent: Style::fg(Color::Magenta),
            error: Style::fg(Color::Red).strong(),
            warning: Style::fg(Color::Yellow),
            success: Style::fg(Color::Green),
            text_muted: Style::NONE.faint(),
            heading: Style::NONE.strong(),
        }
    }

    /// No escape sequences; for pipes, files and `--plain`
    pub fn plain() -> Self {
        Self {
            id: "plain",
            primary: Style::NONE,
            accent: Style::NONE,
            error: Style::NONE,
            warning: Style::NONE,
            success: Style::NONE,
            text_muted: Style::NONE,
            heading: Style::NONE,
        }
    }

    pub fn is_plain(&self) -> bool {
        self.id == "plain"
    }
}
