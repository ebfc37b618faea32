//! Console printer and colour theme

use std::io::{self, Write};

use colored::{Color, Colorize};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};

use crate::error::Result;

/// Colours used for console output
///
/// Built once from the command-line flags and handed to the printer and
/// formatters; nothing changes it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub header: Color,
    pub info: Color,
    pub alert: Color,
    pub success: Color,
    pub error: Color,
    pub muted: Color,
    /// When false every `paint` call returns the text unchanged
    pub enabled: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Color::TrueColor { r: 0x7D, g: 0x56, b: 0xF4 },
            info: Color::TrueColor { r: 0xFF, g: 0xFF, b: 0x00 },
            alert: Color::TrueColor { r: 0xFF, g: 0xAA, b: 0x33 },
            success: Color::TrueColor { r: 0x04, g: 0xB5, b: 0x75 },
            error: Color::Red,
            muted: Color::BrightBlack,
            enabled: true,
        }
    }
}

impl Theme {
    /// Theme that never emits escape codes
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str, color: Color) -> String {
        if self.enabled {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Writes themed lines to a terminal or any other writer
pub struct Printer {
    out: Box<dyn Write>,
    theme: Theme,
}

impl Printer {
    /// Printer on standard output
    pub fn stdout(theme: Theme) -> Self {
        Self::with_writer(Box::new(io::stdout()), theme)
    }

    pub fn with_writer(out: Box<dyn Write>, theme: Theme) -> Self {
        Self { out, theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Text framed in a rounded box
    pub fn header(&mut self, text: &str) -> Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .add_row(vec![Cell::new(text)]);

        let framed = table.to_string();
        writeln!(self.out, "{}\n", self.theme.bold(&framed, self.theme.header))?;
        Ok(())
    }

    pub fn info(&mut self, text: &str) -> Result<()> {
        self.colored(text, self.theme.info)
    }

    pub fn alert(&mut self, text: &str) -> Result<()> {
        self.colored(text, self.theme.alert)
    }

    pub fn success(&mut self, text: &str) -> Result<()> {
        self.colored(text, self.theme.success)
    }

    pub fn error(&mut self, text: &str) -> Result<()> {
        self.colored(text, self.theme.error)
    }

    /// Unstyled line
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn colored(&mut self, text: &str, color: Color) -> Result<()> {
        writeln!(self.out, "{}", self.theme.paint(text, color))?;
        self.out.flush()?;
        Ok(())
    }
}
