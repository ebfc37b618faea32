//! Output formatting module

pub mod console;
pub mod formatter;
pub mod human;
pub mod json;

pub use console::{Printer, Theme};
pub use formatter::{format_sandboxes, format_templates, OutputFormat};
