//! Message template rendering

use std::collections::BTreeMap;

use crate::error::Result;
use crate::message::ast::{MessageTemplate, Segment};
use crate::message::grammar::parse_message;

/// Printed for fields the data does not contain
pub const NO_VALUE: &str = "<no value>";

/// Parse and render a message template in one step
pub fn render(template: &str, data: &BTreeMap<&str, String>) -> Result<String> {
    Ok(parse_message(template)?.render(data))
}

impl MessageTemplate {
    /// Render with the given field values
    pub fn render(&self, data: &BTreeMap<&str, String>) -> String {
        let mut out = String::new();
        let mut trim_next = false;
        // Start of the text segment just written, if the last segment was text
        let mut last_text: Option<usize> = None;

        for segment in &self.segments {
            match segment {
                Segment::Text(text) => {
                    let text = if trim_next { text.trim_start() } else { text.as_str() };
                    last_text = Some(out.len());
                    out.push_str(text);
                    trim_next = false;
                }
                Segment::Field(field) => {
                    // Trimming never reaches into a previous action's value
                    if let Some(start) = last_text.filter(|_| field.trim_left) {
                        let kept = out.trim_end().len().max(start);
                        out.truncate(kept);
                    }
                    last_text = None;
                    match data.get(field.name.as_str()) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(NO_VALUE),
                    }
                    trim_next = field.trim_right;
                }
            }
        }

        out
    }
}
