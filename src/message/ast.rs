//! Parsed form of a message template

/// One piece of a message template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text copied to the output
    Text(String),
    /// `{{.Field}}` lookup
    Field(FieldRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub name: String,
    /// `{{-` was used: strip whitespace before the action
    pub trim_left: bool,
    /// `-}}` was used: strip whitespace after the action
    pub trim_right: bool,
}

/// A parsed message template
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageTemplate {
    pub segments: Vec<Segment>,
}

impl MessageTemplate {
    /// Names of all fields the template refers to, in order of appearance
    pub fn fields(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Field(f) => Some(f.name.as_str()),
                Segment::Text(_) => None,
            })
            .collect()
    }
}
