//! Post-start message templates
//!
//! Messages use the `{{.Field}}` action syntax already found in existing
//! sandbox configs. Only field lookups are supported.

pub mod ast;
pub mod grammar;
mod render;

pub use ast::{FieldRef, MessageTemplate, Segment};
pub use grammar::parse_message;
pub use render::{render, NO_VALUE};
