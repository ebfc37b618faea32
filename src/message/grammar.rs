//! Pest grammar parser for message templates

use pest::Parser;
use pest_derive::Parser;

use crate::error::{Result, SandboxError};
use crate::message::ast::*;

#[derive(Parser)]
#[grammar = "../grammar/message.pest"]
pub struct MessageParser;

/// Parse a message template into segments
pub fn parse_message(input: &str) -> Result<MessageTemplate> {
    let pairs = MessageParser::parse(Rule::template, input)
        .map_err(|e| SandboxError::Render(e.to_string()))?;

    let pair = pairs
        .into_iter()
        .next()
        .ok_or_else(|| SandboxError::Render("Empty template".to_string()))?;

    let mut segments = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::text => segments.push(Segment::Text(inner.as_str().to_string())),
            Rule::action => segments.push(Segment::Field(parse_action(inner)?)),
            Rule::EOI => {}
            rule => {
                return Err(SandboxError::Render(format!(
                    "Unexpected rule in template: {:?}",
                    rule
                )))
            }
        }
    }

    Ok(MessageTemplate { segments })
}

fn parse_action(pair: pest::iterators::Pair<Rule>) -> Result<FieldRef> {
    let mut name = None;
    let mut trim_left = false;
    let mut trim_right = false;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::open => trim_left = has_trim(inner),
            Rule::close => trim_right = has_trim(inner),
            Rule::field => name = Some(inner.as_str().trim_start_matches('.').to_string()),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| SandboxError::Render("Expected field in action".to_string()))?;
    Ok(FieldRef {
        name,
        trim_left,
        trim_right,
    })
}

fn has_trim(pair: pest::iterators::Pair<Rule>) -> bool {
    pair.into_inner().any(|p| p.as_rule() == Rule::trim)
}
