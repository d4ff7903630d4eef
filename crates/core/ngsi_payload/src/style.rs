use crate::numbered_literal;
use crate::numbered_name;
use json_writer::JsonNode;

/// How the scalar values taken from a step table are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    /// As JSON strings
    Structured,
    /// Verbatim, so the step table can provide numbers, booleans, arrays or broken JSON
    Raw,
}

impl Style {
    pub(crate) fn leaf(self, value: &str) -> JsonNode {
        match self {
            Style::Structured => JsonNode::string(value),
            Style::Raw => JsonNode::literal(value),
        }
    }

    /// A leaf suffixed with `_<index>` when there are several siblings.
    pub(crate) fn numbered_leaf(self, value: &str, count: u32, index: u32) -> JsonNode {
        match self {
            Style::Structured => JsonNode::String(numbered_name(value, count, index)),
            Style::Raw => JsonNode::Literal(numbered_literal(value, count, index)),
        }
    }
}
