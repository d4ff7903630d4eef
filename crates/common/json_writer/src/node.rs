use crate::JsonWriter;
use crate::JsonWriterError;

/// A JSON document under construction.
///
/// Same shape as `serde_json::Value`, with object members kept in insertion
/// order and one extra leaf, [JsonNode::Literal], holding a token that is
/// emitted verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNode {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<JsonNode>),
    Object(Vec<(String, JsonNode)>),
    Literal(String),
}

impl JsonNode {
    pub fn object() -> Self {
        JsonNode::Object(Vec::new())
    }

    pub fn string(s: impl Into<String>) -> Self {
        JsonNode::String(s.into())
    }

    pub fn literal(token: impl Into<String>) -> Self {
        JsonNode::Literal(token.into())
    }

    /// Append a member to an object node. Does nothing on other variants.
    pub fn push_member(&mut self, key: impl Into<String>, value: JsonNode) {
        if let JsonNode::Object(members) = self {
            members.push((key.into(), value));
        }
    }

    pub fn is_empty_object(&self) -> bool {
        matches!(self, JsonNode::Object(members) if members.is_empty())
    }

    pub fn write(&self, jw: &mut JsonWriter) -> Result<(), JsonWriterError> {
        match self {
            JsonNode::Null => jw.write_null(),
            JsonNode::Bool(value) => jw.write_bool(*value),
            JsonNode::Number(value) => jw.write_number(value)?,
            JsonNode::String(value) => jw.write_str(value)?,
            JsonNode::Literal(token) => jw.write_literal(token),
            JsonNode::Array(items) => {
                jw.write_open_array();
                for item in items {
                    item.write(jw)?;
                }
                jw.write_close_array();
            }
            JsonNode::Object(members) => {
                jw.write_open_obj();
                for (key, value) in members {
                    jw.write_key(key)?;
                    value.write(jw)?;
                }
                jw.write_close_obj();
            }
        }
        Ok(())
    }

    pub fn to_json_string(&self) -> Result<String, JsonWriterError> {
        let mut jw = JsonWriter::with_capacity(256);
        self.write(&mut jw)?;
        jw.into_string()
    }

    /// Render the members of an object node as `"key":value` pairs, without the braces.
    pub fn to_members_string(&self) -> Result<String, JsonWriterError> {
        let rendered = self.to_json_string()?;
        match self {
            JsonNode::Object(_) => Ok(rendered[1..rendered.len() - 1].to_string()),
            _ => Ok(rendered),
        }
    }
}

impl From<serde_json::Value> for JsonNode {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => JsonNode::Null,
            Value::Bool(b) => JsonNode::Bool(b),
            Value::Number(n) => JsonNode::Number(n),
            Value::String(s) => JsonNode::String(s),
            Value::Array(items) => JsonNode::Array(items.into_iter().map(JsonNode::from).collect()),
            Value::Object(members) => JsonNode::Object(
                members
                    .into_iter()
                    .map(|(key, value)| (key, JsonNode::from(value)))
                    .collect(),
            ),
        }
    }
}

/// A [JsonNode::Literal] that doesn't parse as JSON is kept as a string.
impl From<JsonNode> for serde_json::Value {
    fn from(node: JsonNode) -> Self {
        use serde_json::Value;
        match node {
            JsonNode::Null => Value::Null,
            JsonNode::Bool(b) => Value::Bool(b),
            JsonNode::Number(n) => Value::Number(n),
            JsonNode::String(s) => Value::String(s),
            JsonNode::Literal(token) => {
                serde_json::from_str(&token).unwrap_or(Value::String(token))
            }
            JsonNode::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonNode::Object(members) => Value::Object(
                members
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(JsonNode::literal("true"), "true")]
    #[test_case(JsonNode::literal("\"2017-06-17T07:21:24.238Z\""), "\"2017-06-17T07:21:24.238Z\"")]
    #[test_case(JsonNode::literal("[[1,2],[3,4]]"), "[[1,2],[3,4]]")]
    #[test_case(JsonNode::string("a \"quoted\" word"), r#""a \"quoted\" word""#)]
    #[test_case(JsonNode::Array(vec![]), "[]")]
    #[test_case(JsonNode::object(), "{}")]
    fn render_single_nodes(node: JsonNode, expected: &str) {
        assert_eq!(node.to_json_string().unwrap(), expected);
    }

    #[test]
    fn object_members_keep_insertion_order() -> anyhow::Result<()> {
        let mut node = JsonNode::object();
        node.push_member("type", JsonNode::string("Room"));
        node.push_member("id", JsonNode::string("Room1"));
        node.push_member("temperature", JsonNode::literal("23.5"));

        assert_eq!(
            node.to_json_string()?,
            r#"{"type":"Room","id":"Room1","temperature":23.5}"#
        );
        Ok(())
    }

    #[test]
    fn members_string_strips_braces() -> anyhow::Result<()> {
        let mut value = JsonNode::object();
        value.push_member("value", JsonNode::literal("21"));
        let mut node = JsonNode::object();
        node.push_member("temp", value);
        assert_eq!(node.to_members_string()?, r#""temp":{"value":21}"#);
        Ok(())
    }

    #[test]
    fn converted_serde_values_render_identically() -> anyhow::Result<()> {
        let value = serde_json::json!({"a": [1, "two", null, false], "b": {"c": 1.5}});
        let node = JsonNode::from(value.clone());
        let rendered = node.to_json_string()?;
        assert_eq!(serde_json::from_str::<serde_json::Value>(&rendered)?, value);
        Ok(())
    }

    #[test]
    fn literals_are_parsed_when_converted_to_values() {
        let mut node = JsonNode::object();
        node.push_member("valid", JsonNode::literal("[1,2]"));
        node.push_member("invalid", JsonNode::literal("not json"));
        assert_eq!(
            serde_json::Value::from(node),
            serde_json::json!({"valid": [1, 2], "invalid": "not json"})
        );
    }

    #[test]
    fn push_member_ignores_non_objects() {
        let mut node = JsonNode::Array(vec![]);
        node.push_member("ignored", JsonNode::Null);
        assert_eq!(node, JsonNode::Array(vec![]));
    }
}
