use super::AttributeMode;
use super::EntitiesPrefix;
use super::EntityContext;
use crate::numbered_name;
use crate::style::Style;
use json_writer::JsonNode;
use json_writer::JsonWriterError;
use serde_json::Map;
use serde_json::Value;

/// The attributes of an entity, values being JSON strings.
///
/// With `attribute_count > 1` the attributes are named `{name}_0 .. {name}_{N-1}`
/// and all carry the same value. In key-values mode the attribute type and
/// the metadata are not part of the payload.
pub fn build_attributes(context: &EntityContext, mode: AttributeMode) -> Map<String, Value> {
    match Value::from(attributes_node(context, mode, Style::Structured)) {
        Value::Object(attributes) => attributes,
        _ => Map::new(),
    }
}

/// The attributes of an entity as a `"name": {...}` JSON fragment.
///
/// Attribute and metadata values are copied verbatim, so the step table can
/// provide numbers, booleans, arrays or objects. The fragment is not validated.
pub fn build_attribute_raw(
    context: &EntityContext,
    mode: AttributeMode,
) -> Result<String, JsonWriterError> {
    attributes_node(context, mode, Style::Raw).to_members_string()
}

/// The `index`-th entity of the context.
pub fn build_entity(context: &EntityContext, mode: AttributeMode, index: u32) -> Value {
    Value::from(entity_node(context, mode, Style::Structured, index))
}

/// All the `entities_count` entities of the context.
pub fn build_entities(context: &EntityContext, mode: AttributeMode) -> Vec<Value> {
    (0..context.entities_count)
        .map(|index| build_entity(context, mode, index))
        .collect()
}

/// The `index`-th entity of the context as JSON text, attribute values being verbatim.
///
/// Only attribute and metadata values are verbatim. The entity `type` and `id`,
/// like the attribute and metadata types, are always encoded as JSON strings,
/// whereas a raw subscription keeps its entity selectors verbatim.
pub fn build_entity_raw(
    context: &EntityContext,
    mode: AttributeMode,
    index: u32,
) -> Result<String, JsonWriterError> {
    entity_node(context, mode, Style::Raw, index).to_json_string()
}

pub fn build_entities_raw(
    context: &EntityContext,
    mode: AttributeMode,
) -> Result<Vec<String>, JsonWriterError> {
    (0..context.entities_count)
        .map(|index| build_entity_raw(context, mode, index))
        .collect()
}

fn entity_node(context: &EntityContext, mode: AttributeMode, style: Style, index: u32) -> JsonNode {
    let count = context.entities_count;
    let prefix = context.entities_prefix.unwrap_or(EntitiesPrefix::Id);
    let mut entity = JsonNode::object();

    if let Some(entity_type) = context.entity_type.value() {
        let entity_type = match prefix {
            EntitiesPrefix::Type => numbered_name(entity_type, count, index),
            EntitiesPrefix::Id => entity_type.clone(),
        };
        entity.push_member("type", JsonNode::String(entity_type));
    }
    if let Some(entity_id) = context.entity_id.value() {
        let entity_id = match prefix {
            EntitiesPrefix::Id => numbered_name(entity_id, count, index),
            EntitiesPrefix::Type => entity_id.clone(),
        };
        entity.push_member("id", JsonNode::String(entity_id));
    }

    if let JsonNode::Object(attributes) = attributes_node(context, mode, style) {
        for (name, attribute) in attributes {
            entity.push_member(name, attribute);
        }
    }
    entity
}

fn attributes_node(context: &EntityContext, mode: AttributeMode, style: Style) -> JsonNode {
    let mut attributes = JsonNode::object();
    let Some(name) = context.attribute_name.value() else {
        return attributes;
    };

    let attribute = attribute_node(context, mode, style);
    for index in 0..context.attribute_count {
        attributes.push_member(
            numbered_name(name, context.attribute_count, index),
            attribute.clone(),
        );
    }
    attributes
}

fn attribute_node(context: &EntityContext, mode: AttributeMode, style: Style) -> JsonNode {
    let value = context.attribute_value.value();
    match mode {
        AttributeMode::KeyValues => match value {
            Some(value) => style.leaf(value),
            None => JsonNode::Null,
        },
        AttributeMode::Normalized => {
            let mut attribute = JsonNode::object();
            if let Some(attribute_type) = context.attribute_type.value() {
                attribute.push_member("type", JsonNode::string(attribute_type));
            }
            let metadata = metadata_node(context, style);
            if !metadata.is_empty_object() {
                attribute.push_member("metadata", metadata);
            }
            if let Some(value) = value {
                attribute.push_member("value", style.leaf(value));
            }
            attribute
        }
    }
}

fn metadata_node(context: &EntityContext, style: Style) -> JsonNode {
    let mut metadata = JsonNode::object();
    let Some(name) = context.metadata_name.value() else {
        return metadata;
    };

    let mut item = JsonNode::object();
    if let Some(metadata_type) = context.metadata_type.value() {
        item.push_member("type", JsonNode::string(metadata_type));
    }
    if let Some(value) = context.metadata_value.value() {
        item.push_member("value", style.leaf(value));
    }
    for index in 0..context.metadata_count {
        metadata.push_member(
            numbered_name(name, context.metadata_count, index),
            item.clone(),
        );
    }
    metadata
}
