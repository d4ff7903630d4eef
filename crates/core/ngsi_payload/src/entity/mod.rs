//! Entities and their attributes.

mod payload;

pub use payload::*;

use crate::field::decode_count;
use crate::field::resolve_count;
use crate::Field;
use crate::FieldKind;
use crate::StepTable;
use serde::Deserialize;
use tracing::warn;

pub const ENTITIES_NUMBER: &str = "entities_number";
pub const ENTITIES_PREFIX: &str = "entities_prefix";
pub const ENTITIES_TYPE: &str = "entities_type";
pub const ENTITIES_ID: &str = "entities_id";
pub const ATTRIBUTES_NUMBER: &str = "attributes_number";
pub const ATTRIBUTES_NAME: &str = "attributes_name";
pub const ATTRIBUTES_VALUE: &str = "attributes_value";
pub const ATTRIBUTES_TYPE: &str = "attributes_type";
pub const METADATAS_NUMBER: &str = "metadatas_number";
pub const METADATAS_NAME: &str = "metadatas_name";
pub const METADATAS_TYPE: &str = "metadatas_type";
pub const METADATAS_VALUE: &str = "metadatas_value";

/// Entity parameters whose `random=<N>` tokens are substituted.
pub const ENTITY_RANDOM_LABELS: &[&str] = &[
    ENTITIES_TYPE,
    ENTITIES_ID,
    ATTRIBUTES_NAME,
    ATTRIBUTES_VALUE,
    ATTRIBUTES_TYPE,
    METADATAS_NAME,
    METADATAS_TYPE,
    METADATAS_VALUE,
];

/// How attribute values are represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeMode {
    /// `{"type": .., "metadata": .., "value": ..}`
    #[default]
    Normalized,
    /// The value alone
    KeyValues,
}

impl AttributeMode {
    /// The `options` query parameter telling the broker which representation is used.
    pub fn options_query(self) -> Option<&'static str> {
        match self {
            AttributeMode::Normalized => None,
            AttributeMode::KeyValues => Some("keyValues"),
        }
    }
}

/// Which field of several generated entities gets the `_<index>` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntitiesPrefix {
    Id,
    Type,
}

impl EntitiesPrefix {
    pub(crate) fn decode(parameter: &str, raw: &str) -> Field<EntitiesPrefix> {
        match raw {
            "id" => Field::Value(EntitiesPrefix::Id),
            "type" => Field::Value(EntitiesPrefix::Type),
            crate::SAME_AS_PREVIOUS => Field::SameAsPrevious,
            _ => {
                warn!("Ignoring {parameter:?}: expected `id` or `type`, found {raw:?}");
                Field::Absent
            }
        }
    }
}

/// The entity parameters of one step, as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityInput {
    pub entities_count: Field<u32>,
    pub entities_prefix: Field<EntitiesPrefix>,
    pub entity_type: Field<String>,
    pub entity_id: Field<String>,
    pub attribute_count: Field<u32>,
    pub attribute_name: Field<String>,
    pub attribute_value: Field<String>,
    pub attribute_type: Field<String>,
    pub metadata_count: Field<u32>,
    pub metadata_name: Field<String>,
    pub metadata_type: Field<String>,
    pub metadata_value: Field<String>,
}

/// The entity parameters of one step, once resolved against the previous step.
///
/// No field is [Field::SameAsPrevious] and the counts are consistent with the names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityContext {
    pub entities_count: u32,
    pub entities_prefix: Option<EntitiesPrefix>,
    pub entity_type: Field<String>,
    pub entity_id: Field<String>,
    pub attribute_count: u32,
    pub attribute_name: Field<String>,
    pub attribute_value: Field<String>,
    pub attribute_type: Field<String>,
    pub metadata_count: u32,
    pub metadata_name: Field<String>,
    pub metadata_type: Field<String>,
    pub metadata_value: Field<String>,
}

impl Default for EntityContext {
    fn default() -> Self {
        EntityInput::default().resolve(None)
    }
}

impl EntityInput {
    /// Decode a step table: random tokens, then sentinels.
    ///
    /// Unknown parameters are reported and ignored.
    pub fn from_table(table: &StepTable) -> Self {
        let table = crate::substitute_random(ENTITY_RANDOM_LABELS, table.clone());
        let mut input = EntityInput::default();
        for (parameter, raw) in table.iter() {
            match parameter {
                ENTITIES_NUMBER => input.entities_count = decode_count(parameter, raw),
                ENTITIES_PREFIX => input.entities_prefix = EntitiesPrefix::decode(parameter, raw),
                ENTITIES_TYPE => input.entity_type = Field::decode(raw, FieldKind::Type),
                ENTITIES_ID => input.entity_id = Field::decode(raw, FieldKind::Text),
                ATTRIBUTES_NUMBER => input.attribute_count = decode_count(parameter, raw),
                ATTRIBUTES_NAME => input.attribute_name = Field::decode(raw, FieldKind::Text),
                ATTRIBUTES_VALUE => input.attribute_value = Field::decode(raw, FieldKind::Text),
                ATTRIBUTES_TYPE => input.attribute_type = Field::decode(raw, FieldKind::Type),
                METADATAS_NUMBER => input.metadata_count = decode_count(parameter, raw),
                METADATAS_NAME => input.metadata_name = Field::decode(raw, FieldKind::Text),
                METADATAS_TYPE => input.metadata_type = Field::decode(raw, FieldKind::Type),
                METADATAS_VALUE => input.metadata_value = Field::decode(raw, FieldKind::Text),
                unknown => warn!("Unknown entity parameter {unknown:?} is ignored"),
            }
        }
        input
    }

    pub fn resolve(self, previous: Option<&EntityContext>) -> EntityContext {
        let entities_prefix = match self.entities_prefix {
            Field::Value(prefix) => Some(prefix),
            Field::SameAsPrevious => previous.and_then(|p| p.entities_prefix),
            Field::Absent | Field::Empty => None,
        };
        let attribute_name = self
            .attribute_name
            .resolve(ATTRIBUTES_NAME, previous.map(|p| &p.attribute_name));
        let metadata_name = self
            .metadata_name
            .resolve(METADATAS_NAME, previous.map(|p| &p.metadata_name));

        let mut attribute_count = resolve_count(
            ATTRIBUTES_NUMBER,
            self.attribute_count,
            previous.map(|p| p.attribute_count),
            0,
        );
        if attribute_count == 0 && !attribute_name.is_absent() {
            attribute_count = 1;
        }
        let mut metadata_count = resolve_count(
            METADATAS_NUMBER,
            self.metadata_count,
            previous.map(|p| p.metadata_count),
            0,
        );
        if metadata_count == 0 && !metadata_name.is_absent() {
            metadata_count = 1;
        }

        EntityContext {
            entities_count: resolve_count(
                ENTITIES_NUMBER,
                self.entities_count,
                previous.map(|p| p.entities_count),
                1,
            )
            .max(1),
            entities_prefix,
            entity_type: self
                .entity_type
                .resolve(ENTITIES_TYPE, previous.map(|p| &p.entity_type)),
            entity_id: self
                .entity_id
                .resolve(ENTITIES_ID, previous.map(|p| &p.entity_id)),
            attribute_count,
            attribute_name,
            attribute_value: self
                .attribute_value
                .resolve(ATTRIBUTES_VALUE, previous.map(|p| &p.attribute_value)),
            attribute_type: self
                .attribute_type
                .resolve(ATTRIBUTES_TYPE, previous.map(|p| &p.attribute_type)),
            metadata_count,
            metadata_name,
            metadata_type: self
                .metadata_type
                .resolve(METADATAS_TYPE, previous.map(|p| &p.metadata_type)),
            metadata_value: self
                .metadata_value
                .resolve(METADATAS_VALUE, previous.map(|p| &p.metadata_value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decode_a_full_table() {
        let table = StepTable::new()
            .with(ENTITIES_NUMBER, "2")
            .with(ENTITIES_PREFIX, "type")
            .with(ENTITIES_TYPE, "none")
            .with(ENTITIES_ID, "Room1")
            .with(ATTRIBUTES_NAME, "temperature")
            .with(ATTRIBUTES_VALUE, "the same value of the previous request")
            .with(METADATAS_NAME, "accuracy");

        let input = EntityInput::from_table(&table);

        assert_eq!(
            input,
            EntityInput {
                entities_count: Field::Value(2),
                entities_prefix: Field::Value(EntitiesPrefix::Type),
                entity_type: Field::Absent,
                entity_id: Field::Value("Room1".to_string()),
                attribute_name: Field::Value("temperature".to_string()),
                attribute_value: Field::SameAsPrevious,
                metadata_name: Field::Value("accuracy".to_string()),
                ..EntityInput::default()
            }
        );
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let table = StepTable::new()
            .with("entities_colour", "blue")
            .with(ENTITIES_ID, "Room1");

        let input = EntityInput::from_table(&table);

        assert_eq!(
            input,
            EntityInput {
                entity_id: Field::Value("Room1".to_string()),
                ..EntityInput::default()
            }
        );
    }

    #[test]
    fn counts_are_coerced_when_names_are_given() {
        let table = StepTable::new()
            .with(ATTRIBUTES_NAME, "temperature")
            .with(METADATAS_NAME, "accuracy")
            .with(ENTITIES_NUMBER, "0");

        let context = EntityInput::from_table(&table).resolve(None);

        assert_eq!(context.entities_count, 1);
        assert_eq!(context.attribute_count, 1);
        assert_eq!(context.metadata_count, 1);
    }

    #[test]
    fn counts_stay_at_zero_without_names() {
        let context = EntityContext::default();
        assert_eq!(context.attribute_count, 0);
        assert_eq!(context.metadata_count, 0);
        assert_eq!(context.entities_count, 1);
    }

    #[test]
    fn same_as_previous_takes_the_previous_step_values() {
        let first = EntityInput::from_table(
            &StepTable::new()
                .with(ENTITIES_ID, "random=10")
                .with(ATTRIBUTES_NAME, "temperature")
                .with(ATTRIBUTES_NUMBER, "3")
                .with(ENTITIES_PREFIX, "id"),
        )
        .resolve(None);

        let second = EntityInput::from_table(
            &StepTable::new()
                .with(ENTITIES_ID, "the same value of the previous request")
                .with(ATTRIBUTES_NUMBER, "the same value of the previous request")
                .with(ENTITIES_PREFIX, "the same value of the previous request")
                .with(ATTRIBUTES_NAME, "pressure"),
        )
        .resolve(Some(&first));

        assert_eq!(first.entity_id.value().map(String::len), Some(10));
        assert_eq!(second.entity_id, first.entity_id);
        assert_eq!(second.attribute_count, 3);
        assert_eq!(second.entities_prefix, Some(EntitiesPrefix::Id));
        assert_eq!(second.attribute_name, Field::Value("pressure".to_string()));
    }

    #[test]
    fn invalid_prefix_is_ignored() {
        let input = EntityInput::from_table(&StepTable::new().with(ENTITIES_PREFIX, "name"));
        assert_eq!(input.entities_prefix, Field::Absent);
    }
}
