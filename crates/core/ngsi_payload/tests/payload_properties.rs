use assert_json_diff::assert_json_eq;
use ngsi_payload::entity::*;
use ngsi_payload::subscription::*;
use ngsi_payload::*;
use proptest::prelude::*;
use serde_json::json;
use serde_json::Value;

fn entity_table(count: u32, name: &str) -> StepTable {
    StepTable::new()
        .with(ENTITIES_TYPE, "Room")
        .with(ENTITIES_ID, "Room1")
        .with(ATTRIBUTES_NUMBER, count.to_string())
        .with(ATTRIBUTES_NAME, name)
        .with(ATTRIBUTES_VALUE, "20")
        .with(ATTRIBUTES_TYPE, "celsius")
}

#[test]
fn room_example_in_both_modes() {
    let context = EntityInput::from_table(&entity_table(2, "temp")).resolve(None);

    assert_json_eq!(
        build_entity(&context, AttributeMode::Normalized, 0),
        json!({
            "type": "Room",
            "id": "Room1",
            "temp_0": {"type": "celsius", "value": "20"},
            "temp_1": {"type": "celsius", "value": "20"}
        })
    );
    assert_json_eq!(
        build_entity(&context, AttributeMode::KeyValues, 0),
        json!({"type": "Room", "id": "Room1", "temp_0": "20", "temp_1": "20"})
    );
}

#[test]
fn previous_values_flow_through_a_scenario() {
    let scenario = Scenario::new()
        .with_entity_table(
            &StepTable::new()
                .with(ENTITIES_ID, "random=8")
                .with(ATTRIBUTES_NAME, "temperature")
                .with(ATTRIBUTES_VALUE, "random=5"),
        )
        .with_entity_table(
            &StepTable::new()
                .with(ENTITIES_ID, "the same value of the previous request")
                .with(ATTRIBUTES_NAME, "temperature")
                .with(ATTRIBUTES_VALUE, "the same value of the previous request"),
        );

    let previous = build_entity(scenario.previous_entity().unwrap(), AttributeMode::KeyValues, 0);
    let current = build_entity(scenario.entity().unwrap(), AttributeMode::KeyValues, 0);

    assert_eq!(previous["id"].as_str().map(str::len), Some(8));
    assert_eq!(previous["temperature"].as_str().map(str::len), Some(5));
    assert_eq!(previous, current);
}

#[test]
fn removed_subscription_members_are_carried_through_a_scenario() {
    let scenario = Scenario::new()
        .with_subscription_table(
            &StepTable::new()
                .with(SUBJECT_TYPE, "without subject field")
                .with(NOTIFICATION_HTTP_URL, "without notification field")
                .with(NOTIFICATION_ATTRS_FORMAT, "normalized"),
        )
        .with_subscription_table(
            &StepTable::new()
                .with(SUBJECT_ID, "Room1")
                .with(SUBJECT_TYPE, "the same value of the previous request")
                .with(NOTIFICATION_HTTP_URL, "the same value of the previous request")
                .with(NOTIFICATION_HTTP_METHOD, "POST")
                .with(NOTIFICATION_ATTRS_FORMAT, "normalized"),
        );

    let first = build_subscription(scenario.previous_subscription().unwrap());
    let second = build_subscription(scenario.subscription().unwrap());

    assert_json_eq!(first, json!({"notification": {"attrsFormat": "normalized"}}));
    assert_json_eq!(second, first);
}

#[test]
fn raw_payloads_with_literal_values_parse() -> anyhow::Result<()> {
    let literals = [
        "true",
        "false",
        "null",
        "-12.5e3",
        "\"2017-06-17T07:21:24.238Z\"",
        "\"40.418889, -3.691944\"",
        "[[1,2],[3,4]]",
        "{\"a\": {\"b\": [true]}}",
    ];

    for literal in literals {
        for mode in [AttributeMode::Normalized, AttributeMode::KeyValues] {
            let context = EntityInput::from_table(
                &StepTable::new()
                    .with(ENTITIES_ID, "Room1")
                    .with(ATTRIBUTES_NAME, "attr")
                    .with(ATTRIBUTES_NUMBER, "3")
                    .with(ATTRIBUTES_VALUE, literal)
                    .with(METADATAS_NAME, "meta")
                    .with(METADATAS_VALUE, literal),
            )
            .resolve(None);

            let raw = build_entity_raw(&context, mode, 0)?;
            let parsed: Value = serde_json::from_str(&raw)?;
            let expected: Value = serde_json::from_str(literal)?;
            let attribute = &parsed["attr_2"];
            match mode {
                AttributeMode::KeyValues => assert_eq!(attribute, &expected),
                AttributeMode::Normalized => {
                    assert_eq!(attribute["value"], expected);
                    assert_eq!(attribute["metadata"]["meta"]["value"], expected);
                }
            }
        }
    }
    Ok(())
}

#[test]
fn raw_subscription_round_trips() -> anyhow::Result<()> {
    let context = SubscriptionInput::from_table(
        &StepTable::new()
            .with(DESCRIPTION, "\"random=6\"")
            .with(SUBJECT_ID_PATTERN, "\".*\"")
            .with(SUBJECT_TYPE, "\"Room\"")
            .with(CONDITION_ATTRS, "\"temperature\"")
            .with(CONDITION_ATTRS_NUMBER, "2")
            .with(CONDITION_EXPRESSION, "q>>>\"temperature>40\"")
            .with(NOTIFICATION_HTTP_URL, "\"http://localhost:1234\"")
            .with(NOTIFICATION_ATTRS, "array is empty")
            .with(NOTIFICATION_METADATA, "\"previousValue\"")
            .with(EXPIRES, "\"2030-04-05T14:00:00.00Z\"")
            .with(THROTTLING, "5"),
    )
    .resolve(None);

    let raw = build_subscription_raw(&context)?;
    let parsed: Value = serde_json::from_str(&raw)?;

    assert_eq!(parsed["description"].as_str().map(str::len), Some(6));
    assert_json_eq!(
        parsed["subject"],
        json!({
            "entities": [{"idPattern": ".*", "type": "Room"}],
            "condition": {
                "attrs": ["temperature_0", "temperature_1"],
                "expression": {"q": "temperature>40"}
            }
        })
    );
    assert_json_eq!(
        parsed["notification"],
        json!({
            "http": {"url": "http://localhost:1234"},
            "attrs": [],
            "metadata": ["previousValue"]
        })
    );
    assert_eq!(parsed["throttling"], json!(5));
    Ok(())
}

proptest! {
    #[test]
    fn attribute_names_follow_the_count(count in 1u32..20, name in "[a-zA-Z][a-zA-Z0-9]{0,10}") {
        let context = EntityInput::from_table(&entity_table(count, &name)).resolve(None);

        for mode in [AttributeMode::Normalized, AttributeMode::KeyValues] {
            let attributes = build_attributes(&context, mode);
            let names: Vec<&String> = attributes.keys().collect();

            if count == 1 {
                prop_assert_eq!(names, vec![&name]);
            } else {
                let expected: Vec<String> = (0..count).map(|i| format!("{name}_{i}")).collect();
                prop_assert_eq!(names, expected.iter().collect::<Vec<_>>());
            }

            let first = attributes.values().next().cloned();
            prop_assert!(attributes.values().all(|value| Some(value) == first.as_ref()));
        }
    }

    #[test]
    fn raw_entities_always_parse(count in 1u32..5, value in -1000i64..1000) {
        let table = entity_table(count, "level").with(ATTRIBUTES_VALUE, value.to_string());
        let context = EntityInput::from_table(&table).resolve(None);

        let raw = build_entity_raw(&context, AttributeMode::Normalized, 0).unwrap();
        let parsed: Value = serde_json::from_str(&raw).unwrap();

        let level = if count == 1 { "level".to_string() } else { format!("level_{}", count - 1) };
        prop_assert_eq!(&parsed[&level]["value"], &json!(value));
    }
}
