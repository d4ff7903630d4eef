//! Subscriptions: subject, condition and notification.

mod payload;

pub use payload::*;

use crate::field::decode_count;
use crate::field::parse_pairs;
use crate::field::resolve_count;
use crate::EntitiesPrefix;
use crate::Field;
use crate::FieldKind;
use crate::StepTable;
use crate::WITHOUT_NOTIFICATION_FIELD;
use crate::WITHOUT_SUBJECT_FIELD;
use tracing::warn;

pub const DESCRIPTION: &str = "description";
pub const SUBJECT_TYPE: &str = "subject_type";
pub const SUBJECT_ID: &str = "subject_id";
pub const SUBJECT_ID_PATTERN: &str = "subject_idPattern";
pub const SUBJECT_TYPE_PATTERN: &str = "subject_typePattern";
pub const SUBJECT_ENTITIES_NUMBER: &str = "subject_entities_number";
pub const SUBJECT_ENTITIES_PREFIX: &str = "subject_entities_prefix";
pub const CONDITION_ATTRS: &str = "condition_attrs";
pub const CONDITION_ATTRS_NUMBER: &str = "condition_attrs_number";
pub const CONDITION_EXPRESSION: &str = "condition_expression";
pub const NOTIFICATION_TYPE: &str = "notification_type";
pub const NOTIFICATION_HTTP_URL: &str = "notification_http_url";
pub const NOTIFICATION_HTTP_HEADERS: &str = "notification_http_headers";
pub const NOTIFICATION_HTTP_QS: &str = "notification_http_qs";
pub const NOTIFICATION_HTTP_METHOD: &str = "notification_http_method";
pub const NOTIFICATION_HTTP_PAYLOAD: &str = "notification_http_payload";
pub const NOTIFICATION_ATTRS: &str = "notification_attrs";
pub const NOTIFICATION_ATTRS_NUMBER: &str = "notification_attrs_number";
pub const NOTIFICATION_EXCEPT_ATTRS: &str = "notification_except_attrs";
pub const NOTIFICATION_ATTRS_FORMAT: &str = "notification_attrsFormat";
pub const NOTIFICATION_METADATA: &str = "notification_metadata";
pub const THROTTLING: &str = "throttling";
pub const EXPIRES: &str = "expires";
pub const STATUS: &str = "status";

/// Subscription parameters whose `random=<N>` tokens are substituted.
pub const SUBSCRIPTION_RANDOM_LABELS: &[&str] = &[
    DESCRIPTION,
    SUBJECT_TYPE,
    SUBJECT_ID,
    SUBJECT_ID_PATTERN,
    SUBJECT_TYPE_PATTERN,
    CONDITION_ATTRS,
    NOTIFICATION_HTTP_URL,
    NOTIFICATION_HTTP_PAYLOAD,
    NOTIFICATION_ATTRS,
    NOTIFICATION_EXCEPT_ATTRS,
];

pub type Pairs = Vec<(String, String)>;

/// The subscription parameters of one step, as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionInput {
    pub description: Field<String>,
    pub omit_subject: bool,
    pub entities_count: Field<u32>,
    pub entities_prefix: Field<EntitiesPrefix>,
    pub entity_type: Field<String>,
    pub entity_id: Field<String>,
    pub id_pattern: Field<String>,
    pub type_pattern: Field<String>,
    pub condition_attrs_count: Field<u32>,
    pub condition_attrs: Field<String>,
    pub condition_expression: Field<Pairs>,
    pub notification_kind: Field<String>,
    pub omit_http: bool,
    pub http_url: Field<String>,
    pub http_headers: Field<Pairs>,
    pub http_qs: Field<Pairs>,
    pub http_method: Field<String>,
    pub http_payload: Field<String>,
    pub notification_attrs_count: Field<u32>,
    pub notification_attrs: Field<String>,
    pub except_attrs: Field<String>,
    pub attrs_format: Field<String>,
    pub notification_metadata: Field<Vec<String>>,
    pub throttling: Field<String>,
    pub expires: Field<String>,
    pub status: Field<String>,
}

/// Entity selectors and condition of a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectContext {
    /// No `subject` member at all
    pub omitted: bool,
    pub entities_count: u32,
    pub entities_prefix: Option<EntitiesPrefix>,
    pub entity_type: Field<String>,
    pub entity_id: Field<String>,
    pub id_pattern: Field<String>,
    pub type_pattern: Field<String>,
    pub condition: ConditionContext,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionContext {
    pub attrs_count: u32,
    pub attrs: Field<String>,
    pub expression: Field<Pairs>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContext {
    /// Key of the http sub-object, `http` unless told otherwise
    pub kind: Field<String>,
    /// No http sub-object at all
    pub omit_http: bool,
    pub url: Field<String>,
    pub headers: Field<Pairs>,
    pub qs: Field<Pairs>,
    pub method: Field<String>,
    pub payload: Field<String>,
    pub attrs_count: u32,
    pub attrs: Field<String>,
    pub except_attrs: Field<String>,
    pub attrs_format: Field<String>,
    pub metadata: Field<Vec<String>>,
}

/// The subscription parameters of one step, once resolved against the previous step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionContext {
    pub description: Field<String>,
    pub subject: SubjectContext,
    pub notification: NotificationContext,
    pub throttling: Field<String>,
    pub expires: Field<String>,
    pub status: Field<String>,
}

impl Default for SubscriptionContext {
    fn default() -> Self {
        SubscriptionInput::default().resolve(None)
    }
}

impl SubscriptionInput {
    /// Decode a step table: random tokens, then sentinels.
    ///
    /// Unknown parameters are reported and ignored.
    pub fn from_table(table: &StepTable) -> Self {
        let table = crate::substitute_random(SUBSCRIPTION_RANDOM_LABELS, table.clone());
        let mut input = SubscriptionInput::default();
        for (parameter, raw) in table.iter() {
            match parameter {
                DESCRIPTION => input.description = Field::decode(raw, FieldKind::Text),
                SUBJECT_TYPE if raw == WITHOUT_SUBJECT_FIELD => input.omit_subject = true,
                SUBJECT_TYPE => input.entity_type = Field::decode(raw, FieldKind::Type),
                SUBJECT_ID => input.entity_id = Field::decode(raw, FieldKind::Text),
                SUBJECT_ID_PATTERN => input.id_pattern = Field::decode(raw, FieldKind::Text),
                SUBJECT_TYPE_PATTERN => input.type_pattern = Field::decode(raw, FieldKind::Text),
                SUBJECT_ENTITIES_NUMBER => input.entities_count = decode_count(parameter, raw),
                SUBJECT_ENTITIES_PREFIX => {
                    input.entities_prefix = EntitiesPrefix::decode(parameter, raw)
                }
                CONDITION_ATTRS => input.condition_attrs = Field::decode(raw, FieldKind::List),
                CONDITION_ATTRS_NUMBER => {
                    input.condition_attrs_count = decode_count(parameter, raw)
                }
                CONDITION_EXPRESSION => {
                    input.condition_expression =
                        Field::decode(raw, FieldKind::Object).map(|raw| parse_pairs(&raw))
                }
                NOTIFICATION_TYPE => input.notification_kind = Field::decode(raw, FieldKind::Text),
                NOTIFICATION_HTTP_URL if raw == WITHOUT_NOTIFICATION_FIELD => {
                    input.omit_http = true
                }
                NOTIFICATION_HTTP_URL => input.http_url = Field::decode(raw, FieldKind::Text),
                NOTIFICATION_HTTP_HEADERS => {
                    input.http_headers =
                        Field::decode(raw, FieldKind::Object).map(|raw| parse_pairs(&raw))
                }
                NOTIFICATION_HTTP_QS => {
                    input.http_qs =
                        Field::decode(raw, FieldKind::Object).map(|raw| parse_pairs(&raw))
                }
                NOTIFICATION_HTTP_METHOD => {
                    input.http_method = Field::decode(raw, FieldKind::Text)
                }
                NOTIFICATION_HTTP_PAYLOAD => {
                    input.http_payload = Field::decode(raw, FieldKind::Text)
                }
                NOTIFICATION_ATTRS => {
                    input.notification_attrs = Field::decode(raw, FieldKind::List)
                }
                NOTIFICATION_ATTRS_NUMBER => {
                    input.notification_attrs_count = decode_count(parameter, raw)
                }
                NOTIFICATION_EXCEPT_ATTRS => {
                    input.except_attrs = Field::decode(raw, FieldKind::List)
                }
                NOTIFICATION_ATTRS_FORMAT => {
                    input.attrs_format = Field::decode(raw, FieldKind::Text)
                }
                NOTIFICATION_METADATA => {
                    input.notification_metadata =
                        Field::decode(raw, FieldKind::List).map(|raw| split_names(&raw))
                }
                THROTTLING => input.throttling = Field::decode(raw, FieldKind::Text),
                EXPIRES => input.expires = Field::decode(raw, FieldKind::Text),
                STATUS => input.status = Field::decode(raw, FieldKind::Text),
                unknown => warn!("Unknown subscription parameter {unknown:?} is ignored"),
            }
        }
        input
    }

    pub fn resolve(self, previous: Option<&SubscriptionContext>) -> SubscriptionContext {
        let subject = previous.map(|p| &p.subject);
        let condition = subject.map(|s| &s.condition);
        let notification = previous.map(|p| &p.notification);

        let entities_prefix = match self.entities_prefix {
            Field::Value(prefix) => Some(prefix),
            Field::SameAsPrevious => subject.and_then(|s| s.entities_prefix),
            Field::Absent | Field::Empty => None,
        };
        // The removal sentinels are the values of these fields too.
        let omit_subject = match self.entity_type {
            Field::SameAsPrevious => subject.is_some_and(|s| s.omitted),
            _ => self.omit_subject,
        };
        let omit_http = match self.http_url {
            Field::SameAsPrevious => notification.is_some_and(|n| n.omit_http),
            _ => self.omit_http,
        };

        let condition_attrs = self
            .condition_attrs
            .resolve(CONDITION_ATTRS, condition.map(|c| &c.attrs));
        let condition_attrs_count = attrs_count(
            CONDITION_ATTRS_NUMBER,
            self.condition_attrs_count,
            condition.map(|c| c.attrs_count),
            &condition_attrs,
        );
        let notification_attrs = self
            .notification_attrs
            .resolve(NOTIFICATION_ATTRS, notification.map(|n| &n.attrs));
        let except_attrs = self
            .except_attrs
            .resolve(NOTIFICATION_EXCEPT_ATTRS, notification.map(|n| &n.except_attrs));
        let notification_attrs_count = attrs_count(
            NOTIFICATION_ATTRS_NUMBER,
            self.notification_attrs_count,
            notification.map(|n| n.attrs_count),
            if notification_attrs.is_absent() {
                &except_attrs
            } else {
                &notification_attrs
            },
        );

        SubscriptionContext {
            description: self
                .description
                .resolve(DESCRIPTION, previous.map(|p| &p.description)),
            subject: SubjectContext {
                omitted: omit_subject,
                entities_count: resolve_count(
                    SUBJECT_ENTITIES_NUMBER,
                    self.entities_count,
                    subject.map(|s| s.entities_count),
                    1,
                )
                .max(1),
                entities_prefix,
                entity_type: self
                    .entity_type
                    .resolve(SUBJECT_TYPE, subject.map(|s| &s.entity_type)),
                entity_id: self
                    .entity_id
                    .resolve(SUBJECT_ID, subject.map(|s| &s.entity_id)),
                id_pattern: self
                    .id_pattern
                    .resolve(SUBJECT_ID_PATTERN, subject.map(|s| &s.id_pattern)),
                type_pattern: self
                    .type_pattern
                    .resolve(SUBJECT_TYPE_PATTERN, subject.map(|s| &s.type_pattern)),
                condition: ConditionContext {
                    attrs_count: condition_attrs_count,
                    attrs: condition_attrs,
                    expression: self
                        .condition_expression
                        .resolve(CONDITION_EXPRESSION, condition.map(|c| &c.expression)),
                },
            },
            notification: NotificationContext {
                kind: self
                    .notification_kind
                    .resolve(NOTIFICATION_TYPE, notification.map(|n| &n.kind)),
                omit_http,
                url: self
                    .http_url
                    .resolve(NOTIFICATION_HTTP_URL, notification.map(|n| &n.url)),
                headers: self
                    .http_headers
                    .resolve(NOTIFICATION_HTTP_HEADERS, notification.map(|n| &n.headers)),
                qs: self
                    .http_qs
                    .resolve(NOTIFICATION_HTTP_QS, notification.map(|n| &n.qs)),
                method: self
                    .http_method
                    .resolve(NOTIFICATION_HTTP_METHOD, notification.map(|n| &n.method)),
                payload: self
                    .http_payload
                    .resolve(NOTIFICATION_HTTP_PAYLOAD, notification.map(|n| &n.payload)),
                attrs_count: notification_attrs_count,
                attrs: notification_attrs,
                except_attrs,
                attrs_format: self
                    .attrs_format
                    .resolve(NOTIFICATION_ATTRS_FORMAT, notification.map(|n| &n.attrs_format)),
                metadata: self
                    .notification_metadata
                    .resolve(NOTIFICATION_METADATA, notification.map(|n| &n.metadata)),
            },
            throttling: self
                .throttling
                .resolve(THROTTLING, previous.map(|p| &p.throttling)),
            expires: self.expires.resolve(EXPIRES, previous.map(|p| &p.expires)),
            status: self.status.resolve(STATUS, previous.map(|p| &p.status)),
        }
    }
}

/// At least one attribute as soon as a name is given.
fn attrs_count(name: &str, field: Field<u32>, previous: Option<u32>, attrs: &Field<String>) -> u32 {
    let count = resolve_count(name, field, previous, 0);
    match attrs {
        Field::Value(_) if count == 0 => 1,
        _ => count,
    }
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sentinels_are_decoded_at_the_boundary() {
        let input = SubscriptionInput::from_table(
            &StepTable::new()
                .with(SUBJECT_TYPE, "without subject field")
                .with(NOTIFICATION_HTTP_URL, "without notification field")
                .with(CONDITION_ATTRS, "array is empty")
                .with(CONDITION_EXPRESSION, "object is empty")
                .with(NOTIFICATION_HTTP_HEADERS, "object is empty")
                .with(NOTIFICATION_METADATA, "array is empty")
                .with(THROTTLING, "array is empty"),
        );

        assert!(input.omit_subject);
        assert!(input.omit_http);
        assert_eq!(input.entity_type, Field::Absent);
        assert_eq!(input.http_url, Field::Absent);
        assert_eq!(input.condition_attrs, Field::Empty);
        assert_eq!(input.condition_expression, Field::Empty);
        assert_eq!(input.http_headers, Field::Empty);
        assert_eq!(input.notification_metadata, Field::Empty);
        assert_eq!(input.throttling, Field::Value("array is empty".to_string()));
    }

    #[test]
    fn pairs_and_lists_are_parsed() {
        let input = SubscriptionInput::from_table(
            &StepTable::new()
                .with(CONDITION_EXPRESSION, "q>>>temperature>40&mq>>>temperature.accuracy<0.9")
                .with(NOTIFICATION_HTTP_QS, "type>>>Room")
                .with(NOTIFICATION_METADATA, "previousValue, actionType"),
        );

        assert_eq!(
            input.condition_expression,
            Field::Value(vec![
                ("q".to_string(), "temperature>40".to_string()),
                ("mq".to_string(), "temperature.accuracy<0.9".to_string()),
            ])
        );
        assert_eq!(
            input.http_qs,
            Field::Value(vec![("type".to_string(), "Room".to_string())])
        );
        assert_eq!(
            input.notification_metadata,
            Field::Value(vec!["previousValue".to_string(), "actionType".to_string()])
        );
    }

    #[test]
    fn attrs_counts_are_coerced() {
        let context = SubscriptionInput::from_table(
            &StepTable::new()
                .with(CONDITION_ATTRS, "temperature")
                .with(NOTIFICATION_EXCEPT_ATTRS, "pressure"),
        )
        .resolve(None);

        assert_eq!(context.subject.condition.attrs_count, 1);
        assert_eq!(context.notification.attrs_count, 1);
        assert_eq!(context.subject.entities_count, 1);
    }

    #[test]
    fn same_as_previous_resolves_nested_fields() {
        let first = SubscriptionInput::from_table(
            &StepTable::new()
                .with(SUBJECT_ID, "Room1")
                .with(CONDITION_ATTRS, "array is empty")
                .with(NOTIFICATION_HTTP_URL, "http://localhost:1234/notify")
                .with(NOTIFICATION_HTTP_HEADERS, "Fiware-Service>>>qa"),
        )
        .resolve(None);

        let second = SubscriptionInput::from_table(
            &StepTable::new()
                .with(SUBJECT_ID, "the same value of the previous request")
                .with(CONDITION_ATTRS, "the same value of the previous request")
                .with(NOTIFICATION_HTTP_URL, "the same value of the previous request")
                .with(NOTIFICATION_HTTP_HEADERS, "the same value of the previous request"),
        )
        .resolve(Some(&first));

        assert_eq!(second.subject.entity_id, first.subject.entity_id);
        assert_eq!(second.subject.condition.attrs, Field::Empty);
        assert_eq!(second.notification.url, first.notification.url);
        assert_eq!(second.notification.headers, first.notification.headers);
    }

    #[test]
    fn removed_members_stay_removed_in_the_next_step() {
        let first = SubscriptionInput::from_table(
            &StepTable::new()
                .with(SUBJECT_TYPE, "without subject field")
                .with(NOTIFICATION_HTTP_URL, "without notification field"),
        )
        .resolve(None);

        let second = SubscriptionInput::from_table(
            &StepTable::new()
                .with(SUBJECT_ID, "Room1")
                .with(SUBJECT_TYPE, "the same value of the previous request")
                .with(NOTIFICATION_HTTP_URL, "the same value of the previous request")
                .with(NOTIFICATION_HTTP_METHOD, "POST"),
        )
        .resolve(Some(&first));

        assert!(second.subject.omitted);
        assert!(second.notification.omit_http);

        let third = SubscriptionInput::from_table(
            &StepTable::new()
                .with(SUBJECT_ID, "Room1")
                .with(SUBJECT_TYPE, "Room")
                .with(NOTIFICATION_HTTP_URL, "http://localhost:1234"),
        )
        .resolve(Some(&second));

        assert!(!third.subject.omitted);
        assert!(!third.notification.omit_http);
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let input = SubscriptionInput::from_table(&StepTable::new().with("subject_colour", "red"));
        assert_eq!(input, SubscriptionInput::default());
    }
}
