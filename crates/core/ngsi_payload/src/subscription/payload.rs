use super::ConditionContext;
use super::NotificationContext;
use super::Pairs;
use super::SubjectContext;
use super::SubscriptionContext;
use crate::style::Style;
use crate::EntitiesPrefix;
use crate::Field;
use json_writer::JsonNode;
use json_writer::JsonWriterError;
use serde_json::Value;

const DEFAULT_NOTIFICATION_KIND: &str = "http";

/// The `subject` member, `None` when omitted or empty.
pub fn build_subscription_subject(context: &SubscriptionContext) -> Option<Value> {
    subject_node(&context.subject, Style::Structured).map(Value::from)
}

/// The `subject` member as JSON text, ids, types and patterns being verbatim.
pub fn build_subscription_subject_raw(
    context: &SubscriptionContext,
) -> Result<Option<String>, JsonWriterError> {
    subject_node(&context.subject, Style::Raw)
        .map(|subject| subject.to_json_string())
        .transpose()
}

/// The `condition` member of the subject, `None` when there is nothing to tell.
pub fn build_subscription_condition(context: &SubscriptionContext) -> Option<Value> {
    condition_node(&context.subject.condition, Style::Structured).map(Value::from)
}

/// The `notification` member, `None` when empty.
pub fn build_subscription_notification(context: &SubscriptionContext) -> Option<Value> {
    notification_node(&context.notification, Style::Structured).map(Value::from)
}

/// The `notification` member as JSON text, url, method, payload and attribute names being verbatim.
pub fn build_subscription_notification_raw(
    context: &SubscriptionContext,
) -> Result<Option<String>, JsonWriterError> {
    notification_node(&context.notification, Style::Raw)
        .map(|notification| notification.to_json_string())
        .transpose()
}

/// The whole subscription.
///
/// `throttling` is a number when it parses as one, a string otherwise.
pub fn build_subscription(context: &SubscriptionContext) -> Value {
    Value::from(subscription_node(context, Style::Structured))
}

/// The whole subscription as JSON text, every value taken from the step table being verbatim.
pub fn build_subscription_raw(context: &SubscriptionContext) -> Result<String, JsonWriterError> {
    subscription_node(context, Style::Raw).to_json_string()
}

fn subscription_node(context: &SubscriptionContext, style: Style) -> JsonNode {
    let mut subscription = JsonNode::object();
    if let Some(description) = context.description.value() {
        subscription.push_member("description", style.leaf(description));
    }
    if let Some(subject) = subject_node(&context.subject, style) {
        subscription.push_member("subject", subject);
    }
    if let Some(notification) = notification_node(&context.notification, style) {
        subscription.push_member("notification", notification);
    }
    if let Some(expires) = context.expires.value() {
        subscription.push_member("expires", style.leaf(expires));
    }
    if let Some(status) = context.status.value() {
        subscription.push_member("status", style.leaf(status));
    }
    if let Some(throttling) = context.throttling.value() {
        subscription.push_member("throttling", throttling_node(throttling, style));
    }
    subscription
}

fn throttling_node(throttling: &str, style: Style) -> JsonNode {
    match (style, throttling.trim().parse::<u64>()) {
        (Style::Structured, Ok(seconds)) => JsonNode::Number(seconds.into()),
        _ => style.leaf(throttling),
    }
}

fn subject_node(subject: &SubjectContext, style: Style) -> Option<JsonNode> {
    if subject.omitted {
        return None;
    }

    let mut node = JsonNode::object();
    let entities: Vec<JsonNode> = (0..subject.entities_count)
        .map(|index| entity_selector(subject, style, index))
        .filter(|selector| !selector.is_empty_object())
        .collect();
    if !entities.is_empty() {
        node.push_member("entities", JsonNode::Array(entities));
    }
    if let Some(condition) = condition_node(&subject.condition, style) {
        node.push_member("condition", condition);
    }

    (!node.is_empty_object()).then_some(node)
}

fn entity_selector(subject: &SubjectContext, style: Style, index: u32) -> JsonNode {
    let count = subject.entities_count;
    let prefix = subject.entities_prefix.unwrap_or(EntitiesPrefix::Id);
    let mut selector = JsonNode::object();

    if let Some(id) = subject.entity_id.value() {
        let id = match prefix {
            EntitiesPrefix::Id => style.numbered_leaf(id, count, index),
            EntitiesPrefix::Type => style.leaf(id),
        };
        selector.push_member("id", id);
    }
    if let Some(id_pattern) = subject.id_pattern.value() {
        selector.push_member("idPattern", style.leaf(id_pattern));
    }
    if let Some(entity_type) = subject.entity_type.value() {
        let entity_type = match prefix {
            EntitiesPrefix::Type => style.numbered_leaf(entity_type, count, index),
            EntitiesPrefix::Id => style.leaf(entity_type),
        };
        selector.push_member("type", entity_type);
    }
    if let Some(type_pattern) = subject.type_pattern.value() {
        selector.push_member("typePattern", style.leaf(type_pattern));
    }
    selector
}

fn condition_node(condition: &ConditionContext, style: Style) -> Option<JsonNode> {
    let mut node = JsonNode::object();
    if let Some(attrs) = numbered_list(&condition.attrs, condition.attrs_count, style) {
        node.push_member("attrs", attrs);
    }
    if let Some(expression) = pairs_object(&condition.expression, style) {
        node.push_member("expression", expression);
    }
    (!node.is_empty_object()).then_some(node)
}

fn notification_node(notification: &NotificationContext, style: Style) -> Option<JsonNode> {
    let mut node = JsonNode::object();

    if !notification.omit_http {
        if let Some(http) = http_node(notification, style) {
            let kind = notification
                .kind
                .value()
                .map(String::as_str)
                .unwrap_or(DEFAULT_NOTIFICATION_KIND);
            node.push_member(kind, http);
        }
    }
    if let Some(attrs) = numbered_list(&notification.attrs, notification.attrs_count, style) {
        node.push_member("attrs", attrs);
    }
    if let Some(except_attrs) =
        numbered_list(&notification.except_attrs, notification.attrs_count, style)
    {
        node.push_member("exceptAttrs", except_attrs);
    }
    if let Some(attrs_format) = notification.attrs_format.value() {
        node.push_member("attrsFormat", style.leaf(attrs_format));
    }
    match &notification.metadata {
        Field::Value(names) => node.push_member(
            "metadata",
            JsonNode::Array(names.iter().map(|name| style.leaf(name)).collect()),
        ),
        Field::Empty => node.push_member("metadata", JsonNode::Array(vec![])),
        Field::Absent | Field::SameAsPrevious => {}
    }

    (!node.is_empty_object()).then_some(node)
}

/// Url, headers, query string, method and payload share one object once any of them is given.
fn http_node(notification: &NotificationContext, style: Style) -> Option<JsonNode> {
    let mut http = JsonNode::object();
    if let Some(url) = notification.url.value() {
        http.push_member("url", style.leaf(url));
    }
    if let Some(headers) = pairs_object(&notification.headers, style) {
        http.push_member("headers", headers);
    }
    if let Some(qs) = pairs_object(&notification.qs, style) {
        http.push_member("qs", qs);
    }
    if let Some(method) = notification.method.value() {
        http.push_member("method", style.leaf(method));
    }
    if let Some(payload) = notification.payload.value() {
        http.push_member("payload", style.leaf(payload));
    }
    (!http.is_empty_object()).then_some(http)
}

/// `[name_0, .., name_{N-1}]`, or `[]` when explicitly empty.
fn numbered_list(attrs: &Field<String>, count: u32, style: Style) -> Option<JsonNode> {
    match attrs {
        Field::Value(name) => Some(JsonNode::Array(
            (0..count.max(1))
                .map(|index| style.numbered_leaf(name, count, index))
                .collect(),
        )),
        Field::Empty => Some(JsonNode::Array(vec![])),
        Field::Absent | Field::SameAsPrevious => None,
    }
}

/// `{key: value, ..}`, or `{}` when explicitly empty.
fn pairs_object(pairs: &Field<Pairs>, style: Style) -> Option<JsonNode> {
    match pairs {
        Field::Value(pairs) => Some(JsonNode::Object(
            pairs
                .iter()
                .map(|(key, value)| (key.clone(), style.leaf(value)))
                .collect(),
        )),
        Field::Empty => Some(JsonNode::object()),
        Field::Absent | Field::SameAsPrevious => None,
    }
}
