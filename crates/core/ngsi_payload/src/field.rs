use tracing::warn;

/// Resolves to the value the same field had in the previous step.
pub const SAME_AS_PREVIOUS: &str = "the same value of the previous request";
/// Marks a type field as absent.
pub const NONE: &str = "none";
/// Forces an explicit `[]`.
pub const ARRAY_IS_EMPTY: &str = "array is empty";
/// Forces an explicit `{}`.
pub const OBJECT_IS_EMPTY: &str = "object is empty";
/// Given as subject type, removes the whole `subject` member.
pub const WITHOUT_SUBJECT_FIELD: &str = "without subject field";
/// Given as notification url, removes the whole `http` sub-object.
pub const WITHOUT_NOTIFICATION_FIELD: &str = "without notification field";

/// An input field, once the sentinel strings of the step table have been decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Absent,
    Empty,
    SameAsPrevious,
    Value(T),
}

/// Which sentinels a field understands, besides [SAME_AS_PREVIOUS].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// `none` means absent
    Type,
    /// `array is empty` means `[]`
    List,
    /// `object is empty` means `{}`
    Object,
}

impl Field<String> {
    pub fn decode(raw: &str, kind: FieldKind) -> Self {
        match (raw, kind) {
            (SAME_AS_PREVIOUS, _) => Field::SameAsPrevious,
            (NONE, FieldKind::Type) => Field::Absent,
            (ARRAY_IS_EMPTY, FieldKind::List) => Field::Empty,
            (OBJECT_IS_EMPTY, FieldKind::Object) => Field::Empty,
            _ => Field::Value(raw.to_string()),
        }
    }
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Empty => Field::Empty,
            Field::SameAsPrevious => Field::SameAsPrevious,
            Field::Value(value) => Field::Value(f(value)),
        }
    }
}

impl<T: Clone> Field<T> {
    /// Replace [Field::SameAsPrevious] by the field of the previous snapshot.
    ///
    /// With no previous snapshot the field becomes absent.
    pub fn resolve(self, name: &str, previous: Option<&Field<T>>) -> Field<T> {
        match self {
            Field::SameAsPrevious => match previous {
                Some(previous) => previous.clone(),
                None => {
                    warn!("No previous request to take the value of {name:?} from");
                    Field::Absent
                }
            },
            field => field,
        }
    }
}

/// A count that keeps its default unless the step table gives one.
pub(crate) fn resolve_count(
    name: &str,
    field: Field<u32>,
    previous: Option<u32>,
    default: u32,
) -> u32 {
    match field {
        Field::Value(count) => count,
        Field::SameAsPrevious => match previous {
            Some(count) => count,
            None => {
                warn!("No previous request to take the value of {name:?} from");
                default
            }
        },
        Field::Absent | Field::Empty => default,
    }
}

pub(crate) fn decode_count(name: &str, raw: &str) -> Field<u32> {
    if raw == SAME_AS_PREVIOUS {
        return Field::SameAsPrevious;
    }
    match raw.trim().parse() {
        Ok(count) => Field::Value(count),
        Err(_) => {
            warn!("Ignoring {name:?}: {raw:?} is not a valid count");
            Field::Absent
        }
    }
}

/// `key>>>value&key>>>value` pairs, as used for expressions, headers and query strings.
pub fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| match pair.split_once(">>>") {
            Some((key, value)) => Some((key.to_string(), value.to_string())),
            None => {
                warn!("Ignoring {pair:?}: expected a `key>>>value` pair");
                None
            }
        })
        .collect()
}

/// `{name}_{index}` when there are several siblings, `name` alone otherwise.
pub fn numbered_name(name: &str, count: u32, index: u32) -> String {
    if count > 1 {
        format!("{name}_{index}")
    } else {
        name.to_string()
    }
}

/// Same as [numbered_name] for a verbatim token: a quoted token gets the suffix inside its quotes.
pub fn numbered_literal(token: &str, count: u32, index: u32) -> String {
    if count <= 1 {
        return token.to_string();
    }
    match token.strip_suffix('"') {
        Some(head) if token.len() >= 2 => format!("{head}_{index}\""),
        _ => format!("{token}_{index}"),
    }
}
