//! Domain models for row identifiers, selection directives, and messages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Tag carried by every message that replaces a resource selection.
pub const SET_RESOURCE_SELECTION: &str = "AOR/SET_RESOURCE_SELECTION";

/// Identifier of one displayed row. Records are keyed by either strings or numbers.
///
/// Integer keys that fit in `i64` land in [`RowId::Num`]; any other JSON number (fractions,
/// integers beyond `i64`) is kept as-is in [`RowId::Number`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Num(i64),
    Number(serde_json::Number),
    Str(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Num(value) => write!(f, "{value}"),
            RowId::Number(value) => write!(f, "{value}"),
            RowId::Str(value) => f.write_str(value),
        }
    }
}

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId::Str(value.to_owned())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        RowId::Str(value)
    }
}

impl From<i64> for RowId {
    fn from(value: i64) -> Self {
        RowId::Num(value)
    }
}

impl FromStr for RowId {
    type Err = std::convert::Infallible;

    /// Integers become [`RowId::Num`]; anything else is kept as a string key.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Ok(match trimmed.parse::<i64>() {
            Ok(number) => RowId::Num(number),
            Err(_) => RowId::Str(trimmed.to_owned()),
        })
    }
}

/// What the new selection should be, as requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionDirective {
    /// Every displayed row.
    All,
    /// No rows at all.
    None,
    /// The rows at these 0-based positions of the displayed list.
    Indices(Vec<usize>),
}

impl SelectionDirective {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SelectionDirective::All => "all",
            SelectionDirective::None => "none",
            SelectionDirective::Indices(_) => "indices",
        }
    }
}

impl FromStr for SelectionDirective {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "all" => return Ok(SelectionDirective::All),
            "none" => return Ok(SelectionDirective::None),
            "" => return Ok(SelectionDirective::Indices(Vec::new())),
            _ => {}
        }

        if !trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(DomainError::InvalidDirective(trimmed.to_owned()));
        }

        trimmed
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|source| DomainError::InvalidIndex {
                        token: token.to_owned(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(SelectionDirective::Indices)
    }
}

/// Kind tag of a dispatched message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    SetResourceSelection,
    Other(String),
}

impl MessageKind {
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::SetResourceSelection => SET_RESOURCE_SELECTION,
            MessageKind::Other(kind) => kind,
        }
    }
}

impl From<String> for MessageKind {
    fn from(value: String) -> Self {
        if value == SET_RESOURCE_SELECTION {
            MessageKind::SetResourceSelection
        } else {
            MessageKind::Other(value)
        }
    }
}

impl From<&str> for MessageKind {
    fn from(value: &str) -> Self {
        MessageKind::from(value.to_owned())
    }
}

impl From<MessageKind> for String {
    fn from(value: MessageKind) -> Self {
        match value {
            MessageKind::SetResourceSelection => SET_RESOURCE_SELECTION.to_owned(),
            MessageKind::Other(kind) => kind,
        }
    }
}

/// Routing information attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMeta {
    pub resource: String,
}

/// Any message a reducer may be offered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(default)]
    pub payload: Vec<RowId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MessageMeta>,
}

impl Message {
    /// Resource the message is routed to, if any.
    pub fn resource(&self) -> Option<&str> {
        self.meta.as_ref().map(|meta| meta.resource.as_str())
    }
}

/// Message produced by the selection action builder.
///
/// Serializes to
/// `{"type": "AOR/SET_RESOURCE_SELECTION", "payload": [...], "meta": {"resource": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub payload: Vec<RowId>,
    pub meta: MessageMeta,
}

impl SelectionMessage {
    pub fn new(resource: impl Into<String>, payload: Vec<RowId>) -> Self {
        Self {
            kind: MessageKind::SetResourceSelection,
            payload,
            meta: MessageMeta {
                resource: resource.into(),
            },
        }
    }

    pub fn resource(&self) -> &str {
        &self.meta.resource
    }
}

impl From<SelectionMessage> for Message {
    fn from(value: SelectionMessage) -> Self {
        Message {
            kind: value.kind,
            payload: value.payload,
            meta: Some(value.meta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_directive_tokens() {
        assert_eq!("all".parse::<SelectionDirective>().unwrap(), SelectionDirective::All);
        assert_eq!(" NONE ".parse::<SelectionDirective>().unwrap(), SelectionDirective::None);
        assert_eq!(
            "0, 2".parse::<SelectionDirective>().unwrap(),
            SelectionDirective::Indices(vec![0, 2])
        );
        assert_eq!(
            "".parse::<SelectionDirective>().unwrap(),
            SelectionDirective::Indices(Vec::new())
        );
    }

    #[test]
    fn rejects_unknown_directive() {
        let err = "x".parse::<SelectionDirective>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidDirective(token) if token == "x"));

        let err = "1,b".parse::<SelectionDirective>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidIndex { token, .. } if token == "b"));
    }

    #[test]
    fn row_ids_keep_json_shape() {
        let ids: Vec<RowId> = serde_json::from_str(r#"["a", 7]"#).unwrap();
        assert_eq!(ids, vec![RowId::from("a"), RowId::from(7)]);
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"["a",7]"#);
        assert_eq!("12".parse::<RowId>().unwrap(), RowId::Num(12));
        assert_eq!("b1".parse::<RowId>().unwrap(), RowId::from("b1"));
    }

    #[test]
    fn row_ids_accept_any_json_number() {
        let ids: Vec<RowId> =
            serde_json::from_str(r#"[1.5, 18446744073709551615, -3]"#).unwrap();
        assert!(matches!(&ids[0], RowId::Number(n) if n.as_f64() == Some(1.5)));
        assert!(matches!(&ids[1], RowId::Number(n) if n.as_u64() == Some(u64::MAX)));
        assert_eq!(ids[2], RowId::Num(-3));
        assert_eq!(
            serde_json::to_string(&ids).unwrap(),
            "[1.5,18446744073709551615,-3]"
        );
        assert_eq!(ids[0].to_string(), "1.5");
    }

    #[test]
    fn message_kind_uses_raw_tag() {
        let message: Message =
            serde_json::from_str(r#"{"type": "OTHER", "payload": ["z"]}"#).unwrap();
        assert_eq!(message.kind, MessageKind::Other("OTHER".into()));
        assert_eq!(message.resource(), None);

        let selection = SelectionMessage::new("posts", vec![RowId::from("a")]);
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["type"], SET_RESOURCE_SELECTION);
        assert_eq!(json["meta"]["resource"], "posts");
    }
}
