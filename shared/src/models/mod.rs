use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Returns the current time as an RFC 3339 string, the format every stored
/// timestamp uses.
pub fn now_str() -> String {
    Utc::now().to_rfc3339()
}

/// A named ceremony or occasion a family can be invited to.
///
/// The set of valid labels is configuration (see [`crate::config::EventCatalog`]),
/// so the tag itself is just the label.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EventTag(String);

impl EventTag {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventTag {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parses the wire value. Only the exact lowercase spellings are accepted.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }

    /// Label used in exported spreadsheets.
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

fn default_attending() -> bool {
    true
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Member {
    pub name: String,
    pub gender: Gender,
    #[serde(default = "default_attending")]
    pub attending: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
            attending: true,
        }
    }
}

/// A household on the guest list.
///
/// `legacy_event` only exists for records written by older schema
/// generations that carried a single `event` field. Never read either field
/// directly to decide event membership; use
/// [`crate::aggregation::effective_events`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    pub family_name: String,
    #[serde(default)]
    pub events: Vec<EventTag>,
    #[serde(
        rename = "event",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_event: Option<EventTag>,
    #[serde(default)]
    pub members: Vec<Member>,
    pub created_at: String,
    pub updated_at: String,
}

impl Family {
    pub fn new(id: impl Into<String>, family_name: impl Into<String>) -> Self {
        let now = now_str();
        Self {
            id: id.into(),
            family_name: family_name.into(),
            events: Vec::new(),
            legacy_event: None,
            members: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn with_events<I, T>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<EventTag>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_legacy_event(mut self, event: impl Into<EventTag>) -> Self {
        self.legacy_event = Some(event.into());
        self
    }

    pub fn with_member(mut self, name: impl Into<String>, gender: Gender) -> Self {
        self.members.push(Member::new(name, gender));
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legacy_event_field_deserializes() {
        let family: Family = serde_json::from_value(json!({
            "id": "f-1",
            "familyName": "Sharma",
            "event": "Sangeet",
            "members": [{ "name": "Ravi", "gender": "male" }],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert!(family.events.is_empty());
        assert_eq!(family.legacy_event, Some(EventTag::from("Sangeet")));
        assert!(family.members[0].attending);
    }

    #[test]
    fn absent_legacy_event_is_not_serialized() {
        let family = Family::new("f-2", "Verma").with_events(["Engagement"]);
        let value = serde_json::to_value(&family).unwrap();

        assert!(value.get("event").is_none());
        assert_eq!(value["familyName"], "Verma");
        assert_eq!(value["events"], json!(["Engagement"]));
    }

    #[test]
    fn gender_parse_is_strict() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse("female"), Some(Gender::Female));
        assert_eq!(Gender::parse("Male"), None);
        assert_eq!(Gender::parse(""), None);
    }
}
