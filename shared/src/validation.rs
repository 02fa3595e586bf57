//! Write-boundary validation for family create/replace requests.
//!
//! Legacy single-`event` input is folded into the events list here, so the
//! store only ever receives the current representation.

use serde::Deserialize;
use thiserror::Error;

use crate::config::EventCatalog;
use crate::models::{EventTag, Gender, Member};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Family name is required")]
    MissingFamilyName,

    #[error("At least one event is required")]
    NoEvents,

    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    #[error("At least one member is required")]
    NoMembers,

    #[error("Member {0} is missing a name")]
    MissingMemberName(usize),

    #[error("Member {index} has invalid gender '{value}'. Must be 'male' or 'female'")]
    InvalidGender { index: usize, value: String },

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

/// Body of `POST /families` and `PUT /families/:id`.
///
/// Every field is optional on the wire so that missing data surfaces as a
/// [`ValidationError`] instead of a deserialization failure.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FamilyInput {
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub events: Option<Vec<String>>,
    /// Single event accepted from older clients.
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub members: Option<Vec<MemberInput>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct MemberInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub attending: Option<bool>,
}

/// The replaceable part of a family after validation and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidFamily {
    pub family_name: String,
    pub events: Vec<EventTag>,
    pub members: Vec<Member>,
}

fn normalize_events(
    input: &FamilyInput,
    catalog: &EventCatalog,
) -> Result<Vec<EventTag>, ValidationError> {
    let raw: Vec<&str> = match &input.events {
        Some(events) if !events.is_empty() => events.iter().map(String::as_str).collect(),
        _ => input.event.iter().map(String::as_str).collect(),
    };

    let mut events: Vec<EventTag> = Vec::with_capacity(raw.len());
    for label in raw {
        if label.trim().is_empty() {
            continue;
        }
        let tag = catalog
            .resolve(label)
            .ok_or_else(|| ValidationError::UnknownEvent(label.trim().to_string()))?;
        if !events.contains(tag) {
            events.push(tag.clone());
        }
    }

    if events.is_empty() {
        return Err(ValidationError::NoEvents);
    }
    Ok(events)
}

fn normalize_member(index: usize, input: &MemberInput) -> Result<Member, ValidationError> {
    let name = input.name.as_deref().unwrap_or("").trim();
    if name.is_empty() {
        return Err(ValidationError::MissingMemberName(index));
    }

    let raw_gender = input.gender.as_deref().unwrap_or("");
    let gender = Gender::parse(raw_gender).ok_or_else(|| ValidationError::InvalidGender {
        index,
        value: raw_gender.to_string(),
    })?;

    Ok(Member {
        name: name.to_string(),
        gender,
        attending: input.attending.unwrap_or(true),
    })
}

pub fn validate_family(
    input: &FamilyInput,
    catalog: &EventCatalog,
) -> Result<ValidFamily, ValidationError> {
    let family_name = input.family_name.as_deref().unwrap_or("").trim();
    if family_name.is_empty() {
        return Err(ValidationError::MissingFamilyName);
    }

    let events = normalize_events(input, catalog)?;

    let members_input = input.members.as_deref().unwrap_or(&[]);
    if members_input.is_empty() {
        return Err(ValidationError::NoMembers);
    }
    let members = members_input
        .iter()
        .enumerate()
        .map(|(i, m)| normalize_member(i, m))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidFamily {
        family_name: family_name.to_string(),
        events,
        members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> FamilyInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn valid_family_is_normalized() {
        let valid = validate_family(
            &input(json!({
                "familyName": "  Sharma ",
                "events": ["sangeet", "Engagement", "Sangeet"],
                "members": [
                    { "name": " Ravi ", "gender": "male" },
                    { "name": "Priya", "gender": "female", "attending": false }
                ]
            })),
            &EventCatalog::default(),
        )
        .unwrap();

        assert_eq!(valid.family_name, "Sharma");
        assert_eq!(
            valid.events,
            vec![EventTag::from("Sangeet"), EventTag::from("Engagement")]
        );
        assert_eq!(valid.members[0].name, "Ravi");
        assert!(valid.members[0].attending);
        assert!(!valid.members[1].attending);
    }

    #[test]
    fn legacy_event_is_folded_into_events() {
        let valid = validate_family(
            &input(json!({
                "familyName": "Kapoor",
                "event": "Devkarya",
                "members": [{ "name": "Anil", "gender": "male" }]
            })),
            &EventCatalog::default(),
        )
        .unwrap();

        assert_eq!(valid.events, vec![EventTag::from("Devkarya")]);
    }

    #[test]
    fn events_list_wins_over_legacy_event() {
        let valid = validate_family(
            &input(json!({
                "familyName": "Kapoor",
                "events": ["Sangeet"],
                "event": "Devkarya",
                "members": [{ "name": "Anil", "gender": "male" }]
            })),
            &EventCatalog::default(),
        )
        .unwrap();

        assert_eq!(valid.events, vec![EventTag::from("Sangeet")]);
    }

    #[test]
    fn rejects_missing_fields() {
        let catalog = EventCatalog::default();
        let member = json!([{ "name": "A", "gender": "male" }]);

        assert_eq!(
            validate_family(&input(json!({ "familyName": " ", "events": ["Sangeet"], "members": member.clone() })), &catalog),
            Err(ValidationError::MissingFamilyName)
        );
        assert_eq!(
            validate_family(&input(json!({ "familyName": "A", "events": [], "members": member.clone() })), &catalog),
            Err(ValidationError::NoEvents)
        );
        assert_eq!(
            validate_family(&input(json!({ "familyName": "A", "events": ["Sangeet"], "members": [] })), &catalog),
            Err(ValidationError::NoMembers)
        );
    }

    #[test]
    fn rejects_unknown_event() {
        let result = validate_family(
            &input(json!({
                "familyName": "A",
                "events": ["Haldi"],
                "members": [{ "name": "A", "gender": "male" }]
            })),
            &EventCatalog::default(),
        );
        assert_eq!(result, Err(ValidationError::UnknownEvent("Haldi".into())));
    }

    #[test]
    fn rejects_bad_members() {
        let catalog = EventCatalog::default();

        let result = validate_family(
            &input(json!({
                "familyName": "A",
                "events": ["Sangeet"],
                "members": [{ "name": "A", "gender": "male" }, { "name": "", "gender": "female" }]
            })),
            &catalog,
        );
        assert_eq!(result, Err(ValidationError::MissingMemberName(1)));

        let result = validate_family(
            &input(json!({
                "familyName": "A",
                "events": ["Sangeet"],
                "members": [{ "name": "A", "gender": "other" }]
            })),
            &catalog,
        );
        assert_eq!(
            result,
            Err(ValidationError::InvalidGender {
                index: 0,
                value: "other".into()
            })
        );
    }
}
