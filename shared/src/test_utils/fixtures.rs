use serde_json::{json, Value};

use crate::models::{Family, Gender};

/// Request body for a valid family with the given name and events.
pub fn family_payload(family_name: &str, events: &[&str]) -> Value {
    json!({
        "familyName": family_name,
        "events": events,
        "members": [
            { "name": format!("{} Sr", family_name), "gender": "male" },
            { "name": format!("{} Jr", family_name), "gender": "female" }
        ]
    })
}

/// A family as written by the single-event schema generation.
pub fn legacy_family(id: &str, family_name: &str, event: &str) -> Family {
    Family::new(id, family_name)
        .with_legacy_event(event)
        .with_member(format!("{} Sr", family_name), Gender::Male)
}
