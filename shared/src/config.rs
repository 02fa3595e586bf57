use log::warn;
use thiserror::Error;

use crate::models::EventTag;

/// Event labels used when `GUEST_EVENTS` is not set.
pub const DEFAULT_EVENTS: [&str; 5] = [
    "Engagement",
    "Devkarya",
    "Sangeet",
    "Marriage morning",
    "Marriage afternoon reception",
];

/// Environment variable holding a comma-separated event list.
pub const EVENTS_ENV_VAR: &str = "GUEST_EVENTS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} does not contain any event labels")]
    EmptyEventList(&'static str),
}

/// The ordered list of valid event tags.
///
/// One instance is shared by write validation, per-event statistics, export
/// columns and the `/events` endpoint, so all of them agree on the labels
/// and their order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCatalog {
    events: Vec<EventTag>,
}

impl Default for EventCatalog {
    fn default() -> Self {
        Self {
            events: DEFAULT_EVENTS.iter().map(|e| EventTag::from(*e)).collect(),
        }
    }
}

impl EventCatalog {
    /// Builds a catalog from labels, trimming them and dropping empties and
    /// case-insensitive duplicates.
    pub fn new<I, S>(labels: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut events: Vec<EventTag> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            if events
                .iter()
                .any(|e| e.as_str().eq_ignore_ascii_case(label))
            {
                warn!("Ignoring duplicate event label '{}'", label);
                continue;
            }
            events.push(EventTag::new(label));
        }

        if events.is_empty() {
            return Err(ConfigError::EmptyEventList(EVENTS_ENV_VAR));
        }

        Ok(Self { events })
    }

    /// Parses a comma-separated list such as the value of `GUEST_EVENTS`.
    pub fn parse_list(raw: &str) -> Result<Self, ConfigError> {
        Self::new(raw.split(','))
    }

    /// Reads `GUEST_EVENTS`, falling back to [`DEFAULT_EVENTS`] when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(EVENTS_ENV_VAR) {
            Ok(raw) => Self::parse_list(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn events(&self) -> &[EventTag] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Looks up a label, ignoring surrounding whitespace and ASCII case, and
    /// returns the canonical tag.
    pub fn resolve(&self, label: &str) -> Option<&EventTag> {
        let label = label.trim();
        self.events
            .iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(label))
    }

    pub fn contains(&self, tag: &EventTag) -> bool {
        self.events.contains(tag)
    }
}
