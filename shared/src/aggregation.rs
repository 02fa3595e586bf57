//! Filtering and headcount statistics over the family list.
//!
//! Every check of "is this family invited to event X" goes through
//! [`effective_events`], which reconciles the current `events` list with the
//! legacy single `event` field.

use serde::Serialize;

use crate::config::EventCatalog;
use crate::models::{EventTag, Family, Gender, Member};

/// Event selection for list, export and print views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EventFilter {
    #[default]
    All,
    Only(EventTag),
}

impl EventFilter {
    pub fn matches(&self, family: &Family) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Only(tag) => effective_events(family).contains(tag),
        }
    }

    pub fn tag(&self) -> Option<&EventTag> {
        match self {
            EventFilter::All => None,
            EventFilter::Only(tag) => Some(tag),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FamilyQuery {
    pub search: String,
    pub event: EventFilter,
}

impl FamilyQuery {
    pub fn new(search: impl Into<String>, event: EventFilter) -> Self {
        Self {
            search: search.into(),
            event,
        }
    }

    fn matches(&self, family: &Family, needle: &str) -> bool {
        let matches_search = needle.is_empty()
            || family.family_name.to_lowercase().contains(needle)
            || family
                .members
                .iter()
                .any(|m| m.name.to_lowercase().contains(needle));

        matches_search && self.event.matches(family)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_families: usize,
    pub total_guests: usize,
    pub total_men: usize,
    pub total_women: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventStatistics {
    pub event: EventTag,
    pub total_families: usize,
    pub total_guests: usize,
    pub males: usize,
    pub females: usize,
}

/// The event set a family actually belongs to: `events` when non-empty,
/// otherwise the legacy single tag, otherwise nothing.
pub fn effective_events(family: &Family) -> Vec<EventTag> {
    if !family.events.is_empty() {
        family.events.clone()
    } else {
        family.legacy_event.iter().cloned().collect()
    }
}

/// Stable, case-insensitive ascending sort by family name.
pub fn sort_by_family_name(families: &mut [Family]) {
    families.sort_by_cached_key(|f| f.family_name.to_lowercase());
}

/// Families matching the query, sorted by family name.
pub fn filter_families(families: &[Family], query: &FamilyQuery) -> Vec<Family> {
    let needle = query.search.to_lowercase();
    let mut matched: Vec<Family> = families
        .iter()
        .filter(|f| query.matches(f, &needle))
        .cloned()
        .collect();
    sort_by_family_name(&mut matched);
    matched
}

fn count_genders<'a>(members: impl Iterator<Item = &'a Member>) -> (usize, usize) {
    members.fold((0, 0), |(males, females), m| match m.gender {
        Gender::Male => (males + 1, females),
        Gender::Female => (males, females + 1),
    })
}

pub fn compute_statistics(families: &[Family]) -> Statistics {
    let (total_men, total_women) = count_genders(families.iter().flat_map(|f| f.members.iter()));

    Statistics {
        total_families: families.len(),
        total_guests: families.iter().map(|f| f.members.len()).sum(),
        total_men,
        total_women,
    }
}

/// One row per catalog event, in catalog order. A family is counted in
/// every row whose event it belongs to.
pub fn per_event_statistics(families: &[Family], catalog: &EventCatalog) -> Vec<EventStatistics> {
    catalog
        .events()
        .iter()
        .map(|event| {
            let attending: Vec<&Family> = families
                .iter()
                .filter(|f| effective_events(f).contains(event))
                .collect();
            let (males, females) = count_genders(attending.iter().flat_map(|f| f.members.iter()));

            EventStatistics {
                event: event.clone(),
                total_families: attending.len(),
                total_guests: attending.iter().map(|f| f.members.len()).sum(),
                males,
                females,
            }
        })
        .collect()
}
