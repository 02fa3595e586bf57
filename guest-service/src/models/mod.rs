use axum::extract::rejection::JsonRejection;
use axum::Json;
use guestlist_shared::aggregation::{EventFilter, FamilyQuery};
use guestlist_shared::config::EventCatalog;
use guestlist_shared::validation::ValidationError;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::AppError;

// Request bodies are validated by the shared crate
pub use guestlist_shared::validation::FamilyInput;

/// Shared router state: the record store and the event catalog.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub events: Arc<EventCatalog>,
}

impl<S> AppState<S> {
    pub fn new(store: Arc<S>, events: Arc<EventCatalog>) -> Self {
        Self { store, events }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            events: self.events.clone(),
        }
    }
}

/// Query string accepted by the list, export and print endpoints.
#[derive(Deserialize, Debug, Default)]
pub struct ListQuery {
    pub event: Option<String>,
    pub search: Option<String>,
}

/// "All" (any case) or an empty value means no event filter.
pub fn parse_event_filter(
    raw: Option<&str>,
    catalog: &EventCatalog,
) -> Result<EventFilter, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(EventFilter::All),
        Some(label) if label.eq_ignore_ascii_case("all") => Ok(EventFilter::All),
        Some(label) => catalog
            .resolve(label)
            .map(|tag| EventFilter::Only(tag.clone()))
            .ok_or_else(|| ValidationError::UnknownEvent(label.to_string()).into()),
    }
}

impl ListQuery {
    pub fn to_family_query(&self, catalog: &EventCatalog) -> Result<FamilyQuery, AppError> {
        let event = parse_event_filter(self.event.as_deref(), catalog)?;
        Ok(FamilyQuery::new(
            self.search.clone().unwrap_or_default(),
            event,
        ))
    }
}

/// Unwraps a JSON body, reporting malformed bodies as validation failures
/// (400) rather than axum's default 422.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()).into())
}
