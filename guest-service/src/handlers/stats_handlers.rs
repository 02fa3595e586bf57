use axum::{extract::State, Json};
use guestlist_shared::aggregation::{
    compute_statistics, per_event_statistics, EventStatistics, Statistics,
};
use guestlist_shared::models::EventTag;
use guestlist_shared::store::FamilyStore;

use crate::error::Result;
use crate::models::AppState;

// GET /stats
pub async fn get_statistics<S>(State(state): State<AppState<S>>) -> Result<Json<Statistics>>
where
    S: FamilyStore,
{
    let families = state.store.list_families().await?;
    Ok(Json(compute_statistics(&families)))
}

// GET /stats/events
pub async fn get_event_statistics<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<EventStatistics>>>
where
    S: FamilyStore,
{
    let families = state.store.list_families().await?;
    Ok(Json(per_event_statistics(&families, &state.events)))
}

// GET /events
pub async fn get_events<S>(State(state): State<AppState<S>>) -> Json<Vec<EventTag>>
where
    S: FamilyStore,
{
    Json(state.events.events().to_vec())
}
