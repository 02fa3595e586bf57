use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use guestlist_shared::aggregation::filter_families;
use guestlist_shared::models::{now_str, Family, MessageResponse};
use guestlist_shared::store::FamilyStore;
use guestlist_shared::validation::validate_family;
use log::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{json_body, AppState, FamilyInput, ListQuery};

// GET /families
pub async fn get_families<S>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Family>>>
where
    S: FamilyStore,
{
    let query = query.to_family_query(&state.events)?;
    let families = state.store.list_families().await?;

    let matched = filter_families(&families, &query);
    debug!(
        "Listing {} of {} families (event filter: {:?})",
        matched.len(),
        families.len(),
        query.event
    );

    Ok(Json(matched))
}

// GET /families/:id
pub async fn get_family<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Family>>
where
    S: FamilyStore,
{
    let family = state.store.get_family(&id).await?;
    Ok(Json(family))
}

// POST /families
pub async fn create_family<S>(
    State(state): State<AppState<S>>,
    payload: std::result::Result<Json<FamilyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Family>)>
where
    S: FamilyStore,
{
    let input = json_body(payload)?;
    let valid = validate_family(&input, &state.events)?;

    let now = now_str();
    let family = Family {
        id: Uuid::new_v4().to_string(),
        family_name: valid.family_name,
        events: valid.events,
        legacy_event: None,
        members: valid.members,
        created_at: now.clone(),
        updated_at: now,
    };

    let created = state.store.create_family(family).await?;
    info!(
        "Created family {} '{}' with {} members",
        created.id,
        created.family_name,
        created.members.len()
    );

    Ok((StatusCode::CREATED, Json(created)))
}

// PUT /families/:id
pub async fn update_family<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<FamilyInput>, JsonRejection>,
) -> Result<Json<Family>>
where
    S: FamilyStore,
{
    let input = json_body(payload)?;
    let valid = validate_family(&input, &state.events)?;

    let existing = state.store.get_family(&id).await?;

    // Full replace; a legacy single event on the old record is dropped
    let family = Family {
        id: existing.id,
        family_name: valid.family_name,
        events: valid.events,
        legacy_event: None,
        members: valid.members,
        created_at: existing.created_at,
        updated_at: now_str(),
    };

    let updated = state.store.replace_family(family).await?;
    info!("Updated family {}", updated.id);

    Ok(Json(updated))
}

// DELETE /families/:id
pub async fn delete_family<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>>
where
    S: FamilyStore,
{
    state.store.delete_family(&id).await?;
    info!("Deleted family {}", id);

    Ok(Json(MessageResponse::new("Family deleted successfully")))
}
