use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use guestlist_shared::aggregation::filter_families;
use guestlist_shared::export::{export_file_name, guest_list_csv, print_sheet, PrintSheet};
use guestlist_shared::store::FamilyStore;
use log::info;

use crate::error::Result;
use crate::models::{AppState, ListQuery};

// GET /export
pub async fn export_guest_list<S>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse>
where
    S: FamilyStore,
{
    let query = query.to_family_query(&state.events)?;
    let families = state.store.list_families().await?;
    let matched = filter_families(&families, &query);

    let csv = guest_list_csv(&matched, &state.events)?;
    let file_name = export_file_name(&query.event, Utc::now().date_naive());
    info!("Exporting {} families to {}", matched.len(), file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        csv,
    ))
}

// GET /print
pub async fn print_guest_list<S>(
    State(state): State<AppState<S>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PrintSheet>>
where
    S: FamilyStore,
{
    let query = query.to_family_query(&state.events)?;
    let families = state.store.list_families().await?;
    let matched = filter_families(&families, &query);

    Ok(Json(print_sheet(&matched, &query.event)))
}
