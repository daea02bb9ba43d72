use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use vitrine_catalog::{run_pipeline, Event, EventQuery, EventStatus};
use vitrine_shared::{ApiResponse, AppResult, Paginated};

use crate::routes::PageQuery;
use crate::AppState;

/// Published and ended events; drafts stay in the back office.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(query): Query<EventQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Event>>>> {
    let (filter, sort) = query.parse()?;

    let mut office = state.back_office.write().await;
    office.refresh();
    let events: Vec<Event> = run_pipeline(&office.repo().events, &query.search, &(), &filter, sort)
        .into_iter()
        .filter(|e| e.status != EventStatus::Draft)
        .cloned()
        .collect();

    Ok(Json(ApiResponse::ok(Paginated::from_list(events, &page.resolve(state.config.page_size)))))
}
