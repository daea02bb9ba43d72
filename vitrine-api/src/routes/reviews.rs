use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use vitrine_catalog::{run_pipeline, Choice, Review, ReviewId, ReviewQuery, ReviewStatus, Vote};
use vitrine_shared::{ApiResponse, AppError, AppResult, AuthUser, ErrorCode, Paginated};

use crate::routes::PageQuery;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub vote: Vote,
}

#[derive(Debug, Serialize)]
pub struct VoteResult {
    pub likes: u32,
    pub dislikes: u32,
    /// The caller's vote after this click, `None` when it was withdrawn.
    pub active: Option<Vote>,
}

#[derive(Debug, Serialize)]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    /// The signed-in viewer's own vote on this review.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_vote: Option<Vote>,
}

/// Approved reviews only.
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    viewer: Option<AuthUser>,
    Query(query): Query<ReviewQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Paginated<ReviewView>>>> {
    let (mut filter, sort) = query.parse()?;
    filter.status = Choice::Only(ReviewStatus::Approved);

    let office = state.back_office.read().await;
    let votes = state.votes.read().await;
    let reviews: Vec<ReviewView> = run_pipeline(&office.repo().reviews, &query.search, &(), &filter, sort)
        .into_iter()
        .map(|review| ReviewView {
            my_vote: viewer.as_ref().and_then(|user| votes.current(review.id, &user.id)),
            review: review.clone(),
        })
        .collect();

    Ok(Json(ApiResponse::ok(Paginated::from_list(reviews, &page.resolve(state.config.page_size)))))
}

pub async fn vote_review(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(id): Path<ReviewId>,
    Json(body): Json<VoteRequest>,
) -> AppResult<Json<ApiResponse<VoteResult>>> {
    let mut office = state.back_office.write().await;
    let review = office
        .repo_mut()
        .review_mut(id)
        .ok_or_else(|| AppError::new(ErrorCode::ReviewNotFound, "review not found"))?;

    let active = state.votes.write().await.cast(review, auth_user.id, body.vote);
    tracing::debug!(review_id = id, user_id = %auth_user.id, vote = ?active, "review vote");

    Ok(Json(ApiResponse::ok(VoteResult {
        likes: review.likes,
        dislikes: review.dislikes,
        active,
    })))
}
