use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_catalog::{run_pipeline, ContactInfo, LoadMore, ProfileCard, ProfileId, ProfileQuery};
use vitrine_payment::{PaymentReceipt, PaymentRequest, PaymentResponse};
use vitrine_shared::middleware::record_unlock;
use vitrine_shared::{ApiResponse, AppError, AppResult, AuthUser, ErrorCode, Paginated};

use crate::routes::PageQuery;
use crate::AppState;

// --- Request / Response types ---

#[derive(Debug, Serialize)]
pub struct ProfileDetail {
    #[serde(flatten)]
    pub card: ProfileCard,
    pub about: String,
    pub submitted_at: NaiveDate,
    /// Present only once the viewer has unlocked this profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,
}

/// `pages` is how many times "load more" has been pressed, plus one.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub pages: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ProfileFeed {
    pub items: Vec<ProfileCard>,
    pub total: usize,
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub cardholder_name: String,
}

fn profile_not_found() -> AppError {
    AppError::new(ErrorCode::ProfileNotFound, "profile not found")
}

/// The profile's own contact fields, or the processor payload when it has none.
fn revealed_contact(stored: &ContactInfo, receipt: &PaymentReceipt) -> ContactInfo {
    if stored.is_empty() {
        receipt.contact_info.clone()
    } else {
        stored.clone()
    }
}

// --- Browse ---

pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProfileQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Paginated<ProfileCard>>>> {
    let (quick, filter, sort) = query.parse()?;

    let office = state.back_office.read().await;
    let cards: Vec<ProfileCard> = run_pipeline(&office.repo().profiles, &query.search, &quick, &filter, sort)
        .into_iter()
        .map(ProfileCard::from)
        .collect();

    let paginated = Paginated::from_list(cards, &page.resolve(state.config.page_size));
    Ok(Json(ApiResponse::ok(paginated)))
}

/// Growing window over the browse results, as used by the "load more" button.
pub async fn profile_feed(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProfileQuery>,
    Query(feed): Query<FeedQuery>,
) -> AppResult<Json<ApiResponse<ProfileFeed>>> {
    let (quick, filter, sort) = query.parse()?;

    let office = state.back_office.read().await;
    let matched = run_pipeline(&office.repo().profiles, &query.search, &quick, &filter, sort);
    let total = matched.len();

    let mut paging = LoadMore::new(state.config.page_size as usize);
    for _ in 1..feed.pages.unwrap_or(1) {
        if !paging.load_more(total) {
            break;
        }
    }

    Ok(Json(ApiResponse::ok(ProfileFeed {
        items: paging.window(&matched).iter().map(|p| ProfileCard::from(*p)).collect(),
        total,
        has_more: paging.has_more(total),
    })))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    viewer: Option<AuthUser>,
    Path(id): Path<ProfileId>,
) -> AppResult<Json<ApiResponse<ProfileDetail>>> {
    let office = state.back_office.read().await;
    let profile = office.repo().profile(id).ok_or_else(profile_not_found)?;

    let contact = match &viewer {
        Some(user) => state
            .unlocks
            .read()
            .await
            .receipt(&user.id, id)
            .map(|receipt| revealed_contact(&profile.contact, receipt)),
        None => None,
    };

    Ok(Json(ApiResponse::ok(ProfileDetail {
        card: ProfileCard::from(profile),
        about: profile.about.clone(),
        submitted_at: profile.submitted_at,
        contact,
    })))
}

// --- Unlock ---

fn unlocked_response(stored: &ContactInfo, receipt: &PaymentReceipt) -> PaymentResponse {
    PaymentResponse {
        success: true,
        transaction_id: Some(receipt.transaction_id.clone()),
        contact_info: Some(revealed_contact(stored, receipt)),
        error: None,
    }
}

/// Charge for one pair and settle it. Runs detached from the request so a
/// dropped connection cannot leave the pair pending.
async fn charge(state: Arc<AppState>, viewer: Uuid, request: PaymentRequest) -> AppResult<PaymentReceipt> {
    let profile_id = request.profile_id;
    let result = state.payments.process_payment(&request).await;
    state.unlocks.write().await.finish(&viewer, profile_id, &result);

    match &result {
        Ok(receipt) => {
            record_unlock("unlocked");
            state.back_office.write().await.notify_payment(profile_id, receipt.amount_cents);
            tracing::info!(user_id = %viewer, profile_id, "contact unlocked");
        }
        Err(e) if e.code() == Some(ErrorCode::PaymentFailed) => record_unlock("declined"),
        Err(_) => record_unlock("invalid"),
    }
    result
}

pub async fn unlock_profile(
    State(state): State<Arc<AppState>>,
    auth_user: AuthUser,
    Path(id): Path<ProfileId>,
    Json(body): Json<UnlockRequest>,
) -> AppResult<Json<ApiResponse<PaymentResponse>>> {
    let stored = {
        let office = state.back_office.read().await;
        office.repo().profile(id).map(|p| p.contact.clone()).ok_or_else(profile_not_found)?
    };

    // Checking for a receipt and marking the charge pending happen under one guard.
    let prior = state.unlocks.write().await.begin(&auth_user.id, id)?;
    if let Some(receipt) = prior {
        record_unlock("repeat");
        return Ok(Json(ApiResponse::ok_with_message(
            unlocked_response(&stored, &receipt),
            "already unlocked",
        )));
    }

    let request = PaymentRequest {
        profile_id: id,
        amount_cents: state.config.unlock_fee_cents,
        card_number: body.card_number,
        expiry_date: body.expiry_date,
        cvv: body.cvv,
        cardholder_name: body.cardholder_name,
    };
    let receipt = tokio::spawn(charge(state.clone(), auth_user.id, request))
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::new(e)))??;

    Ok(Json(ApiResponse::ok(unlocked_response(&stored, &receipt))))
}
