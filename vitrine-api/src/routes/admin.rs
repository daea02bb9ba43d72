use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use vitrine_catalog::{
    run_pipeline, AdId, AdQuery, Advertisement, Event, EventId, EventQuery, MemberAccount, MemberId, MemberQuery,
    MembershipTier, Profile, ProfileId, ProfileQuery, Review, ReviewId, ReviewQuery, SortKey,
};
use vitrine_moderation::{AdDraft, BackOffice, BulkAction, DashboardStats, EventDraft, Notification, ProfileDraft};
use vitrine_shared::middleware::AdminUser;
use vitrine_shared::{ApiResponse, AppResult, Paginated};

use crate::routes::{ActionOutcome, Created, PageQuery};
use crate::AppState;

type Outcome = AppResult<Json<ApiResponse<ActionOutcome>>>;

fn outcome(applied: impl Into<ActionOutcome>) -> Outcome {
    Ok(Json(ApiResponse::ok(applied.into())))
}

// --- Request / Response types ---

#[derive(Debug, Deserialize)]
pub struct MembershipRequest {
    pub tier: Option<MembershipTier>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulkKind {
    Verify,
    Feature,
    Delete,
    SetMembership,
}

/// Runs over the profiles panel's current selection.
#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub action: BulkKind,
    #[serde(default)]
    pub tier: Option<MembershipTier>,
}

#[derive(Debug, Serialize)]
pub struct BulkOutcome {
    pub count: usize,
}

/// The profiles panel as the admin currently sees it.
#[derive(Debug, Serialize)]
pub struct ProfilePanel {
    pub search: String,
    pub sort: SortKey,
    pub items: Vec<Profile>,
    pub selected: Vec<ProfileId>,
    pub all_selected: bool,
}

impl ProfilePanel {
    fn of(office: &BackOffice) -> Self {
        let panel = office.profile_panel();
        Self {
            search: panel.search().to_string(),
            sort: panel.sort_key(),
            items: office.profiles_view().into_iter().cloned().collect(),
            selected: panel.selection().ids().iter().copied().collect(),
            all_selected: panel.selection().all_selected(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BlacklistRequest {
    pub reason: String,
    pub evidence: String,
}

#[derive(Debug, Serialize)]
pub struct NotificationView {
    #[serde(flatten)]
    pub notification: Notification,
    pub time: String,
}

#[derive(Debug, Serialize)]
pub struct NotificationList {
    pub items: Vec<NotificationView>,
    pub unread: usize,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub updated: usize,
}

// --- Dashboard ---

pub async fn get_stats(State(state): State<Arc<AppState>>, _admin: AdminUser) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let stats = state.back_office.read().await.stats();
    Ok(Json(ApiResponse::ok(stats)))
}

pub async fn reset(State(state): State<Arc<AppState>>, admin: AdminUser) -> AppResult<Json<ApiResponse<()>>> {
    state.back_office.write().await.reset();
    tracing::info!(admin_id = %admin.0.id, "demo data reset");
    Ok(Json(ApiResponse::<()>::message("demo data restored")))
}

// --- Profiles ---

pub async fn list_profiles(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<ProfileQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Profile>>>> {
    let (quick, filter, sort) = query.parse()?;
    let office = state.back_office.read().await;
    let items: Vec<Profile> = run_pipeline(&office.repo().profiles, &query.search, &quick, &filter, sort)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ApiResponse::ok(Paginated::from_list(items, &page.resolve(state.config.page_size)))))
}

pub async fn create_profile(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(draft): Json<ProfileDraft>,
) -> AppResult<Json<ApiResponse<Created>>> {
    let id = state.back_office.write().await.create_profile(draft)?;
    Ok(Json(ApiResponse::ok(Created { id })))
}

pub async fn verify_profile(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<ProfileId>) -> Outcome {
    outcome(state.back_office.write().await.verify_profile(id))
}

pub async fn toggle_featured(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<ProfileId>) -> Outcome {
    outcome(state.back_office.write().await.toggle_featured(id))
}

pub async fn toggle_vip(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<ProfileId>) -> Outcome {
    outcome(state.back_office.write().await.toggle_vip(id))
}

pub async fn set_membership(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<ProfileId>,
    Json(body): Json<MembershipRequest>,
) -> Outcome {
    outcome(state.back_office.write().await.set_membership(id, body.tier))
}

pub async fn reject_profile(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<ProfileId>) -> Outcome {
    let applied = state.back_office.write().await.reject_profile(id);
    if applied {
        state.unlocks.write().await.forget_profile(id);
    }
    outcome(applied)
}

// --- Profiles panel ---

pub async fn get_profile_panel(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<ProfilePanel>>> {
    let office = state.back_office.read().await;
    Ok(Json(ApiResponse::ok(ProfilePanel::of(&office))))
}

/// Replace the panel's search, tabs, filters and sort.
pub async fn set_profile_panel(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(query): Json<ProfileQuery>,
) -> AppResult<Json<ApiResponse<ProfilePanel>>> {
    let (quick, filter, sort) = query.parse()?;
    let mut office = state.back_office.write().await;
    office.set_profile_panel(&query.search, quick, filter, sort);
    Ok(Json(ApiResponse::ok(ProfilePanel::of(&office))))
}

pub async fn reset_profile_panel(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<ProfilePanel>>> {
    let mut office = state.back_office.write().await;
    office.reset_profile_panel();
    Ok(Json(ApiResponse::ok(ProfilePanel::of(&office))))
}

pub async fn toggle_profile_selection(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<ProfileId>,
) -> Outcome {
    outcome(state.back_office.write().await.toggle_profile_selection(id))
}

pub async fn toggle_all_profiles(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<ProfilePanel>>> {
    let mut office = state.back_office.write().await;
    office.toggle_all_profiles();
    Ok(Json(ApiResponse::ok(ProfilePanel::of(&office))))
}

pub async fn bulk_profiles(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(body): Json<BulkRequest>,
) -> AppResult<Json<ApiResponse<BulkOutcome>>> {
    let action = match body.action {
        BulkKind::Verify => BulkAction::Verify,
        BulkKind::Feature => BulkAction::Feature,
        BulkKind::Delete => BulkAction::Delete,
        BulkKind::SetMembership => BulkAction::SetMembership(body.tier),
    };

    let mut office = state.back_office.write().await;
    let selected: Vec<ProfileId> = office.profile_panel().selection().ids().iter().copied().collect();
    let count = office.bulk(action);
    let deleted: Vec<ProfileId> = selected.into_iter().filter(|id| office.repo().profile(*id).is_none()).collect();
    drop(office);

    if !deleted.is_empty() {
        let mut unlocks = state.unlocks.write().await;
        for id in deleted {
            unlocks.forget_profile(id);
        }
    }

    Ok(Json(ApiResponse::ok(BulkOutcome { count })))
}

// --- Reviews ---

pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<ReviewQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Review>>>> {
    let (filter, sort) = query.parse()?;
    let office = state.back_office.read().await;
    let items: Vec<Review> = run_pipeline(&office.repo().reviews, &query.search, &(), &filter, sort)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ApiResponse::ok(Paginated::from_list(items, &page.resolve(state.config.page_size)))))
}

pub async fn approve_review(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<ReviewId>) -> Outcome {
    outcome(state.back_office.write().await.approve_review(id))
}

pub async fn reject_review(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<ReviewId>) -> Outcome {
    outcome(state.back_office.write().await.reject_review(id))
}

// --- Events ---

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<EventQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Event>>>> {
    let (filter, sort) = query.parse()?;
    let mut office = state.back_office.write().await;
    office.refresh();
    let items: Vec<Event> = run_pipeline(&office.repo().events, &query.search, &(), &filter, sort)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ApiResponse::ok(Paginated::from_list(items, &page.resolve(state.config.page_size)))))
}

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(draft): Json<EventDraft>,
) -> AppResult<Json<ApiResponse<Created>>> {
    let id = state.back_office.write().await.create_event(draft)?;
    Ok(Json(ApiResponse::ok(Created { id })))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<EventId>,
    Json(draft): Json<EventDraft>,
) -> Outcome {
    outcome(state.back_office.write().await.update_event(id, draft)?)
}

pub async fn publish_event(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<EventId>) -> Outcome {
    outcome(state.back_office.write().await.publish_event(id))
}

pub async fn end_event(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<EventId>) -> Outcome {
    outcome(state.back_office.write().await.end_event(id))
}

pub async fn delete_event(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<EventId>) -> Outcome {
    outcome(state.back_office.write().await.delete_event(id))
}

// --- Advertisements ---

pub async fn list_ads(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<AdQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Paginated<Advertisement>>>> {
    let (filter, sort) = query.parse()?;
    let office = state.back_office.read().await;
    let items: Vec<Advertisement> = run_pipeline(&office.repo().ads, &query.search, &(), &filter, sort)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ApiResponse::ok(Paginated::from_list(items, &page.resolve(state.config.page_size)))))
}

pub async fn create_ad(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(draft): Json<AdDraft>,
) -> AppResult<Json<ApiResponse<Created>>> {
    let id = state.back_office.write().await.create_ad(draft)?;
    Ok(Json(ApiResponse::ok(Created { id })))
}

pub async fn update_ad(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<AdId>,
    Json(draft): Json<AdDraft>,
) -> Outcome {
    outcome(state.back_office.write().await.update_ad(id, draft)?)
}

pub async fn activate_ad(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<AdId>) -> Outcome {
    outcome(state.back_office.write().await.activate_ad(id))
}

pub async fn end_ad(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<AdId>) -> Outcome {
    outcome(state.back_office.write().await.end_ad(id))
}

pub async fn delete_ad(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<AdId>) -> Outcome {
    outcome(state.back_office.write().await.delete_ad(id))
}

// --- Members ---

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<MemberQuery>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<ApiResponse<Paginated<MemberAccount>>>> {
    let (filter, sort) = query.parse()?;
    let office = state.back_office.read().await;
    let items: Vec<MemberAccount> = run_pipeline(&office.repo().members, &query.search, &(), &filter, sort)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(ApiResponse::ok(Paginated::from_list(items, &page.resolve(state.config.page_size)))))
}

pub async fn activate_member(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<MemberId>) -> Outcome {
    outcome(state.back_office.write().await.set_member_active(id, true))
}

pub async fn deactivate_member(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<MemberId>) -> Outcome {
    outcome(state.back_office.write().await.set_member_active(id, false))
}

pub async fn blacklist_member(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(id): Path<MemberId>,
    Json(body): Json<BlacklistRequest>,
) -> Outcome {
    outcome(state.back_office.write().await.blacklist_member(id, &body.reason, &body.evidence)?)
}

pub async fn unblacklist_member(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<MemberId>) -> Outcome {
    outcome(state.back_office.write().await.remove_from_blacklist(id))
}

// --- Notifications ---

pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<NotificationList>>> {
    let office = state.back_office.read().await;
    let now = office.now_millis();
    let items: Vec<NotificationView> = office
        .notifications()
        .iter()
        .map(|n| NotificationView {
            time: n.time_label(now),
            notification: n.clone(),
        })
        .collect();
    let unread = items.iter().filter(|v| !v.notification.read).count();
    Ok(Json(ApiResponse::ok(NotificationList { items, unread })))
}

pub async fn mark_notification_read(State(state): State<Arc<AppState>>, _admin: AdminUser, Path(id): Path<i64>) -> Outcome {
    outcome(state.back_office.write().await.mark_notification_read(id))
}

pub async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<Json<ApiResponse<MarkAllReadResponse>>> {
    let updated = state.back_office.write().await.mark_all_notifications_read();
    Ok(Json(ApiResponse::ok(MarkAllReadResponse { updated })))
}

pub async fn clear_notifications(State(state): State<Arc<AppState>>, _admin: AdminUser) -> AppResult<Json<ApiResponse<()>>> {
    state.back_office.write().await.clear_notifications();
    Ok(Json(ApiResponse::<()>::message("notifications cleared")))
}
