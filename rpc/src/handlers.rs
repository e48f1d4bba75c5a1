//! Request handlers and their wire shapes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::ServiceState;
use goodhaul_lifecycle::{CreateDonation, LifecycleError};
use goodhaul_types::{
    DonationId, DonationKind, DonationPayload, DonationRecord, DonationStatus, Timestamp, UserId,
};

// ── Wire shapes ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateDonationRequest {
    pub requester_id: UserId,
    pub location: String,
    #[serde(flatten)]
    pub payload: DonationPayload,
}

#[derive(Debug, Serialize)]
pub struct CreateDonationResponse {
    pub id: DonationId,
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct ClaimRequest {
    pub claimant_id: UserId,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub claimant_id: UserId,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub kind: DonationKind,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct ReissueResponse {
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: DonationStatus,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub donations: u64,
}

/// A donation record as served to callers — everything except the code
/// fields, which never leave the service after their initial delivery.
#[derive(Debug, Serialize)]
pub struct DonationSummary {
    pub id: DonationId,
    pub requester_id: UserId,
    pub claimant_id: Option<UserId>,
    #[serde(flatten)]
    pub payload: DonationPayload,
    pub location: String,
    pub status: DonationStatus,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
}

impl From<DonationRecord> for DonationSummary {
    fn from(record: DonationRecord) -> Self {
        Self {
            id: record.id,
            requester_id: record.requester,
            claimant_id: record.claimant,
            payload: record.payload,
            location: record.location,
            status: record.status,
            rejection_reason: record.rejection_reason,
            created_at: record.created_at,
        }
    }
}

fn summaries(records: Vec<DonationRecord>) -> Vec<DonationSummary> {
    records.into_iter().map(DonationSummary::from).collect()
}

fn parse_kind(raw: &str) -> Result<DonationKind, ApiError> {
    raw.parse::<DonationKind>()
        .map_err(|e| ApiError(LifecycleError::Validation(e.to_string())))
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health(
    State(state): State<Arc<ServiceState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        donations: state.registry.donation_count()?,
    }))
}

/// `POST /donations`
pub async fn create_donation(
    State(state): State<Arc<ServiceState>>,
    Json(req): Json<CreateDonationRequest>,
) -> Result<Json<CreateDonationResponse>, ApiError> {
    let created = state.registry.create(
        CreateDonation {
            requester: req.requester_id,
            location: req.location,
            payload: req.payload,
        },
        Timestamp::now(),
    )?;
    Ok(Json(CreateDonationResponse {
        id: created.id,
        otp: created.otp,
    }))
}

/// `GET /donations/pending/:kind`
pub async fn list_pending(
    State(state): State<Arc<ServiceState>>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<DonationSummary>>, ApiError> {
    let kind = parse_kind(&kind)?;
    Ok(Json(summaries(state.registry.list_pending(kind)?)))
}

/// `GET /donations/:id`
pub async fn get_donation(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u64>,
) -> Result<Json<DonationSummary>, ApiError> {
    let record = state.registry.get(DonationId::new(id))?;
    Ok(Json(record.into()))
}

/// `GET /donations/:id/status`
pub async fn check_status(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u64>,
) -> Result<Json<StatusResponse>, ApiError> {
    let status = state.status.check_status(DonationId::new(id))?;
    Ok(Json(StatusResponse { status }))
}

/// `POST /donations/:id/claim`
pub async fn claim(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u64>,
    Json(req): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claimed = state.claims.claim(DonationId::new(id), req.claimant_id)?;
    Ok(Json(ClaimResponse { otp: claimed.otp }))
}

/// `POST /donations/:id/verify`
pub async fn verify(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u64>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let kind = state.verifier.verify(
        DonationId::new(id),
        req.claimant_id,
        &req.code,
        Timestamp::now(),
    )?;
    Ok(Json(VerifyResponse { kind }))
}

/// `POST /donations/:id/reject`
pub async fn reject(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u64>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.registry.reject(DonationId::new(id), &req.reason)?;
    Ok(Json(StatusResponse {
        status: DonationStatus::Rejected,
    }))
}

/// `POST /donations/:id/reissue`
pub async fn reissue(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u64>,
) -> Result<Json<ReissueResponse>, ApiError> {
    let otp = state
        .registry
        .reissue(DonationId::new(id), Timestamp::now())?;
    Ok(Json(ReissueResponse { otp }))
}

/// `GET /requesters/:id/donations`
pub async fn list_by_requester(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<DonationSummary>>, ApiError> {
    let records = state.registry.list_by_requester(UserId::new(id))?;
    Ok(Json(summaries(records)))
}

/// `GET /claimants/:id/donations`
pub async fn list_by_claimant(
    State(state): State<Arc<ServiceState>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<DonationSummary>>, ApiError> {
    let records = state.registry.list_by_claimant(UserId::new(id))?;
    Ok(Json(summaries(records)))
}
