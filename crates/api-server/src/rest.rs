//! Axum handlers for the compliance control surface.
//!
//! Each handler lifts the bearer credential out of the request, builds a
//! fresh gateway client bound to it, runs the check, records the outcome in
//! the audit log, and returns the result. No client or state is shared
//! between requests beyond the audit log itself.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use supacheck_compliance::{check_mfa, check_pitr, check_rls, fix_rls_for_all_projects};
use supacheck_core::types::{FixRlsResult, MfaCheckResult, PitrCheckResult, RlsCheckResult};
use supacheck_core::AuditSink;
use supacheck_gateway::SupabaseClient;
use tracing::{error, warn};

use crate::auth::BearerToken;
use crate::error::{gateway_error_response, ErrorResponse};

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub supabase_base_url: String,
    pub audit: Arc<dyn AuditSink>,
    pub start_time: Instant,
}

type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// GET /api/compliance/mfa-check
pub async fn mfa_check(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> HandlerResult<MfaCheckResult> {
    let client = bound_client(&state, &token)?;
    let result = check_mfa(&client).await.map_err(|err| {
        warn!(error = %err, "MFA compliance check failed");
        gateway_error_response(err)
    })?;
    metrics::counter!("compliance.checks.mfa").increment(1);
    record_audit(&state, "MFA", &result);
    Ok(Json(result))
}

/// GET /api/compliance/rls-check
pub async fn rls_check(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> HandlerResult<RlsCheckResult> {
    let client = bound_client(&state, &token)?;
    let result = check_rls(&client).await.map_err(|err| {
        warn!(error = %err, "RLS compliance check failed");
        gateway_error_response(err)
    })?;
    metrics::counter!("compliance.checks.rls").increment(1);
    record_audit(&state, "RLS", &result);
    Ok(Json(result))
}

/// GET /api/compliance/pitr-check
pub async fn pitr_check(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> HandlerResult<PitrCheckResult> {
    let client = bound_client(&state, &token)?;
    let result = check_pitr(&client).await.map_err(|err| {
        warn!(error = %err, "PITR compliance check failed");
        gateway_error_response(err)
    })?;
    metrics::counter!("compliance.checks.pitr").increment(1);
    record_audit(&state, "PITR", &result);
    Ok(Json(result))
}

/// POST /api/compliance/fix-rls, the one mutating endpoint.
pub async fn fix_rls(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> HandlerResult<FixRlsResult> {
    let client = bound_client(&state, &token)?;
    let result = fix_rls_for_all_projects(&client).await.map_err(|err| {
        warn!(error = %err, "RLS remediation failed");
        gateway_error_response(err)
    })?;
    metrics::counter!("compliance.fixes.rls").increment(1);
    record_audit(&state, "FIX_RLS", &result);
    Ok(Json(result))
}

/// GET /health operational probe.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

fn bound_client(
    state: &AppState,
    token: &str,
) -> Result<SupabaseClient, (StatusCode, Json<ErrorResponse>)> {
    SupabaseClient::new(&state.supabase_base_url, token).map_err(gateway_error_response)
}

fn record_audit<T: Serialize>(state: &AppState, check_type: &str, result: &T) {
    match serde_json::to_value(result) {
        Ok(value) => state.audit.record(check_type, &value),
        Err(err) => error!(check_type, error = %err, "Failed to serialize audit payload"),
    }
}
