//! HTTP client for the Supabase management API.
//!
//! One client is built per incoming request, bound to the caller's bearer
//! credential. Every failure is classified here, at the boundary, into the
//! three-variant [`GatewayError`] taxonomy; callers never inspect reqwest
//! errors or response shapes themselves.

use reqwest::header;
use serde::de::DeserializeOwned;
use supacheck_core::error::{GatewayError, GatewayResult};
use supacheck_core::types::{BackupConfig, Organization, OrganizationMember, Project};
use supacheck_core::ManagementApi;
use tracing::debug;

#[derive(Debug)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    /// Build a client bound to one bearer credential. The credential and the
    /// JSON content type are attached to every request as default headers.
    pub fn new(base_url: &str, token: &str) -> GatewayResult<Self> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| GatewayError::Fault(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GatewayError::Fault(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        debug!(path, "GET management API");
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(classify_send_error)?;
        decode(response).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> GatewayResult<T> {
        debug!(path, "POST management API");
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(classify_send_error)?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// A send error means no response arrived, unless the request could not even
/// be constructed locally.
fn classify_send_error(err: reqwest::Error) -> GatewayError {
    if err.is_builder() {
        GatewayError::Fault(err.to_string())
    } else {
        GatewayError::Unreachable
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let body =
            serde_json::from_str(&text).unwrap_or_else(|_| serde_json::Value::String(text));
        return Err(GatewayError::Upstream {
            status: status.as_u16(),
            body,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| GatewayError::Fault(e.to_string()))
}

impl ManagementApi for SupabaseClient {
    async fn list_organizations(&self) -> GatewayResult<Vec<Organization>> {
        self.get("/organizations").await
    }

    async fn list_organization_members(
        &self,
        org_id: &str,
    ) -> GatewayResult<Vec<OrganizationMember>> {
        self.get(&format!("/organizations/{org_id}/members")).await
    }

    async fn list_projects(&self) -> GatewayResult<Vec<Project>> {
        self.get("/projects").await
    }

    async fn execute_sql(
        &self,
        project_id: &str,
        sql: &str,
    ) -> GatewayResult<serde_json::Value> {
        self.post(
            &format!("/projects/{project_id}/database/query"),
            &serde_json::json!({ "query": sql }),
        )
        .await
    }

    async fn get_backup_config(&self, project_id: &str) -> GatewayResult<BackupConfig> {
        self.get(&format!("/projects/{project_id}/database/backups"))
            .await
    }
}
