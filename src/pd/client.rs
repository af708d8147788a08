//! PagerDuty REST API client (blocking reqwest).

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use url::Url;

use crate::errors::{AppError, AppResult};
use crate::models::PdUser;
use crate::pd::types::{
    CreateOverridesBody, CreateOverridesResponse, CreateScheduleBody, CreatedOverride,
    OverrideEntry, OverrideRequest, ScheduleRef, SchedulePayload, ScheduleResponse,
    SchedulesPage, UsersPage,
};
use crate::pd::OverrideApi;

const ACCEPT_V2: &str = "application/vnd.pagerduty+json;version=2";
const TIMEOUT_SECS: u64 = 30;
const PAGE_LIMIT: usize = 100;

/// HTTP transport for the PagerDuty API.
///
/// Each call performs a single request; retry behavior is left to the
/// underlying client defaults.
#[derive(Clone)]
pub struct PagerDutyClient {
    token: String,
    base: Url,
    client: Client,
}

impl std::fmt::Debug for PagerDutyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerDutyClient")
            .field("base", &self.base)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl PagerDutyClient {
    pub fn new(token: &str, api_url: &str) -> AppResult<Self> {
        let base = Url::parse(api_url)
            .map_err(|e| AppError::Config(format!("invalid api_url '{}': {}", api_url, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::remote(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            token: token.to_string(),
            base,
            client,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Url {
        let mut url = self.base.clone();
        let joined = format!("{}/{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    fn send<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> AppResult<(StatusCode, String)> {
        let mut request = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Token token={}", self.token))
            .header(ACCEPT, ACCEPT_V2);

        if let Some(b) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(b);
        }

        let response = request
            .send()
            .map_err(|e| AppError::remote(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let text = response.text().unwrap_or_default();

        if status.is_success() {
            Ok((status, text))
        } else {
            Err(AppError::RemoteRequest {
                message: extract_error_message(&text)
                    .unwrap_or_else(|| default_status_message(status)),
                status: Some(status.as_u16()),
            })
        }
    }

    /// GET /users, following offset pagination to the end.
    pub fn list_users(&self, query: Option<&str>) -> AppResult<Vec<PdUser>> {
        let mut users = Vec::new();
        let mut offset = 0usize;

        loop {
            let mut params = vec![
                ("limit", PAGE_LIMIT.to_string()),
                ("offset", offset.to_string()),
            ];
            if let Some(q) = query {
                params.push(("query", q.to_string()));
            }

            let url = self.endpoint("users", &params);
            let (status, body) = self.send::<()>(Method::GET, url, None)?;
            let page: UsersPage = parse_body(&body, status)?;

            offset += page.users.len();
            users.extend(page.users);

            if !page.more {
                break;
            }
        }

        Ok(users)
    }

    /// GET /schedules?query= and match the name exactly.
    pub fn find_schedule(&self, name: &str) -> AppResult<Option<ScheduleRef>> {
        let url = self.endpoint("schedules", &[("query", name.to_string())]);
        let (status, body) = self.send::<()>(Method::GET, url, None)?;
        let page: SchedulesPage = parse_body(&body, status)?;

        Ok(page.schedules.into_iter().find(|s| s.name == name))
    }

    pub fn create_schedule(&self, payload: SchedulePayload) -> AppResult<ScheduleRef> {
        let url = self.endpoint("schedules", &[]);
        let body = CreateScheduleBody { schedule: payload };
        let (status, text) = self.send(Method::POST, url, Some(&body))?;
        let response: ScheduleResponse = parse_body(&text, status)?;
        Ok(response.schedule)
    }

    pub fn update_schedule(&self, id: &str, payload: SchedulePayload) -> AppResult<ScheduleRef> {
        let url = self.endpoint(&format!("schedules/{}", id), &[]);
        let body = CreateScheduleBody { schedule: payload };
        let (status, text) = self.send(Method::PUT, url, Some(&body))?;
        let response: ScheduleResponse = parse_body(&text, status)?;
        Ok(response.schedule)
    }

    /// Update the schedule with the same name if one exists, create it
    /// otherwise. Returns the remote schedule and whether it was updated.
    pub fn create_or_update_schedule(
        &self,
        payload: SchedulePayload,
    ) -> AppResult<(ScheduleRef, bool)> {
        match self.find_schedule(&payload.name)? {
            Some(existing) => {
                let updated = self.update_schedule(&existing.id, payload)?;
                Ok((updated, true))
            }
            None => Ok((self.create_schedule(payload)?, false)),
        }
    }
}

impl OverrideApi for PagerDutyClient {
    fn create_override(
        &self,
        request: &OverrideRequest,
        user_id: &str,
    ) -> AppResult<CreatedOverride> {
        let url = self.endpoint(&format!("schedules/{}/overrides", request.schedule), &[]);
        let body = CreateOverridesBody {
            overrides: vec![request.payload(user_id)],
        };

        let (status, text) = self.send(Method::POST, url, Some(&body))?;
        let response: CreateOverridesResponse = parse_body(&text, status)?;

        match response {
            CreateOverridesResponse::Single { override_obj } => Ok(CreatedOverride {
                id: override_obj.id,
                html_url: override_obj.html_url,
            }),
            CreateOverridesResponse::Entries(entries)
            | CreateOverridesResponse::Wrapped { overrides: entries } => {
                first_created(entries, status)
            }
        }
    }

    fn resolve_user(&self, email: &str) -> AppResult<PdUser> {
        let candidates = self.list_users(Some(email))?;
        candidates
            .into_iter()
            .find(|u| u.matches_email(email))
            .ok_or_else(|| AppError::remote(format!("no PagerDuty user matches '{}'", email)))
    }
}

fn first_created(entries: Vec<OverrideEntry>, status: StatusCode) -> AppResult<CreatedOverride> {
    let entry = entries.into_iter().next().ok_or(AppError::RemoteRequest {
        message: "empty override response".to_string(),
        status: Some(status.as_u16()),
    })?;

    // The bulk endpoint reports per-entry status even on a 2xx envelope.
    if let Some(code) = entry.status {
        if !(200..300).contains(&(code as u32)) {
            let message = if entry.errors.is_empty() {
                format!("override rejected with status {}", code)
            } else {
                entry.errors.join("; ")
            };
            return Err(AppError::RemoteRequest {
                message,
                status: Some(code),
            });
        }
    }

    let created = entry.override_obj.ok_or(AppError::RemoteRequest {
        message: "override response carries no override object".to_string(),
        status: Some(status.as_u16()),
    })?;

    Ok(CreatedOverride {
        id: created.id,
        html_url: created.html_url,
    })
}

fn parse_body<T: serde::de::DeserializeOwned>(body: &str, status: StatusCode) -> AppResult<T> {
    serde_json::from_str(body).map_err(|e| AppError::RemoteRequest {
        message: format!("failed to parse response: {}", e),
        status: Some(status.as_u16()),
    })
}

fn default_status_message(status: StatusCode) -> String {
    if status.as_u16() == 429 {
        "rate limited".to_string()
    } else if status.is_server_error() {
        "server error".to_string()
    } else {
        format!("request failed with status {}", status.as_u16())
    }
}

/// Pull the human-readable message out of a PagerDuty error body:
/// `{"error": {"message": "...", "errors": [...]}}`.
fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let error = parsed.get("error")?;

    let mut message = error
        .get("message")
        .and_then(|m| m.as_str())
        .map(ToOwned::to_owned)?;

    if let Some(details) = error.get("errors").and_then(|e| e.as_array()) {
        let details: Vec<&str> = details.iter().filter_map(|d| d.as_str()).collect();
        if !details.is_empty() {
            message.push_str(&format!(" ({})", details.join("; ")));
        }
    }

    Some(message)
}
