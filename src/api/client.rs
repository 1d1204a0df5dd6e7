// TokenDeck - api/client.rs
//
// Blocking HTTP client for the admin backend. One method per endpoint;
// every response body is decoded through the uniform `{success,
// message, data}` envelope, and a false success flag becomes
// `ApiError::Backend` carrying the server's message verbatim.
//
// The client is constructed from an explicit `ApiConfig` — base URL,
// optional bearer token, timeout — assembled by the caller. Nothing in
// here reads ambient globals, and the session cookie jar lives inside
// the reqwest client so the backend's cookie-based session survives
// across calls.
//
// No retries and no backoff: a failed request surfaces its error and
// the UI returns to the previous stable state.

use crate::core::model::{Envelope, Log, Token};
use crate::util::constants;
use crate::util::error::{ApiError, ApiResult};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Connection settings for the backend, injected at construction.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend base URL, e.g. `http://localhost:3000`.
    pub base_url: String,

    /// Optional access token sent as a `Bearer` header on every request.
    pub access_token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: constants::DEFAULT_BASE_URL.to_string(),
            access_token: None,
            timeout: Duration::from_secs(constants::DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

/// Blocking client for the admin backend.
pub struct ApiClient {
    http: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// Build a client from the given connection settings.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Build { source: e })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // -------------------------------------------------------------------------
    // Endpoints
    // -------------------------------------------------------------------------

    /// `GET /api/log/self/?p={page}` — one backend page of usage logs.
    pub fn logs_page(&self, page: usize) -> ApiResult<Vec<Log>> {
        let url = self.url("/api/log/self/");
        self.execute(self.http.get(&url).query(&[("p", page)]), &url)
    }

    /// `GET /api/log/self/search?keyword={kw}` — flat search results.
    pub fn search_logs(&self, keyword: &str) -> ApiResult<Vec<Log>> {
        let url = self.url("/api/log/self/search");
        self.execute(self.http.get(&url).query(&[("keyword", keyword)]), &url)
    }

    /// `GET /api/token/?p={page}` — one backend page of tokens.
    pub fn tokens_page(&self, page: usize) -> ApiResult<Vec<Token>> {
        let url = self.url("/api/token/");
        self.execute(self.http.get(&url).query(&[("p", page)]), &url)
    }

    /// `GET /api/token/search?keyword={kw}` — flat search results.
    pub fn search_tokens(&self, keyword: &str) -> ApiResult<Vec<Token>> {
        let url = self.url("/api/token/search");
        self.execute(self.http.get(&url).query(&[("keyword", keyword)]), &url)
    }

    /// `POST /api/token/` — create a token with the given name.
    pub fn create_token(&self, name: &str) -> ApiResult<()> {
        let url = self.url("/api/token/");
        let body = serde_json::json!({ "name": name });
        self.execute_ack(self.http.post(&url).json(&body), &url)
    }

    /// `PUT /api/token/` body `{id, status}` — returns the updated token.
    pub fn update_token_status(&self, id: i64, status: i32) -> ApiResult<Token> {
        let url = self.url("/api/token/");
        let body = serde_json::json!({ "id": id, "status": status });
        self.execute(self.http.put(&url).json(&body), &url)
    }

    /// `DELETE /api/token/{id}/` — success flag only.
    pub fn delete_token(&self, id: i64) -> ApiResult<()> {
        let url = self.url(&format!("/api/token/{id}/"));
        self.execute_ack(self.http.delete(&url), &url)
    }

    /// `GET /api/user/logout` — ends the backend session.
    pub fn logout(&self) -> ApiResult<()> {
        let url = self.url("/api/user/logout");
        self.execute_ack(self.http.get(&url), &url)
    }

    // -------------------------------------------------------------------------
    // Request plumbing
    // -------------------------------------------------------------------------

    fn send(&self, request: RequestBuilder, url: &str) -> ApiResult<String> {
        let request = match &self.access_token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        };

        let response = request.send().map_err(|e| ApiError::Http {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| ApiError::Http {
            url: url.to_string(),
            source: e,
        })
    }

    /// Run a request and decode its envelope, requiring `data`.
    fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> ApiResult<T> {
        let body = self.send(request, url)?;
        decode_envelope(url, &body)
    }

    /// Run a request and check only the envelope's success flag.
    fn execute_ack(&self, request: RequestBuilder, url: &str) -> ApiResult<()> {
        let body = self.send(request, url)?;
        decode_ack(url, &body)
    }
}

/// Decode an envelope body, returning its payload.
///
/// A false success flag maps to `ApiError::Backend` with the server's
/// message; a true flag with a null payload is also treated as a
/// backend error, since the caller was promised data.
pub(crate) fn decode_envelope<T: DeserializeOwned>(url: &str, body: &str) -> ApiResult<T> {
    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        source: e,
    })?;

    if !envelope.success {
        return Err(ApiError::Backend {
            message: envelope.message,
        });
    }

    envelope.data.ok_or_else(|| ApiError::Backend {
        message: "Response envelope carried no data".to_string(),
    })
}

/// Decode an envelope body where the payload is ignored (delete, logout).
pub(crate) fn decode_ack(url: &str, body: &str) -> ApiResult<()> {
    let envelope: Envelope<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            source: e,
        })?;

    if !envelope.success {
        return Err(ApiError::Backend {
            message: envelope.message,
        });
    }
    Ok(())
}

// =============================================================================
// Unit tests
// =============================================================================
