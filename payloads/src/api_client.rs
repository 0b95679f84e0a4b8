use crate::{Event, EventId, MovieId, MovieSummary, requests, responses};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// Header carrying the shared admin secret on create/delete requests.
pub const ADMIN_PASSCODE_HEADER: &str = "x-admin-passcode";

/// An API client for interfacing with the events backend.
#[derive(Debug, Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
        }
    }
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/{path}", self.address.trim_end_matches('/'))
    }

    async fn get(&self, path: &str) -> ReqwestResult {
        let url = self.format_url(path);
        tracing::debug!(%url, "GET");
        self.inner_client.get(url).send().await
    }

    async fn get_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ReqwestResult {
        let url = self.format_url(path);
        tracing::debug!(%url, ?query, "GET");
        self.inner_client.get(url).query(query).send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let url = self.format_url(path);
        tracing::debug!(%url, "POST");
        self.inner_client.post(url).json(body).send().await
    }

    async fn admin_post(
        &self,
        path: &str,
        body: &impl Serialize,
        passcode: &str,
    ) -> ReqwestResult {
        let url = self.format_url(path);
        tracing::debug!(%url, "POST (admin)");
        self.inner_client
            .post(url)
            .header(ADMIN_PASSCODE_HEADER, passcode)
            .json(body)
            .send()
            .await
    }

    async fn admin_delete(&self, path: &str, passcode: &str) -> ReqwestResult {
        let url = self.format_url(path);
        tracing::debug!(%url, "DELETE (admin)");
        self.inner_client
            .delete(url)
            .header(ADMIN_PASSCODE_HEADER, passcode)
            .send()
            .await
    }
}

/// Methods on the backend API
impl APIClient {
    /// List all events.
    pub async fn list_events(&self) -> Result<Vec<Event>, ClientError> {
        let response = self.get("events").await?;
        let events: responses::EventList =
            ok_body(response, "Failed to load events").await?;
        Ok(events.into_events())
    }

    pub async fn get_event(&self, id: &EventId) -> Result<Event, ClientError> {
        let response = self.get(&format!("events/{id}")).await?;
        ok_body(response, "Not found").await
    }

    /// Create an event. Fails locally, without a request, when the passcode
    /// is blank.
    pub async fn create_event(
        &self,
        details: &requests::CreateEvent,
        admin_passcode: &str,
    ) -> Result<Event, ClientError> {
        let passcode = require_passcode(admin_passcode)?;
        let response = self.admin_post("events", details, passcode).await?;
        ok_body(response, "Create event failed").await
    }

    /// Delete an event. Fails locally, without a request, when the passcode
    /// is blank.
    pub async fn delete_event(
        &self,
        id: &EventId,
        admin_passcode: &str,
    ) -> Result<(), ClientError> {
        let passcode = require_passcode(admin_passcode)?;
        let response =
            self.admin_delete(&format!("events/{id}"), passcode).await?;
        ok_empty(response, "Delete event failed").await
    }

    pub async fn create_signup(
        &self,
        details: &requests::CreateSignup,
    ) -> Result<responses::SignupConfirmation, ClientError> {
        let response = self.post("signups", details).await?;
        ok_body(response, "Signup failed").await
    }

    /// Start a hosted checkout for a paid signup.
    pub async fn start_checkout(
        &self,
        details: &requests::StartCheckout,
    ) -> Result<responses::CheckoutSession, ClientError> {
        let response = self.post("checkout", details).await?;
        ok_body(response, "Checkout failed").await
    }

    /// Search the movie database through the backend proxy. A blank query
    /// returns no results without a request.
    pub async fn search_movies(
        &self,
        query: &str,
    ) -> Result<responses::MovieSearchResults, ClientError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(responses::MovieSearchResults::default());
        }
        let response = self
            .get_with_query("tmdb/search", &[("query", query)])
            .await?;
        ok_body(response, "Movie search failed").await
    }

    pub async fn get_movie(
        &self,
        id: &MovieId,
    ) -> Result<MovieSummary, ClientError> {
        let response = self.get(&format!("tmdb/movie/{id}")).await?;
        ok_body(response, "Failed to load film info").await
    }

    /// URL of the backend's calendar file for an event. Linked to, never
    /// fetched.
    pub fn event_ics_url(&self, id: &EventId) -> String {
        self.format_url(&format!("events/{id}/ics"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A non-success response, with the best available message to display.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    #[error("Missing admin passcode")]
    MissingPasscode,
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError(status, _) => Some(*status),
            _ => None,
        }
    }
}

fn require_passcode(passcode: &str) -> Result<&str, ClientError> {
    let passcode = passcode.trim();
    if passcode.is_empty() {
        return Err(ClientError::MissingPasscode);
    }
    Ok(passcode)
}

/// Pick the message to show for a failed response body.
///
/// A string `error` field is used as is; any other non-empty value is shown
/// as compact JSON. Everything else falls back to `fallback`.
pub fn error_message(body: &str, fallback: &str) -> String {
    let error = serde_json::from_str::<responses::ErrorBody>(body)
        .ok()
        .and_then(|body| body.error);
    match error {
        Some(Value::String(message)) if !message.is_empty() => message,
        Some(value) if is_truthy(&value) => value.to_string(),
        _ => fallback.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

async fn api_error(response: reqwest::Response, fallback: &str) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ClientError::APIError(status, error_message(&body, fallback))
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response, fallback).await);
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(
    response: reqwest::Response,
    fallback: &str,
) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response, fallback).await);
    }
    Ok(())
}
