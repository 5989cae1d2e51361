//! Backend event lookup.
//!
//! Reads a single row from the backend's REST row-filter endpoint
//! (`/rest/v1/eventos?id=eq.<id>`). Uses async reqwest with rustls for TLS.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::errors::FetchError;
use crate::models::{EVENT_COLUMNS, EventRecord};

/// Upper bound on a backend request. Previews are best-effort; a slow
/// backend must not hold the crawler connection open indefinitely.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent string for backend requests.
const USER_AGENT: &str = concat!("og-preview/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the backend base URL.
pub const SERVICE_URL_VAR: &str = "SUPABASE_URL";

/// Environment variable holding the backend API key.
pub const SERVICE_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Table queried for event rows.
const EVENTS_TABLE: &str = "eventos";

/// Source of named secrets.
pub trait SecretsProvider: Send + Sync {
    /// Look up a secret; `None` when unset or empty.
    fn get(&self, name: &str) -> Option<String>;
}

/// Reads secrets from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecrets;

impl SecretsProvider for EnvSecrets {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }
}

/// Anything that can look up an event by id.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch one event.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails, or
    /// no row matches `event_id`.
    async fn fetch_event(&self, event_id: &str) -> Result<EventRecord, FetchError>;
}

/// Client for the backend's REST query API.
pub struct BackendClient {
    client: Client,
    secrets: Box<dyn SecretsProvider>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// Credentials are resolved on every fetch, so a missing key only
    /// affects event lookups.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(secrets: Box<dyn SecretsProvider>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, secrets })
    }

    fn credentials(&self) -> Result<(String, String), FetchError> {
        let url = self
            .secrets
            .get(SERVICE_URL_VAR)
            .ok_or(FetchError::MissingCredentials(SERVICE_URL_VAR))?;
        let key = self
            .secrets
            .get(SERVICE_KEY_VAR)
            .ok_or(FetchError::MissingCredentials(SERVICE_KEY_VAR))?;

        Ok((url.trim_end_matches('/').to_string(), key))
    }
}

#[async_trait]
impl EventSource for BackendClient {
    #[instrument(skip(self))]
    async fn fetch_event(&self, event_id: &str) -> Result<EventRecord, FetchError> {
        let (base_url, key) = self.credentials()?;
        let url = format!("{base_url}/rest/v1/{EVENTS_TABLE}");

        debug!("fetching event from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("id", format!("eq.{event_id}")), ("select", EVENT_COLUMNS.into())])
            .header("apikey", &key)
            .bearer_auth(&key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        // Check status before parsing
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes().await?;
        let rows: Vec<EventRecord> = serde_json::from_slice(&body)?;

        rows.into_iter()
            .next()
            .ok_or_else(|| FetchError::NotFound(event_id.to_string()))
    }
}
