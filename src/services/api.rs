use crate::config::Config;
use crate::models::{
    appointment::{Appointment, AppointmentUpdate, NewAppointment},
    business::{Business, BusinessUpdate, NewBusiness},
    client::{Client, ClientInput},
    dashboard::DashboardSummary,
    error::AppError,
    service::{Service, ServiceInput, ServiceUpdate},
    slot::{AvailableSlot, BookingConfirmation, BookingRequest, PublicBusiness, SlotQuery, SlotsResponse},
    staff::Staff,
    user::{SessionExchange, User},
};
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

// CONSTANTS
const API_PREFIX: &str = "api";
const AGENDA_PREFIX: &str = "agenda";
/// Used off the browser, where there is no page origin to fall back to.
const FALLBACK_ORIGIN: &str = "http://localhost:8000";

/// Whether the session cookie travels with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    Include,
    Omit,
}

// API CONFIGURATION
/// Where the backend lives.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn builder() -> ApiConfigBuilder {
        ApiConfigBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `segments` under `/api`, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            AppError::ConfigError(format!("Invalid backend URL {}: {e}", self.base_url))
        })?;

        url.path_segments_mut()
            .map_err(|()| {
                AppError::ConfigError(format!("Backend URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(API_PREFIX)
            .extend(segments);

        Ok(url)
    }

    /// `/api/agenda/businesses/{id}/{rest..}`
    pub fn business_endpoint(&self, business_id: &str, rest: &[&str]) -> Result<Url, AppError> {
        let mut segments = vec![AGENDA_PREFIX, "businesses", business_id];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }

    /// `/api/agenda/public/{slug}/{rest..}`
    pub fn public_endpoint(&self, slug: &str, rest: &[&str]) -> Result<Url, AppError> {
        let mut segments = vec![AGENDA_PREFIX, "public", slug];
        segments.extend_from_slice(rest);
        self.endpoint(&segments)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfigBuilder::default().build()
    }
}

// API CONFIGURATION BUILDER
#[derive(Debug, Default)]
pub struct ApiConfigBuilder {
    base_url: Option<String>,
}

impl ApiConfigBuilder {
    /// Sets a custom base URL (primarily for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn build(self) -> ApiConfig {
        let base_url = self
            .base_url
            .filter(|url| !url.is_empty())
            .or_else(|| Some(Config::BACKEND_URL.to_string()).filter(|url| !url.is_empty()))
            .unwrap_or_else(page_origin);

        ApiConfig { base_url }
    }
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> String {
    gloo::utils::window()
        .location()
        .origin()
        .unwrap_or_else(|_| FALLBACK_ORIGIN.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> String {
    FALLBACK_ORIGIN.to_string()
}

// API RESPONSE TYPES
/// FastAPI error body.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Extracts the human-readable `detail` of an error body. Validation errors
/// carry a list of `{msg}` objects instead of a string.
fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(detail) => Some(detail),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[derive(Serialize)]
struct AppointmentRange {
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

// AGENDA CLIENT
/// HTTP client for the scheduling backend.
#[derive(Debug, Clone)]
pub struct AgendaClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl AgendaClient {
    pub fn new() -> Result<Self, AppError> {
        Self::with_config(ApiConfig::default())
    }

    pub fn with_config(config: ApiConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    // AUTH

    /// Trades the one-time id from the identity provider for a session cookie.
    pub async fn exchange_session(&self, session_id: &str) -> Result<User, AppError> {
        let url = self.config.endpoint(&["auth", "session"])?;
        let body = SessionExchange {
            session_id: session_id.to_string(),
        };
        self.fetch(self.request(Method::POST, url, Credentials::Include).json(&body))
            .await
    }

    pub async fn current_user(&self) -> Result<User, AppError> {
        let url = self.config.endpoint(&["auth", "me"])?;
        self.fetch(self.request(Method::GET, url, Credentials::Include))
            .await
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        let url = self.config.endpoint(&["auth", "logout"])?;
        self.execute(self.request(Method::POST, url, Credentials::Include))
            .await
    }

    // BUSINESSES

    pub async fn list_businesses(&self) -> Result<Vec<Business>, AppError> {
        let url = self.config.endpoint(&[AGENDA_PREFIX, "businesses"])?;
        self.fetch(self.request(Method::GET, url, Credentials::Include))
            .await
    }

    pub async fn create_business(&self, business: &NewBusiness) -> Result<Business, AppError> {
        let url = self.config.endpoint(&[AGENDA_PREFIX, "businesses"])?;
        self.fetch(self.request(Method::POST, url, Credentials::Include).json(business))
            .await
    }

    pub async fn update_business(
        &self,
        business_id: &str,
        update: &BusinessUpdate,
    ) -> Result<(), AppError> {
        let url = self.config.business_endpoint(business_id, &[])?;
        self.execute(self.request(Method::PUT, url, Credentials::Include).json(update))
            .await
    }

    // CLIENTS

    pub async fn list_clients(&self, business_id: &str) -> Result<Vec<Client>, AppError> {
        let url = self.config.business_endpoint(business_id, &["clients"])?;
        self.fetch(self.request(Method::GET, url, Credentials::Include))
            .await
    }

    pub async fn create_client(
        &self,
        business_id: &str,
        client: &ClientInput,
    ) -> Result<Client, AppError> {
        let url = self.config.business_endpoint(business_id, &["clients"])?;
        self.fetch(self.request(Method::POST, url, Credentials::Include).json(client))
            .await
    }

    pub async fn update_client(
        &self,
        business_id: &str,
        client_id: &str,
        client: &ClientInput,
    ) -> Result<(), AppError> {
        let url = self
            .config
            .business_endpoint(business_id, &["clients", client_id])?;
        self.execute(self.request(Method::PUT, url, Credentials::Include).json(client))
            .await
    }

    pub async fn delete_client(&self, business_id: &str, client_id: &str) -> Result<(), AppError> {
        let url = self
            .config
            .business_endpoint(business_id, &["clients", client_id])?;
        self.execute(self.request(Method::DELETE, url, Credentials::Include))
            .await
    }

    /// A client's appointments, most recent first.
    pub async fn client_history(
        &self,
        business_id: &str,
        client_id: &str,
    ) -> Result<Vec<Appointment>, AppError> {
        let url = self
            .config
            .business_endpoint(business_id, &["clients", client_id, "history"])?;
        self.fetch(self.request(Method::GET, url, Credentials::Include))
            .await
    }

    // SERVICES AND STAFF

    pub async fn list_services(&self, business_id: &str) -> Result<Vec<Service>, AppError> {
        let url = self.config.business_endpoint(business_id, &["services"])?;
        self.fetch(self.request(Method::GET, url, Credentials::Include))
            .await
    }

    pub async fn create_service(
        &self,
        business_id: &str,
        service: &ServiceInput,
    ) -> Result<Service, AppError> {
        let url = self.config.business_endpoint(business_id, &["services"])?;
        self.fetch(self.request(Method::POST, url, Credentials::Include).json(service))
            .await
    }

    pub async fn update_service(
        &self,
        business_id: &str,
        service_id: &str,
        update: &ServiceUpdate,
    ) -> Result<(), AppError> {
        let url = self
            .config
            .business_endpoint(business_id, &["services", service_id])?;
        self.execute(self.request(Method::PUT, url, Credentials::Include).json(update))
            .await
    }

    pub async fn list_staff(&self, business_id: &str) -> Result<Vec<Staff>, AppError> {
        let url = self.config.business_endpoint(business_id, &["staff"])?;
        self.fetch(self.request(Method::GET, url, Credentials::Include))
            .await
    }

    // APPOINTMENTS

    /// Appointments starting within `[start, end)`.
    pub async fn list_appointments(
        &self,
        business_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError> {
        let url = self.config.business_endpoint(business_id, &["appointments"])?;
        let range = AppointmentRange {
            start_date: start,
            end_date: end,
        };
        self.fetch(
            self.request(Method::GET, url, Credentials::Include)
                .query(&range),
        )
        .await
    }

    pub async fn create_appointment(
        &self,
        business_id: &str,
        appointment: &NewAppointment,
    ) -> Result<Appointment, AppError> {
        let url = self.config.business_endpoint(business_id, &["appointments"])?;
        self.fetch(
            self.request(Method::POST, url, Credentials::Include)
                .json(appointment),
        )
        .await
    }

    pub async fn update_appointment(
        &self,
        business_id: &str,
        appointment_id: &str,
        update: &AppointmentUpdate,
    ) -> Result<(), AppError> {
        let url = self
            .config
            .business_endpoint(business_id, &["appointments", appointment_id])?;
        self.execute(self.request(Method::PUT, url, Credentials::Include).json(update))
            .await
    }

    pub async fn dashboard(&self, business_id: &str) -> Result<DashboardSummary, AppError> {
        let url = self.config.business_endpoint(business_id, &["dashboard"])?;
        self.fetch(self.request(Method::GET, url, Credentials::Include))
            .await
    }

    // PUBLIC BOOKING

    pub async fn public_business(&self, slug: &str) -> Result<PublicBusiness, AppError> {
        let url = self.config.public_endpoint(slug, &[])?;
        self.fetch(self.request(Method::GET, url, Credentials::Omit))
            .await
    }

    pub async fn available_slots(
        &self,
        slug: &str,
        query: &SlotQuery,
    ) -> Result<Vec<AvailableSlot>, AppError> {
        let url = self.config.public_endpoint(slug, &["available-slots"])?;
        let response: SlotsResponse = self
            .fetch(
                self.request(Method::GET, url, Credentials::Omit)
                    .query(&query.query_pairs()),
            )
            .await?;
        Ok(response.slots)
    }

    pub async fn book(
        &self,
        slug: &str,
        booking: &BookingRequest,
    ) -> Result<BookingConfirmation, AppError> {
        let url = self.config.public_endpoint(slug, &["book"])?;
        self.fetch(self.request(Method::POST, url, Credentials::Omit).json(booking))
            .await
    }

    // TRANSPORT

    fn request(&self, method: Method, url: Url, credentials: Credentials) -> RequestBuilder {
        let builder = self.http.request(method, url);
        with_credentials(builder, credentials)
    }

    /// Sends a request and decodes its JSON body.
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::DataError(format!("Failed to parse response: {e}")))
    }

    /// Sends a request whose response body is not needed.
    async fn execute(&self, request: RequestBuilder) -> Result<(), AppError> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, AppError> {
        let response = request.send().await.map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.error_for_status(status, &body));
        }
        Ok(response)
    }

    /// Converts a reqwest error into an appropriate AppError.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::NetworkError(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::NetworkError(format!("Request error: {error}"))
        } else {
            AppError::NetworkError(format!("Network error: {error}"))
        }
    }

    /// Maps a non-success status to an error, preferring the server's `detail`.
    fn error_for_status(&self, status: StatusCode, body: &str) -> AppError {
        let detail = error_detail(body);
        match status.as_u16() {
            401 | 403 => AppError::AuthError(
                detail.unwrap_or_else(|| format!("Authentication failed: {status}")),
            ),
            404 => AppError::NotFound(detail.unwrap_or_else(|| "Not found".to_string())),
            400..=499 => {
                AppError::ApiError(detail.unwrap_or_else(|| format!("Request failed: {status}")))
            }
            500..=599 => AppError::ApiError(detail.unwrap_or_else(|| format!("Server error: {status}"))),
            _ => AppError::ApiError(format!("Unexpected status {status}")),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(builder: RequestBuilder, credentials: Credentials) -> RequestBuilder {
    match credentials {
        Credentials::Include => builder.fetch_credentials_include(),
        Credentials::Omit => builder.fetch_credentials_omit(),
    }
}

// Cookies are a browser concern.
#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(builder: RequestBuilder, _credentials: Credentials) -> RequestBuilder {
    builder
}
