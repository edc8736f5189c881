//! Typed access to the job-board REST API.
//!
//! Every call goes through [`GatewayClient::request`], which attaches the bearer
//! token, normalizes failures into [`JobBoardError`], and handles a rejected
//! session by clearing it and sending the user to the login view.

use super::transport::{HttpRequest, HttpResponse, RequestBody, Transport, TransportError};
use crate::app::filters::QueryParameters;
use crate::app::routes::{Navigator, Route};
use crate::domain::error::{JobBoardError, Result};
use crate::domain::{
    Company, CompanyRegistration, HealthStatus, Job, NewJob, Role, Tag, TokenResponse, User, UserRegistration,
};
use crate::storage::SessionContext;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;

/// HTTP status the backend uses for a missing or rejected credential.
const STATUS_UNAUTHORIZED: u16 = 401;

/// Whether a request speaks for the stored session. A 401 on a detached
/// request (a login attempt) says nothing about the stored token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionUse {
    Attached,
    Detached,
}

/// Client for the job-board backend.
///
/// Cheap to share behind an `Arc`; requests may run concurrently.
#[derive(Clone)]
pub struct GatewayClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionContext>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient").field("session", &self.session).finish_non_exhaustive()
    }
}

impl GatewayClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionContext>, navigator: Arc<dyn Navigator>) -> Self {
        Self { transport, session, navigator }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Sends `request` and decodes a successful JSON body into `T`.
    ///
    /// The session token, if any, replaces whatever bearer the request carried.
    ///
    /// # Errors
    ///
    /// - [`JobBoardError::SessionExpired`]: 401 on a request that carried a
    ///   token. The session is cleared and [`Route::Login`] requested first.
    /// - [`JobBoardError::Gateway`]: any other non-success status, including
    ///   401 on an anonymous request (after the same clearing and redirect)
    /// - [`JobBoardError::Network`]: no response, or the request timed out
    /// - [`JobBoardError::Parse`]: the success body did not decode as `T`
    pub async fn request<T: DeserializeOwned>(&self, mut request: HttpRequest) -> Result<T> {
        request.bearer = self.session.token();
        self.send(request, SessionUse::Attached).await
    }

    async fn send<T: DeserializeOwned>(&self, request: HttpRequest, session_use: SessionUse) -> Result<T> {
        let span = tracing::debug_span!(
            "gateway_request",
            method = request.method.as_str(),
            endpoint = %request.endpoint(),
            authenticated = request.bearer.is_some(),
        );
        self.dispatch(request, session_use).instrument(span).await
    }

    async fn dispatch<T: DeserializeOwned>(&self, request: HttpRequest, session_use: SessionUse) -> Result<T> {
        let authenticated = request.bearer.is_some();
        let endpoint = request.endpoint();

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(endpoint = %endpoint, error = %e, "request failed without response");
            match e {
                TransportError::Timeout => JobBoardError::Network("request timed out".to_string()),
                TransportError::Connection(message) => JobBoardError::Network(message),
            }
        })?;

        if response.is_success() {
            tracing::debug!(status = response.status, "request succeeded");
            return serde_json::from_slice(&response.body).map_err(|e| {
                JobBoardError::Parse(format!("unexpected response from {endpoint}: {e}"))
            });
        }

        let message = error_message(&response);
        tracing::debug!(status = response.status, error = %message, "request rejected");

        if response.status == STATUS_UNAUTHORIZED && session_use == SessionUse::Attached {
            self.session.expire();
            self.navigator.navigate(Route::Login);
            if authenticated {
                return Err(JobBoardError::SessionExpired);
            }
        }

        Err(JobBoardError::Gateway { status: response.status, message })
    }

    async fn get<T: DeserializeOwned>(&self, path: String) -> Result<T> {
        self.request(HttpRequest::get(path)).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let value = serde_json::to_value(body).map_err(|e| JobBoardError::Parse(format!("invalid request body: {e}")))?;
        self.request(HttpRequest::post(path, RequestBody::Json(value))).await
    }

    /// `GET /jobs/` with the given filter parameters.
    pub async fn list_jobs(&self, params: &QueryParameters) -> Result<Vec<Job>> {
        self.request(HttpRequest::get("/jobs/").with_query(params.clone())).await
    }

    pub async fn get_job(&self, id: i64) -> Result<Job> {
        self.get(format!("/jobs/{id}")).await
    }

    /// `POST /jobs/`. Requires a company session.
    pub async fn create_job(&self, job: &NewJob) -> Result<Job> {
        self.post_json("/jobs/", job).await
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.get("/tags/".to_string()).await
    }

    pub async fn list_companies(&self) -> Result<Vec<Company>> {
        self.get("/companies/".to_string()).await
    }

    pub async fn get_company(&self, id: i64) -> Result<Company> {
        self.get(format!("/companies/{id}")).await
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        self.get("/health".to_string()).await
    }

    /// Authenticates as `role` and stores the resulting session.
    ///
    /// Credentials are sent form-encoded as `username`/`password`. The backend
    /// returns only a token, so the cached user record is synthesized from the
    /// email and role. The request is sent without the stored token, and the
    /// stored session is only replaced once the backend issues a new token.
    ///
    /// # Errors
    ///
    /// Fails with the backend's message on bad credentials (the previous
    /// session stays in place), or with a storage error if the new session
    /// cannot be persisted.
    pub async fn login(&self, role: Role, email: &str, password: &str) -> Result<User> {
        let form = RequestBody::Form(vec![
            ("username".to_string(), email.to_string()),
            ("password".to_string(), password.to_string()),
        ]);
        let token: TokenResponse = self
            .send(HttpRequest::post(format!("/auth/{}/login", role.as_str()), form), SessionUse::Detached)
            .await?;

        let user = User::after_login(email, role);
        self.session.login(token.access_token, user.clone(), role)?;
        Ok(user)
    }

    /// Drops the local session. The backend keeps no session state to revoke.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted entries cannot be removed.
    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }

    /// Creates a job-seeker account. The response body is returned undecoded.
    pub async fn register_user(&self, registration: &UserRegistration) -> Result<serde_json::Value> {
        self.post_json("/auth/user/register", registration).await
    }

    /// Creates a company account. The response body is returned undecoded.
    pub async fn register_company(&self, registration: &CompanyRegistration) -> Result<serde_json::Value> {
        self.post_json("/auth/company/register", registration).await
    }
}

/// The backend's `detail` string when present, otherwise a generic status line.
fn error_message(response: &HttpResponse) -> String {
    serde_json::from_slice::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|body| body.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| format!("HTTP error, status {}", response.status))
}
