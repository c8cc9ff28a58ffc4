//! Typed calls to the portal's JSON endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Each call returns `Result<_, FetchError>`; deciding whether a failure is
//! worth more than a log line is left to the caller.

#[cfg(test)]
#[path = "net_test.rs"]
mod net_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::env::{HttpClient, HttpResponse};
use crate::error::FetchError;

/// Best-effort view of the signed-in user. Scalars are kept as text, so
/// numeric and string ids read the same.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub created_at: Option<String>,
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl SessionUser {
    /// Read whatever the server sent as `user`. An object contributes its
    /// known fields; a bare scalar is taken as the id.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(fields) => {
                let field = |name: &str| fields.get(name).and_then(scalar_text);
                Self {
                    id: field("id"),
                    email: field("email"),
                    full_name: field("full_name"),
                    created_at: field("created_at"),
                }
            }
            other => Self { id: scalar_text(other), ..Self::default() },
        }
    }

    /// Human-readable identity for logs.
    #[must_use]
    pub fn label(&self) -> String {
        [&self.full_name, &self.email, &self.id]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .map_or_else(|| "unknown".to_owned(), Clone::clone)
    }
}

/// Response of the auth-status endpoint. `user` is kept as raw JSON so any
/// shape the server sends decodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<Value>,
}

impl AuthStatus {
    #[must_use]
    pub fn session_user(&self) -> Option<SessionUser> {
        self.user.as_ref().map(SessionUser::from_value)
    }
}

/// Response of the field validation endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldVerdict {
    pub valid: bool,
    #[serde(default)]
    pub message: String,
}

fn expect_success(response: HttpResponse) -> Result<HttpResponse, FetchError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(FetchError::Status(response.status))
    }
}

/// Ask the server whether this browser has a session.
///
/// # Errors
///
/// Returns an error if the request fails, the status is not 2xx, or the
/// body is not an auth-status object.
pub async fn fetch_auth_status(http: &dyn HttpClient, endpoint: &str) -> Result<AuthStatus, FetchError> {
    let response = expect_success(http.get(endpoint).await?)?;
    response.json()
}

/// Hit the logout endpoint. Success is a 2xx status; the body is ignored.
///
/// # Errors
///
/// Returns an error if the request fails or the status is not 2xx.
pub async fn request_logout(http: &dyn HttpClient, endpoint: &str) -> Result<(), FetchError> {
    expect_success(http.get(endpoint).await?)?;
    Ok(())
}

/// Server-side email check (format and availability).
///
/// # Errors
///
/// Returns an error if the request fails, the status is not 2xx, or the
/// body is not a verdict object.
pub async fn validate_email_remote(
    http: &dyn HttpClient,
    endpoint: &str,
    email: &str,
) -> Result<FieldVerdict, FetchError> {
    let payload = serde_json::json!({ "email": email });
    let response = expect_success(http.post_json(endpoint, payload).await?)?;
    response.json()
}

/// Server-side password rule check.
///
/// # Errors
///
/// Returns an error if the request fails, the status is not 2xx, or the
/// body is not a verdict object.
pub async fn validate_password_remote(
    http: &dyn HttpClient,
    endpoint: &str,
    password: &str,
) -> Result<FieldVerdict, FetchError> {
    let payload = serde_json::json!({ "password": password });
    let response = expect_success(http.post_json(endpoint, payload).await?)?;
    response.json()
}
