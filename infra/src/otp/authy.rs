//! Authy OTP Provider Client
//!
//! Talks to the Authy phone verification API:
//!
//! - `POST /protected/json/users/new` registers a user and returns their Authy ID
//! - `GET /protected/json/sms/{id}?force=true` texts a fresh code
//! - `GET /protected/json/verify/{code}/{id}` checks a code
//!
//! The API key travels in the `X-Authy-API-Key` header. One client is built at
//! startup and shared; the inner `reqwest::Client` pools connections.
//!
//! Only Authy's wrong-token answer is reported as `Ok(false)` from a
//! verification. Rate limiting, a bad API key, an unknown Authy ID and 5xx
//! replies are provider errors.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use av_core::services::verification::OtpProviderTrait;

use crate::config::OtpConfig;
use crate::InfrastructureError;

const API_KEY_HEADER: &str = "X-Authy-API-Key";

/// `error_code` Authy attaches to a 401 for a wrong or expired token
const TOKEN_INVALID_CODE: &str = "60020";

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    success: Value,
    user: Option<AuthyUser>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthyUser {
    id: u64,
}

#[derive(Debug, Default, Deserialize)]
struct StatusResponse {
    #[serde(default)]
    success: Value,
    #[serde(default)]
    ignored: Value,
    #[serde(default)]
    error_code: Value,
    #[serde(default)]
    token: Value,
    message: Option<String>,
}

impl StatusResponse {
    fn error_code(&self) -> Option<String> {
        match &self.error_code {
            Value::String(code) => Some(code.clone()),
            Value::Number(code) => Some(code.to_string()),
            _ => None,
        }
    }

    /// The token itself was rejected, as opposed to the request
    fn is_wrong_token(&self) -> bool {
        match self.error_code() {
            Some(code) => code == TOKEN_INVALID_CODE,
            None => matches!(&self.token, Value::String(t) if t.eq_ignore_ascii_case("is invalid")),
        }
    }
}

/// Authy returns booleans both as JSON booleans and as the strings "true"/"false"
fn is_true(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// HTTP client for the Authy API
#[derive(Clone)]
pub struct AuthyOtpProvider {
    client: Client,
    api_url: String,
    api_key: String,
}

impl AuthyOtpProvider {
    /// Create a new Authy client
    pub fn new(config: &OtpConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config("AUTHY_KEY not set".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                InfrastructureError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Register a user with Authy and return their Authy ID
    #[instrument(skip(self, email, phone_number))]
    pub async fn create_user(
        &self,
        email: &str,
        phone_number: &str,
        country_code: &str,
    ) -> Result<String, InfrastructureError> {
        let url = format!("{}/protected/json/users/new", self.api_url);
        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .form(&[
                ("user[email]", email),
                ("user[cellphone]", phone_number),
                ("user[country_code]", country_code),
            ])
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            let body = Self::error_body(response).await;
            return Err(Self::api_error(status, &body));
        }

        let body: RegisterResponse = response.json().await?;
        match body.user {
            Some(user) if status.is_success() && is_true(&body.success) => {
                debug!(authy_id = user.id, "Authy user registered");
                Ok(user.id.to_string())
            }
            _ => {
                let message = body.message.unwrap_or_else(|| status.to_string());
                warn!(status = %status, message = %message, "Authy rejected user registration");
                Err(InfrastructureError::Otp(format!(
                    "User registration rejected: {}",
                    message
                )))
            }
        }
    }

    /// Ask Authy to text a code, returning `false` when the request was ignored
    #[instrument(skip(self))]
    pub async fn request_sms(&self, authy_id: &str) -> Result<bool, InfrastructureError> {
        let url = format!("{}/protected/json/sms/{}", self.api_url, authy_id);
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("force", "true")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::error_body(response).await;
            return Err(Self::api_error(status, &body));
        }

        let body: StatusResponse = response.json().await?;
        let sent = is_true(&body.success) && !is_true(&body.ignored);
        if !sent {
            warn!(
                message = body.message.as_deref().unwrap_or(""),
                "Authy did not send a code"
            );
        }
        Ok(sent)
    }

    /// Check a code, returning `false` for a wrong or expired code
    #[instrument(skip(self, code))]
    pub async fn verify_token(
        &self,
        authy_id: &str,
        code: &str,
    ) -> Result<bool, InfrastructureError> {
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Ok(false);
        }

        let url = format!("{}/protected/json/verify/{}/{}", self.api_url, code, authy_id);
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: StatusResponse = response.json().await?;
            return Ok(is_true(&body.success));
        }

        let body = Self::error_body(response).await;
        if status == StatusCode::UNAUTHORIZED && body.is_wrong_token() {
            debug!("Authy rejected verification code");
            return Ok(false);
        }
        Err(Self::api_error(status, &body))
    }

    /// Error bodies are best effort; a non-JSON body yields empty fields
    async fn error_body(response: Response) -> StatusResponse {
        let text = response.text().await.unwrap_or_default();
        serde_json::from_str(&text).unwrap_or_default()
    }

    fn api_error(status: StatusCode, body: &StatusResponse) -> InfrastructureError {
        let error_code = body.error_code();
        warn!(
            status = %status,
            error_code = error_code.as_deref().unwrap_or(""),
            message = body.message.as_deref().unwrap_or(""),
            "Authy API error"
        );
        match error_code {
            Some(code) => {
                InfrastructureError::Otp(format!("Authy API returned {} (error {})", status, code))
            }
            None => InfrastructureError::Otp(format!("Authy API returned {}", status)),
        }
    }
}

#[async_trait]
impl OtpProviderTrait for AuthyOtpProvider {
    async fn register_user(
        &self,
        email: &str,
        phone_number: &str,
        country_code: &str,
    ) -> Result<String, String> {
        self.create_user(email, phone_number, country_code)
            .await
            .map_err(|e| e.to_string())
    }

    async fn request_code(&self, provider_user_id: &str) -> Result<bool, String> {
        self.request_sms(provider_user_id)
            .await
            .map_err(|e| e.to_string())
    }

    async fn verify_code(&self, provider_user_id: &str, code: &str) -> Result<bool, String> {
        self.verify_token(provider_user_id, code)
            .await
            .map_err(|e| e.to_string())
    }
}
