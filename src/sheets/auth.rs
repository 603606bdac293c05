// src/sheets/auth.rs
//! Service-account authentication (OAuth 2.0 JWT bearer grant).

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{OrdersError, OrdersResult};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// OAuth scope requested for the spreadsheet API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    ReadWrite,
    ReadOnly,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::ReadWrite => "https://www.googleapis.com/auth/spreadsheets",
            Scope::ReadOnly => "https://www.googleapis.com/auth/spreadsheets.readonly",
        }
    }
}

/// Fields of a downloaded service-account key file that we use.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> OrdersResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            OrdersError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            OrdersError::Configuration(format!("Invalid service account file {}: {}", path.display(), e))
        })
    }

    /// Signed RS256 assertion for the token endpoint.
    pub fn assertion(&self, scope: Scope, issued_at: i64) -> OrdersResult<String> {
        let claims = Claims {
            iss: &self.client_email,
            scope: scope.as_str(),
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        Ok(jsonwebtoken::encode(&header, &claims, &key)?)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange a signed assertion for a bearer token.
pub async fn fetch_access_token(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
    scope: Scope,
) -> OrdersResult<String> {
    let assertion = key.assertion(scope, Utc::now().timestamp())?;
    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(OrdersError::RemoteService(format!(
            "Token request failed ({}): {}",
            status, body
        )));
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}
