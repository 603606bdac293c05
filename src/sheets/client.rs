// src/sheets/client.rs
//! Google Sheets v4 REST calls used by the order service.
//!
//! - `SheetsConnector` authenticates once per logical operation
//! - `SheetsApi` is the authenticated session: metadata, values get, values update
//! - Nothing is cached between operations

use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::auth::{fetch_access_token, Scope, ServiceAccountKey};
use super::error::{OrdersError, OrdersResult};
use crate::settings::io::SearchRoots;

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// `sheets[].properties` of the spreadsheet metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub sheet_id: i64,
    pub title: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

/// Values returned by `values.get`. The API omits `values` for an empty range.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    #[serde(default)]
    updated_range: Option<String>,
}

/// Authenticated access to one spreadsheet service session.
pub(crate) trait SheetsApi {
    async fn sheet_tabs(&self, spreadsheet_id: &str) -> OrdersResult<Vec<SheetProperties>>;

    async fn get_values(&self, spreadsheet_id: &str, range: &str) -> OrdersResult<ValueRange>;

    /// Overwrite `range` with `values` using the RAW input option.
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> OrdersResult<()>;
}

/// Produces an authenticated session for a single operation.
pub(crate) trait SheetsConnector {
    type Api: SheetsApi;

    async fn connect(&self) -> OrdersResult<Self::Api>;
}

/// Resolves `service-account.json` and exchanges it for a bearer token on
/// every `connect`.
pub struct ServiceAccountConnector {
    roots: SearchRoots,
    scope: Scope,
    http: reqwest::Client,
}

impl ServiceAccountConnector {
    pub fn new(roots: SearchRoots, scope: Scope) -> Self {
        Self {
            roots,
            scope,
            http: reqwest::Client::new(),
        }
    }
}

impl SheetsConnector for ServiceAccountConnector {
    type Api = SheetsClient;

    async fn connect(&self) -> OrdersResult<SheetsClient> {
        let key_path = self.roots.credential_file()?;
        debug!("Using service account key at {:?}", key_path);
        let key = ServiceAccountKey::from_file(&key_path)?;
        let token = fetch_access_token(&self.http, &key, self.scope).await?;
        Ok(SheetsClient::new(self.http.clone(), token))
    }
}

pub struct SheetsClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl SheetsClient {
    pub fn new(http: reqwest::Client, token: String) -> Self {
        Self {
            http,
            token,
            base_url: SHEETS_BASE_URL.to_string(),
        }
    }

    fn url(&self, segments: &[&str]) -> OrdersResult<Url> {
        spreadsheet_url(&self.base_url, segments)
    }
}

/// Build `<base>/<segments...>`, percent-encoding each segment so ranges like
/// `'Página 2'!A2:H` survive intact.
fn spreadsheet_url(base: &str, segments: &[&str]) -> OrdersResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| OrdersError::Configuration(format!("Invalid Sheets URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| OrdersError::Configuration(format!("Invalid Sheets URL: {}", base)))?
        .extend(segments);
    Ok(url)
}

/// Pass the API's own error message through when the body carries one.
async fn remote_error(response: reqwest::Response) -> OrdersError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    OrdersError::RemoteService(error_message(status, &body))
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| format!("Sheets API error ({}): {}", status, body))
}

impl SheetsApi for SheetsClient {
    async fn sheet_tabs(&self, spreadsheet_id: &str) -> OrdersResult<Vec<SheetProperties>> {
        let mut url = self.url(&[spreadsheet_id])?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties(sheetId,title)");

        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }
        let meta: SpreadsheetMeta = response.json().await?;
        Ok(meta.sheets.into_iter().map(|s| s.properties).collect())
    }

    async fn get_values(&self, spreadsheet_id: &str, range: &str) -> OrdersResult<ValueRange> {
        let url = self.url(&[spreadsheet_id, "values", range])?;

        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> OrdersResult<()> {
        let mut url = self.url(&[spreadsheet_id, "values", range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": values,
        });

        let response = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(remote_error(response).await);
        }
        let updated: UpdateValuesResponse = response.json().await?;
        debug!("Updated range {:?}", updated.updated_range);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_percent_encoded() {
        let url = spreadsheet_url(SHEETS_BASE_URL, &["abc", "values", "'Página 2'!A2:H"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/'P%C3%A1gina%202'!A2:H"
        );
    }

    #[test]
    fn test_slash_in_range_stays_in_segment() {
        let url = spreadsheet_url(SHEETS_BASE_URL, &["abc", "values", "A/B!F2:F2"]).unwrap();
        assert!(url.as_str().ends_with("/values/A%2FB!F2:F2"));
    }

    #[test]
    fn test_error_message_prefers_api_message() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(
            error_message(reqwest::StatusCode::FORBIDDEN, body),
            "The caller does not have permission"
        );
        assert_eq!(
            error_message(reqwest::StatusCode::BAD_GATEWAY, "upstream down"),
            "Sheets API error (502 Bad Gateway): upstream down"
        );
    }

    #[test]
    fn test_metadata_and_values_decode() {
        let meta: SpreadsheetMeta = serde_json::from_str(
            r#"{"sheets":[{"properties":{"sheetId":0,"title":"Página1"}},{"properties":{"sheetId":987,"title":"Pedidos"}}]}"#,
        )
        .unwrap();
        assert_eq!(meta.sheets[1].properties, SheetProperties { sheet_id: 987, title: "Pedidos".to_string() });

        let empty: ValueRange = serde_json::from_str(r#"{"range":"Pedidos!A2:H1000","majorDimension":"ROWS"}"#).unwrap();
        assert!(empty.values.is_empty());
    }
}
