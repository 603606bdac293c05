// src/bridge/protocol.rs
//! Wire types exchanged with the display layer.
//!
//! One JSON object per line in each direction. Requests are tagged by the
//! channel name the display layer invokes; every response is the uniform
//! `{ok, data | error}` envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sheets::status::scalar_to_string;
use crate::sheets::StatusUpdate;

/// Request sent by the display layer
#[derive(Debug, Deserialize)]
#[serde(tag = "channel")]
pub enum BridgeRequest {
    /// List every order row of the configured tab
    #[serde(rename = "orders:list", alias = "pedidos:listar")]
    ListOrders,
    /// Overwrite the status code of one row
    #[serde(rename = "orders:updateStatus", alias = "pedidos:updateStatus")]
    UpdateStatus {
        #[serde(rename = "rowNumber", default)]
        row_number: Option<u32>,
        /// Any JSON scalar; coerced to a trimmed string
        #[serde(rename = "statusCode", default)]
        status_code: Option<Value>,
        #[serde(rename = "sheetTitle", default)]
        sheet_title: Option<String>,
    },
}

impl BridgeRequest {
    pub fn channel(&self) -> &'static str {
        match self {
            BridgeRequest::ListOrders => "orders:list",
            BridgeRequest::UpdateStatus { .. } => "orders:updateStatus",
        }
    }
}

/// `false` and numeric zero count as a missing status code, like null.
pub fn status_update(
    row_number: Option<u32>,
    status_code: Option<&Value>,
    sheet_title: Option<String>,
) -> StatusUpdate {
    let status_code = status_code.filter(|code| !is_falsy(code));
    StatusUpdate {
        row_number,
        status_code: Some(scalar_to_string(status_code)).filter(|code| !code.is_empty()),
        sheet_title,
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

/// Response returned to the display layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BridgeResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BridgeResponse {
    pub fn ack() -> Self {
        Self {
            ok: true,
            data: None,
            error: None,
        }
    }

    pub fn with_data(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
