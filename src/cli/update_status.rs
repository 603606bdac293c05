// src/cli/update_status.rs
use serde_json::Value;

use crate::bridge::{self, protocol::BridgeRequest, protocol::BridgeResponse};
use crate::sheets::client::SheetsConnector;
use crate::sheets::OrderService;

pub async fn run<C: SheetsConnector>(
    service: &OrderService<C>,
    row_number: u32,
    status_code: String,
    sheet_title: Option<String>,
) -> std::io::Result<BridgeResponse> {
    let request = BridgeRequest::UpdateStatus {
        row_number: Some(row_number),
        status_code: Some(Value::String(status_code)),
        sheet_title,
    };
    let response = bridge::handle(service, request).await;
    bridge::write_response(&mut tokio::io::stdout(), &response).await?;
    Ok(response)
}
