// src/cli/list_orders.rs
use crate::bridge::{self, protocol::BridgeRequest, protocol::BridgeResponse};
use crate::sheets::client::SheetsConnector;
use crate::sheets::OrderService;

pub async fn run<C: SheetsConnector>(service: &OrderService<C>) -> std::io::Result<BridgeResponse> {
    let response = bridge::handle(service, BridgeRequest::ListOrders).await;
    bridge::write_response(&mut tokio::io::stdout(), &response).await?;
    Ok(response)
}
