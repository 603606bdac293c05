// src/bridge/mod.rs
//! Narrow request/response bridge between the display layer and the order
//! service. Errors never cross the bridge as failures of the transport: each
//! is logged and folded into an `{ok:false, error}` envelope.

pub mod protocol;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};

use crate::sheets::client::SheetsConnector;
use crate::sheets::OrderService;
use protocol::{status_update, BridgeRequest, BridgeResponse};

/// Run one request to completion.
pub async fn handle<C: SheetsConnector>(
    service: &OrderService<C>,
    request: BridgeRequest,
) -> BridgeResponse {
    debug!("Bridge request on {}", request.channel());
    match request {
        BridgeRequest::ListOrders => match service.list_orders().await {
            Ok(records) => match serde_json::to_value(records) {
                Ok(data) => BridgeResponse::with_data(data),
                Err(e) => BridgeResponse::failure(e.to_string()),
            },
            Err(e) => {
                error!("[Sheets] Read error: {}", e);
                BridgeResponse::failure(e.to_string())
            }
        },
        BridgeRequest::UpdateStatus {
            row_number,
            status_code,
            sheet_title,
        } => {
            let update = status_update(row_number, status_code.as_ref(), sheet_title);
            match service.update_status(update).await {
                Ok(()) => BridgeResponse::ack(),
                Err(e) => {
                    error!("[Sheets] Write error: {}", e);
                    BridgeResponse::failure(e.to_string())
                }
            }
        }
    }
}

/// Decode and run one request line.
pub async fn handle_line<C: SheetsConnector>(service: &OrderService<C>, line: &str) -> BridgeResponse {
    match serde_json::from_str::<BridgeRequest>(line) {
        Ok(request) => handle(service, request).await,
        Err(e) => {
            error!("Invalid bridge request {:?}: {}", line, e);
            BridgeResponse::failure(format!("Invalid bridge request: {}", e))
        }
    }
}

/// Serve line-delimited requests until the reader reaches EOF. Requests are
/// handled strictly one at a time; a line that is not UTF-8 gets a failure
/// envelope like any other malformed request.
pub async fn serve<C, R, W>(service: &OrderService<C>, mut reader: R, mut writer: W) -> std::io::Result<()>
where
    C: SheetsConnector,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                handle_line(service, line).await
            }
            Err(e) => {
                error!("Bridge request is not valid UTF-8: {}", e);
                BridgeResponse::failure(format!("Invalid bridge request: {}", e))
            }
        };
        write_response(&mut writer, &response).await?;
    }
    debug!("Bridge input closed");
    Ok(())
}

pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &BridgeResponse,
) -> std::io::Result<()> {
    let mut out = serde_json::to_string(response)?;
    out.push('\n');
    writer.write_all(out.as_bytes()).await?;
    writer.flush().await
}
