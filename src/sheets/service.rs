// src/sheets/service.rs
//! The two bridge operations: list orders and update one status cell.

use std::sync::Arc;
use tracing::{debug, info};

use super::client::{SheetsApi, SheetsConnector};
use super::error::{OrdersError, OrdersResult};
use super::range::{orders_range, status_cell_range, title_from_range, DEFAULT_SHEET_TITLE};
use super::record::{map_rows, OrderRecord};
use crate::settings::AppConfig;

/// A status write as received from the display layer, before validation.
#[derive(Debug, Clone, Default)]
pub struct StatusUpdate {
    pub row_number: Option<u32>,
    pub status_code: Option<String>,
    pub sheet_title: Option<String>,
}

pub struct OrderService<C> {
    config: Arc<AppConfig>,
    connector: C,
}

impl<C: SheetsConnector> OrderService<C> {
    pub fn new(config: Arc<AppConfig>, connector: C) -> Self {
        Self { config, connector }
    }

    fn spreadsheet_id(&self) -> OrdersResult<&str> {
        self.config.spreadsheet_id.as_deref().ok_or_else(|| {
            OrdersError::Configuration("GOOGLE_SHEET_ID is missing from .env.local".to_string())
        })
    }

    /// Read every data row of the configured tab, in sheet order.
    pub async fn list_orders(&self) -> OrdersResult<Vec<OrderRecord>> {
        let spreadsheet_id = self.spreadsheet_id()?;
        let api = self.connector.connect().await?;

        let (title, range) = match title_from_range(&self.config.range) {
            Some(title) => (title, self.config.range.clone()),
            None => {
                let title = self.infer_title(&api, spreadsheet_id).await?;
                let range = orders_range(&title);
                (title, range)
            }
        };

        debug!("Reading orders from {}", range);
        let values = api.get_values(spreadsheet_id, &range).await?;
        debug!("Sheets returned range {:?}", values.range);
        let records = map_rows(&values.values, &title, &self.config.time_normalizer());
        info!("Fetched {} orders from '{}'", records.len(), title);
        Ok(records)
    }

    /// Overwrite the status code cell of one row. Last write wins.
    pub async fn update_status(&self, request: StatusUpdate) -> OrdersResult<()> {
        let (row_number, status_code) = validate(&request)?;
        let spreadsheet_id = self.spreadsheet_id()?;
        if self.config.read_only {
            return Err(OrdersError::Configuration(
                "Status updates are disabled in read-only mode".to_string(),
            ));
        }
        let api = self.connector.connect().await?;

        let title = match request
            .sheet_title
            .filter(|t| !t.trim().is_empty())
            .or_else(|| title_from_range(&self.config.range))
        {
            Some(title) => title,
            None => self.infer_title(&api, spreadsheet_id).await?,
        };

        let range = status_cell_range(&title, row_number);
        api.update_values(spreadsheet_id, &range, vec![vec![status_code.clone()]])
            .await?;
        info!("Row {} of '{}' set to status {}", row_number, title, status_code);
        Ok(())
    }

    /// Title for a range that names no tab: the GID's tab when configured,
    /// otherwise the default.
    async fn infer_title(&self, api: &C::Api, spreadsheet_id: &str) -> OrdersResult<String> {
        let Some(gid) = self.config.sheet_gid else {
            return Ok(DEFAULT_SHEET_TITLE.to_string());
        };
        api.sheet_tabs(spreadsheet_id)
            .await?
            .into_iter()
            .find(|tab| tab.sheet_id == gid)
            .map(|tab| tab.title)
            .ok_or(OrdersError::SheetNotFound(gid))
    }
}

fn validate(request: &StatusUpdate) -> OrdersResult<(u32, String)> {
    let row_number = request.row_number.filter(|row| *row > 0);
    let status_code = request
        .status_code
        .as_deref()
        .map(str::trim)
        .filter(|code| !code.is_empty());
    match (row_number, status_code) {
        (Some(row), Some(code)) => Ok((row, code.to_string())),
        _ => Err(OrdersError::InvalidArgument(
            "Invalid parameters for status update.".to_string(),
        )),
    }
}
