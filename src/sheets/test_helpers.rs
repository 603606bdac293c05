// src/sheets/test_helpers.rs
// Test utilities: an in-memory spreadsheet behind the connector/API seams

#![cfg(test)]

use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use super::client::{SheetProperties, SheetsApi, SheetsConnector, ValueRange};
use super::error::{OrdersError, OrdersResult};
use super::service::OrderService;
use crate::settings::io::SearchRoots;
use crate::settings::AppConfig;

/// In-memory stand-in for the remote spreadsheet. Counts every connection
/// and call so tests can assert how many round-trips an operation made.
#[derive(Default)]
pub struct FakeSheets {
    pub tabs: Vec<SheetProperties>,
    pub rows: Vec<Vec<Value>>,
    pub fail_with: Option<String>,
    pub connects: Cell<usize>,
    pub metadata_calls: Cell<usize>,
    pub reads: RefCell<Vec<String>>,
    pub writes: RefCell<Vec<(String, Vec<Vec<String>>)>>,
}

#[derive(Clone)]
pub struct FakeConnector(pub Rc<FakeSheets>);

impl SheetsConnector for FakeConnector {
    type Api = FakeConnector;

    async fn connect(&self) -> OrdersResult<FakeConnector> {
        self.0.connects.set(self.0.connects.get() + 1);
        Ok(self.clone())
    }
}

impl SheetsApi for FakeConnector {
    async fn sheet_tabs(&self, _spreadsheet_id: &str) -> OrdersResult<Vec<SheetProperties>> {
        self.0.metadata_calls.set(self.0.metadata_calls.get() + 1);
        Ok(self.0.tabs.clone())
    }

    async fn get_values(&self, _spreadsheet_id: &str, range: &str) -> OrdersResult<ValueRange> {
        self.0.reads.borrow_mut().push(range.to_string());
        if let Some(message) = &self.0.fail_with {
            return Err(OrdersError::RemoteService(message.clone()));
        }
        Ok(ValueRange {
            range: Some(range.to_string()),
            values: self.0.rows.clone(),
        })
    }

    async fn update_values(
        &self,
        _spreadsheet_id: &str,
        range: &str,
        values: Vec<Vec<String>>,
    ) -> OrdersResult<()> {
        if let Some(message) = &self.0.fail_with {
            return Err(OrdersError::RemoteService(message.clone()));
        }
        self.0.writes.borrow_mut().push((range.to_string(), values));
        Ok(())
    }
}

/// Build a config from literal key/value pairs instead of the process env.
pub fn config_from(pairs: &[(&str, &str)]) -> Arc<AppConfig> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Arc::new(AppConfig::from_lookup(
        |key| map.get(key).cloned(),
        SearchRoots::default(),
        None,
    ))
}

pub fn fake_service(
    pairs: &[(&str, &str)],
    fake: FakeSheets,
) -> (OrderService<FakeConnector>, Rc<FakeSheets>) {
    let fake = Rc::new(fake);
    (
        OrderService::new(config_from(pairs), FakeConnector(fake.clone())),
        fake,
    )
}

pub fn sample_tabs() -> Vec<SheetProperties> {
    vec![
        SheetProperties { sheet_id: 0, title: "Resumo".to_string() },
        SheetProperties { sheet_id: 555, title: "Pedidos Maio".to_string() },
    ]
}
