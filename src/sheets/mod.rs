// src/sheets/mod.rs
// Order records backed by a Google spreadsheet

pub mod auth;
pub mod client;
pub mod error;
pub mod range;
pub mod record;
pub mod service;
pub mod status;
pub mod timestamp;

pub use client::ServiceAccountConnector;
pub use service::{OrderService, StatusUpdate};

#[cfg(test)]
pub(crate) mod test_helpers;
