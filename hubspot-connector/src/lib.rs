//! HubSpot CRM connector: constant configuration, a bearer-token API
//! client, per-operation actions, and the `Integration` facade that maps
//! the generic extract/load contract onto them. The query-to-request-body
//! compiler lives in the `hubspot-search` crate.

pub mod actions;
pub mod client;
pub mod config;
pub mod integration;
pub mod locator;

pub use client::HubspotApi;
pub use integration::HubspotIntegration;
pub use locator::{HubspotRecordLocator, OperationType};
