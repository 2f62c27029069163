//! Vendor-neutral data-integration contract: record and mapping value types,
//! the operation locator, the error taxonomy, and the `Integration` trait
//! that vendor connectors implement.

use async_trait::async_trait;

pub mod errors;
pub mod locator;
pub mod mapping;
pub mod records;

pub use errors::ConnectorError;
pub use locator::{OrderBy, RecordLocator};
pub use mapping::Mapping;
pub use records::{Record, RecordKey, Recordset};

/// What an integration hands back to the caller after an operation.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub record_key: Option<RecordKey>,
    pub recordset: Recordset,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record_key(mut self, record_key: Option<RecordKey>) -> Self {
        self.record_key = record_key;
        self
    }

    pub fn with_recordset(mut self, recordset: Recordset) -> Self {
        self.recordset = recordset;
        self
    }
}

/// What a single action (select/create/update) produces.
#[derive(Debug, Clone, Default)]
pub struct OperationResult {
    pub loaded_record_key: Option<RecordKey>,
    pub extracted_recordset: Recordset,
}

impl OperationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loaded_record_key(mut self, key: Option<RecordKey>) -> Self {
        self.loaded_record_key = key;
        self
    }

    pub fn with_extracted_recordset(mut self, recordset: Recordset) -> Self {
        self.extracted_recordset = recordset;
        self
    }
}

/// The contract a vendor connector implements: pull records out of the
/// remote system (`extract`) and push records into it (`load`).
#[async_trait]
pub trait Integration: Send + Sync {
    async fn extract(
        &self,
        locator: RecordLocator,
        mapping: Mapping,
        scope: Option<RecordKey>,
    ) -> Result<Response, ConnectorError>;

    async fn load(
        &self,
        locator: RecordLocator,
        mapping: Mapping,
        scope: Option<RecordKey>,
    ) -> Result<Response, ConnectorError>;
}
