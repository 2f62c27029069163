use connector_common::{ConnectorError, Mapping, OperationResult, RecordKey};

use crate::client::HubspotApi;
use crate::locator::HubspotRecordLocator;

/// Updates one record, addressed by the locator's record id.
pub struct Update {
    locator: HubspotRecordLocator,
    mapping: Mapping,
}

impl Update {
    pub fn new(locator: HubspotRecordLocator, mapping: Mapping) -> Self {
        Self { locator, mapping }
    }

    pub async fn execute(&self, api: &HubspotApi) -> Result<OperationResult, ConnectorError> {
        let record_id = self.locator.record_id.as_deref().ok_or_else(|| {
            ConnectorError::AbortedOperation("Update requires a record id".to_string())
        })?;

        api.update(
            &self.locator.record_type,
            record_id,
            &self.mapping.to_properties(),
        )
        .await?;

        tracing::info!("Updated {} record {}", self.locator.record_type, record_id);

        Ok(OperationResult::new().with_loaded_record_key(Some(RecordKey::new(
            record_id,
            self.locator.record_type.clone(),
        ))))
    }
}
