use connector_common::{ConnectorError, Mapping, OperationResult, RecordKey};

use crate::client::HubspotApi;
use crate::locator::HubspotRecordLocator;

/// Creates one record of the locator's object type from the mapping
/// entries.
pub struct Create {
    locator: HubspotRecordLocator,
    mapping: Mapping,
}

impl Create {
    pub fn new(locator: HubspotRecordLocator, mapping: Mapping) -> Self {
        Self { locator, mapping }
    }

    pub async fn execute(&self, api: &HubspotApi) -> Result<OperationResult, ConnectorError> {
        let created = api
            .create(&self.locator.record_type, &self.mapping.to_properties())
            .await?;

        tracing::info!(
            "Created {} record {}",
            self.locator.record_type,
            created.id
        );

        Ok(OperationResult::new().with_loaded_record_key(Some(RecordKey::new(
            created.id,
            self.locator.record_type.clone(),
        ))))
    }
}
