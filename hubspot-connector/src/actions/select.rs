use connector_common::{ConnectorError, Mapping, OperationResult, Record, RecordKey, Recordset};
use hubspot_search::build_search_request;
use serde_json::Value;

use crate::client::HubspotApi;
use crate::locator::HubspotRecordLocator;

/// Searches records of one object type. The mapping keys are the fields to
/// select; the locator's query becomes the search body.
pub struct Select {
    locator: HubspotRecordLocator,
    mapping: Mapping,
}

impl Select {
    pub fn new(locator: HubspotRecordLocator, mapping: Mapping) -> Self {
        Self { locator, mapping }
    }

    pub async fn execute(&self, api: &HubspotApi) -> Result<OperationResult, ConnectorError> {
        let select_fields = self.mapping.keys();
        let query = self.locator.query.clone().unwrap_or(Value::Null);
        let body = build_search_request(&query, &select_fields, &self.locator.order_by)?;

        // No filter groups means no search to perform.
        if body.filter_groups.is_empty() {
            return Ok(OperationResult::new());
        }

        let response = api.search(&self.locator.record_type, &body).await?;
        if response.total == 0 {
            return Err(ConnectorError::RecordNotFound(
                "No records found for the given query".to_string(),
            ));
        }

        let mut recordset = Recordset::new();
        for result in response.results {
            let id = result
                .get("id")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ConnectorError::AbortedOperation(
                        "Search result is missing an 'id' field".to_string(),
                    )
                })?
                .to_string();
            recordset.push(Record::new(
                RecordKey::new(id, self.locator.record_type.clone()),
                result,
            ));
        }

        let loaded_key = recordset.first().map(|record| record.key.clone());
        Ok(OperationResult::new()
            .with_extracted_recordset(recordset)
            .with_loaded_record_key(loaded_key))
    }
}
