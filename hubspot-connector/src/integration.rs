//! Integration facade: maps the generic extract/load contract onto the
//! HubSpot actions.

use async_trait::async_trait;
use connector_common::{
    ConnectorError, Integration, Mapping, Record, RecordKey, RecordLocator, Recordset, Response,
};
use serde_json::json;

use crate::actions::{Create, Select, Update};
use crate::client::HubspotApi;
use crate::config;
use crate::locator::{HubspotRecordLocator, OperationType};

pub struct HubspotIntegration {
    api: HubspotApi,
}

impl HubspotIntegration {
    /// Builds an integration authenticated with the access token from the
    /// environment.
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            api: HubspotApi::new()?,
        })
    }

    pub fn with_api(api: HubspotApi) -> Self {
        Self { api }
    }

    /// Mapping keys may arrive fully qualified as `{record_type}.{name}`;
    /// the service wants bare property names.
    fn normalize_mapping(mapping: Mapping, record_type: &str) -> Mapping {
        let prefix = format!("{}.", record_type);
        mapping
            .into_iter()
            .map(|(key, value)| {
                let key = match key.strip_prefix(&prefix) {
                    Some(bare) => bare.to_string(),
                    None => key,
                };
                (key, value)
            })
            .collect()
    }

    /// Finds the id of the record an update should target by running the
    /// locator's query with an id-only selection.
    async fn lookup_record_to_update(
        &self,
        locator: &HubspotRecordLocator,
    ) -> Result<String, ConnectorError> {
        let query = locator.query.clone().ok_or_else(|| {
            ConnectorError::AbortedOperation("Empty query".to_string())
        })?;

        let mut mapping = Mapping::new();
        mapping.insert("id", serde_json::Value::Null);

        let select_locator = HubspotRecordLocator {
            record_type: locator.record_type.clone(),
            record_id: None,
            operation: OperationType::Select,
            query: Some(query),
            order_by: locator.order_by.clone(),
        };

        let result = match Select::new(select_locator, mapping).execute(&self.api).await {
            Ok(result) => result,
            Err(ConnectorError::RecordNotFound(_)) => {
                return Err(ConnectorError::RecordNotFound(
                    "No records found.".to_string(),
                ))
            }
            Err(e) => return Err(e),
        };

        result
            .extracted_recordset
            .first()
            .map(|record| record.key.record_id.clone())
            .ok_or_else(|| ConnectorError::RecordNotFound("No records found.".to_string()))
    }
}

#[async_trait]
impl Integration for HubspotIntegration {
    async fn extract(
        &self,
        locator: RecordLocator,
        mapping: Mapping,
        _scope: Option<RecordKey>,
    ) -> Result<Response, ConnectorError> {
        let locator = HubspotRecordLocator::try_from(locator)?;
        let record_type = locator.record_type.clone();

        let result = Select::new(locator, mapping).execute(&self.api).await?;
        tracing::info!(
            "Selected {} {} record(s)",
            result.extracted_recordset.len(),
            record_type
        );

        Ok(Response::new()
            .with_record_key(result.loaded_record_key)
            .with_recordset(result.extracted_recordset))
    }

    async fn load(
        &self,
        locator: RecordLocator,
        mapping: Mapping,
        _scope: Option<RecordKey>,
    ) -> Result<Response, ConnectorError> {
        let mut locator = HubspotRecordLocator::try_from(locator)?;
        let mapping = Self::normalize_mapping(mapping, &locator.record_type);

        let result = match locator.operation {
            OperationType::Create => {
                Create::new(locator.clone(), mapping).execute(&self.api).await?
            }
            OperationType::Update => {
                let record_id = self.lookup_record_to_update(&locator).await?;
                locator.record_id = Some(record_id);
                Update::new(locator.clone(), mapping).execute(&self.api).await?
            }
            OperationType::Select => {
                return Err(ConnectorError::InvalidExecutionPlan(
                    "Unknown operation type".to_string(),
                ))
            }
        };

        let key = result.loaded_record_key.ok_or_else(|| {
            ConnectorError::AbortedOperation("Load produced no record key".to_string())
        })?;
        tracing::info!("Loaded {} record {}", locator.record_type, key.record_id);

        let url = config::object_url(self.api.base_url(), &locator.record_type, &key.record_id);
        let mut recordset = Recordset::new();
        recordset.push(Record::new(
            key.clone(),
            json!({ "id": key.record_id, "url": url }),
        ));

        Ok(Response::new()
            .with_record_key(Some(key))
            .with_recordset(recordset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_mapping_strips_record_type_prefix() {
        let mut mapping = Mapping::new();
        mapping.insert("companies.domain", json!("example.com"));
        mapping.insert("name", json!("Example"));
        mapping.insert("contacts.email", json!("jane@example.com"));

        let normalized = HubspotIntegration::normalize_mapping(mapping, "companies");
        assert_eq!(
            normalized.keys(),
            vec!["domain", "name", "contacts.email"]
        );
    }
}
