use crate::argparse::CreateArgs;
use connector_common::{Integration, Mapping, RecordLocator};
use hubspot_connector::HubspotIntegration;
use serde_json::Value;

pub async fn handle_create_command(
    args: CreateArgs,
    integration: &HubspotIntegration,
) -> Result<(), Box<dyn std::error::Error>> {
    let properties: Value = serde_json::from_str(&args.properties)?;
    let properties = properties
        .as_object()
        .ok_or("--properties must be a JSON object")?;
    let mapping: Mapping = properties
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let locator = RecordLocator {
        record_type: args.object,
        operation: Some("create".to_string()),
        ..Default::default()
    };

    let response = integration.load(locator, mapping, None).await?;
    if let Some(record) = response.recordset.first() {
        println!("{}", serde_json::to_string_pretty(&record.data)?);
    }

    Ok(())
}
