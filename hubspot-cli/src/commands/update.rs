use crate::argparse::UpdateArgs;
use connector_common::{Integration, Mapping, RecordLocator};
use hubspot_connector::HubspotIntegration;
use serde_json::Value;

pub async fn handle_update_command(
    args: UpdateArgs,
    integration: &HubspotIntegration,
) -> Result<(), Box<dyn std::error::Error>> {
    let query: Value = serde_json::from_str(&args.query)?;
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
        operation: Some("update".to_string()),
        query: Some(query),
        ..Default::default()
    };

    let response = integration.load(locator, mapping, None).await?;
    if let Some(record) = response.recordset.first() {
        println!("{}", serde_json::to_string_pretty(&record.data)?);
    }

    Ok(())
}
