use crate::argparse::SearchArgs;
use connector_common::{Integration, Mapping, OrderBy, RecordLocator};
use hubspot_connector::HubspotIntegration;
use serde_json::Value;

pub async fn handle_search_command(
    args: SearchArgs,
    integration: &HubspotIntegration,
) -> Result<(), Box<dyn std::error::Error>> {
    let query: Value = serde_json::from_str(&args.query)?;
    let mapping: Mapping = args
        .fields
        .into_iter()
        .map(|field| (field, Value::Null))
        .collect();
    let order_by = match args.order_by {
        Some(column) => OrderBy::new(column, !args.descending),
        None => OrderBy::default(),
    };

    let locator = RecordLocator {
        record_type: args.object,
        operation: Some("select".to_string()),
        query: Some(query),
        order_by,
        ..Default::default()
    };

    let response = integration.extract(locator, mapping, None).await?;

    println!("Found {} matching record(s):", response.recordset.len());
    for record in &response.recordset {
        println!(
            "{} ==>\n{}",
            record.key,
            serde_json::to_string_pretty(&record.data)?
        );
    }

    Ok(())
}
