use connector_common::{ConnectorError, OrderBy, RecordLocator};
use serde_json::Value;
use std::str::FromStr;

/// Operations this connector knows how to execute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OperationType {
    #[default]
    Create,
    Update,
    Select,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationType::Create => write!(f, "create"),
            OperationType::Update => write!(f, "update"),
            OperationType::Select => write!(f, "select"),
        }
    }
}

impl FromStr for OperationType {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(OperationType::Create),
            "update" => Ok(OperationType::Update),
            "select" => Ok(OperationType::Select),
            _ => Err(ConnectorError::InvalidExecutionPlan(
                "Unknown operation type".to_string(),
            )),
        }
    }
}

/// Generic record locator recast for HubSpot: the operation token resolved
/// to a typed `OperationType` (defaulting to create when absent).
#[derive(Debug, Clone)]
pub struct HubspotRecordLocator {
    pub record_type: String,
    pub record_id: Option<String>,
    pub operation: OperationType,
    pub query: Option<Value>,
    pub order_by: OrderBy,
}

impl HubspotRecordLocator {
    pub fn is_create(&self) -> bool {
        self.operation == OperationType::Create
    }

    pub fn is_update(&self) -> bool {
        self.operation == OperationType::Update
    }
}

impl TryFrom<RecordLocator> for HubspotRecordLocator {
    type Error = ConnectorError;

    fn try_from(locator: RecordLocator) -> Result<Self, Self::Error> {
        let operation = match locator.operation.as_deref() {
            Some(token) => token.parse()?,
            None => OperationType::default(),
        };

        Ok(Self {
            record_type: locator.record_type,
            record_id: locator.record_id,
            operation,
            query: locator.query,
            order_by: locator.order_by,
        })
    }
}
