/// Error types for connector operations
#[derive(Debug)]
pub enum ConnectorError {
    InvalidOperator(String),
    AbortedOperation(String),
    RecordNotFound(String),
    InvalidExecutionPlan(String),
}

impl std::fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectorError::InvalidOperator(token) => {
                write!(f, "Invalid operator: {}", token)
            }
            ConnectorError::AbortedOperation(msg) => write!(f, "Aborted operation: {}", msg),
            ConnectorError::RecordNotFound(msg) => write!(f, "Record not found: {}", msg),
            ConnectorError::InvalidExecutionPlan(msg) => {
                write!(f, "Invalid execution plan: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConnectorError {}
