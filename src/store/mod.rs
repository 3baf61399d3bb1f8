use thiserror::Error;

pub mod sheets;

pub type Cell = serde_json::Value;

/// A whole worksheet: the header row followed by the data rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("Store answered with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Store url is invalid: {0}")]
    InvalidUrl(String),
}

/// Read-all / overwrite-all access to named worksheets
#[tonic::async_trait]
pub trait Store: Send + Sync {
    async fn read(&self, worksheet: &str) -> Result<Table, StoreError>;

    /// Replace everything in the worksheet with `table`
    async fn overwrite(&self, worksheet: &str, table: &Table) -> Result<(), StoreError>;
}
