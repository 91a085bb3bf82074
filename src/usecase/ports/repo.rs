use rusqlite::types::Value;

use crate::domain::entities::recipe::AggregationRecipe;
use crate::domain::entities::result::AggregatedResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NoUpload,
    Message(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::NoUpload => write!(f, "no file has been uploaded"),
            RepoError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for RepoError {}

/// Holds the single uploaded table of a session.
pub trait SalesRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn current_upload(&self) -> Result<Option<UploadMeta>, RepoError>;
    fn replace_upload(&self, meta: NewUploadMeta, data: TabularData)
        -> Result<UploadMeta, RepoError>;
    fn clear_upload(&self) -> Result<(), RepoError>;

    fn load_table(&self) -> Result<TabularData, RepoError>;
    fn aggregate(&self, recipe: &AggregationRecipe) -> Result<AggregatedResult, RepoError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMeta {
    pub source_key: String,
    pub file_name: String,
    pub row_count: i64,
    pub loaded_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUploadMeta {
    pub source_key: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabularData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}
