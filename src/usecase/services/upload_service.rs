use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::infra::import::csv::read_csv;
use crate::infra::import::xlsx::read_workbook;
use crate::usecase::ports::repo::{NewUploadMeta, SalesRepository, TabularData, UploadMeta};

pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["xlsx", "xls", "xlsm", "ods", "csv"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Loaded(UploadMeta),
    /// Same bytes as the table already loaded; parsing was skipped.
    Reused(UploadMeta),
}

impl UploadOutcome {
    pub fn meta(&self) -> &UploadMeta {
        match self {
            UploadOutcome::Loaded(meta) | UploadOutcome::Reused(meta) => meta,
        }
    }
}

pub fn source_key(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

pub fn read_tabular(path: &Path) -> Result<TabularData> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    if ext == "csv" {
        read_csv(path)
    } else {
        read_workbook(path)
    }
}

/// Keeps the session's one uploaded table, keyed by file content.
pub struct UploadService {
    repo: Arc<dyn SalesRepository>,
}

impl UploadService {
    pub fn new(repo: Arc<dyn SalesRepository>) -> Self {
        Self { repo }
    }

    pub fn upload(&self, path: &Path) -> Result<UploadOutcome> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read upload: {}", path.display()))?;
        let key = source_key(&bytes);

        if let Some(current) = self.repo.current_upload()? {
            if current.source_key == key {
                info!(file = %current.file_name, "upload unchanged, reusing parsed table");
                return Ok(UploadOutcome::Reused(current));
            }
        }

        let data = read_tabular(path)?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        info!(
            file = %file_name,
            rows = data.rows.len(),
            columns = data.columns.len(),
            "parsed upload"
        );

        let meta = self.repo.replace_upload(
            NewUploadMeta {
                source_key: key,
                file_name,
            },
            data,
        )?;
        Ok(UploadOutcome::Loaded(meta))
    }

    pub fn clear(&self) -> Result<()> {
        self.repo.clear_upload()?;
        info!("upload cleared");
        Ok(())
    }
}
