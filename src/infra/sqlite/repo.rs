use std::path::PathBuf;

use crate::domain::entities::recipe::AggregationRecipe;
use crate::domain::entities::result::AggregatedResult;
use crate::infra::sqlite::queries::{
    clear_upload, load_table, load_upload_meta, replace_upload, run_recipe,
};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{
    NewUploadMeta, RepoError, SalesRepository, TabularData, UploadMeta,
};

pub struct SqliteRepo {
    pub db_path: PathBuf,
}

impl SqliteRepo {
    fn require_upload(&self) -> Result<UploadMeta, RepoError> {
        self.current_upload()?.ok_or(RepoError::NoUpload)
    }
}

impl SalesRepository for SqliteRepo {
    /// Creates the schema and drops whatever a previous session left behind.
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path)
            .and_then(|_| clear_upload(&self.db_path))
            .map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn current_upload(&self) -> Result<Option<UploadMeta>, RepoError> {
        load_upload_meta(&self.db_path).map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn replace_upload(
        &self,
        meta: NewUploadMeta,
        data: TabularData,
    ) -> Result<UploadMeta, RepoError> {
        replace_upload(&self.db_path, &meta, &data)
            .map_err(|err| RepoError::Message(format!("{err:#}")))?;
        self.require_upload()
    }

    fn clear_upload(&self) -> Result<(), RepoError> {
        clear_upload(&self.db_path).map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn load_table(&self) -> Result<TabularData, RepoError> {
        self.require_upload()?;
        load_table(&self.db_path).map_err(|err| RepoError::Message(format!("{err:#}")))
    }

    fn aggregate(&self, recipe: &AggregationRecipe) -> Result<AggregatedResult, RepoError> {
        self.require_upload()?;
        run_recipe(&self.db_path, recipe).map_err(|err| RepoError::Message(format!("{err:#}")))
    }
}
