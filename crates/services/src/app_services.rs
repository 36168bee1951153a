use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::catalog::CardCatalog;
use crate::error::AppServicesError;
use crate::loader::RecordLoader;
use crate::progress_service::ProgressStore;
use crate::study::StudyLoopService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    progress: Arc<ProgressStore>,
    study_loop: Arc<StudyLoopService>,
    catalog: Arc<CardCatalog>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        loader: RecordLoader,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, loader).await)
    }

    /// Build services over volatile in-memory storage.
    pub async fn new_in_memory(clock: Clock, loader: RecordLoader) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, loader).await
    }

    async fn from_storage(storage: &Storage, clock: Clock, loader: RecordLoader) -> Self {
        let progress = Arc::new(ProgressStore::open(Arc::clone(&storage.slots)).await);
        let study_loop = Arc::new(StudyLoopService::new(clock, Arc::clone(&progress)));
        let catalog = Arc::new(CardCatalog::new(loader));

        Self {
            progress,
            study_loop,
            catalog,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn study_loop(&self) -> Arc<StudyLoopService> {
        Arc::clone(&self.study_loop)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CardCatalog> {
        Arc::clone(&self.catalog)
    }
}
