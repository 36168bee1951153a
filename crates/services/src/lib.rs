#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod mastered;
pub mod progress_service;
pub mod study;

pub use prep_core::Clock;

pub use app_services::AppServices;
pub use catalog::CardCatalog;
pub use dashboard::{DashboardStats, SectionStats};
pub use error::{AppServicesError, LoaderError, ProgressError, StudyError};
pub use loader::{CardSource, RecordLoader};
pub use mastered::{MasteredQuery, mastered_sections};
pub use progress_service::{PROGRESS_SLOT, ProgressStore};
pub use study::{
    SessionProgress, SessionStats, StudyAnswerResult, StudyLoopService, StudyPlan, StudyScope,
    StudySession,
};
