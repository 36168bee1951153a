mod dashboard;
mod language_toggle;
mod mastered;
mod state;
mod study;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use dashboard::DashboardView;
pub use language_toggle::LanguageToggle;
pub use mastered::MasteredView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use study::{StudySectionView, StudyView};
