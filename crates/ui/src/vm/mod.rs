mod dashboard_vm;
mod mastered_vm;
mod study_vm;
mod theme;

pub use dashboard_vm::{DashboardVm, SectionTileVm, map_dashboard};
pub use mastered_vm::{MasteredRowVm, MasteredVm};
pub use study_vm::{
    SWIPE_THRESHOLD_PX, StudyIntent, StudyOutcome, StudyVm, start_study, swipe_judgment,
};
pub use theme::{DEFAULT_THEME, SectionIcon, SectionTheme, section_theme};
