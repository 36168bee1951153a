mod plan;
mod progress;
mod session;
mod workflow;

// Public API of the study subsystem.
pub use crate::error::StudyError;
pub use plan::{StudyPlan, StudyPlanBuilder, StudyScope};
pub use progress::{SessionProgress, SessionStats};
pub use session::StudySession;
pub use workflow::{StudyAnswerResult, StudyLoopService};
