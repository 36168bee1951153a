pub mod app;
pub mod context;
pub mod i18n;
pub mod platform;
pub mod routes;
pub mod vm;
pub mod views;

pub use app::App;
pub use context::{AppContext, LocaleState, UiApp, build_app_context};
pub use platform::{LinkOpener, LinkOpenerRef, SystemLinkOpener};
