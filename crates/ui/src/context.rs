use std::sync::Arc;

use dioxus::prelude::*;
use prep_core::model::Locale;
use services::{CardCatalog, ProgressStore, StudyLoopService};

use crate::platform::LinkOpenerRef;

pub trait UiApp: Send + Sync {
    fn initial_locale(&self) -> Locale;

    fn progress_store(&self) -> Arc<ProgressStore>;
    fn study_loop(&self) -> Arc<StudyLoopService>;
    fn catalog(&self) -> Arc<CardCatalog>;
    fn link_opener(&self) -> LinkOpenerRef;
}

#[derive(Clone)]
pub struct AppContext {
    initial_locale: Locale,
    progress: Arc<ProgressStore>,
    study_loop: Arc<StudyLoopService>,
    catalog: Arc<CardCatalog>,
    link_opener: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_locale: app.initial_locale(),
            progress: app.progress_store(),
            study_loop: app.study_loop(),
            catalog: app.catalog(),
            link_opener: app.link_opener(),
        }
    }

    #[must_use]
    pub fn initial_locale(&self) -> Locale {
        self.initial_locale
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

    pub fn open_link(&self, url: &str) {
        self.link_opener.open(url);
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

//
// ─── LOCALE ────────────────────────────────────────────────────────────────────
//

/// Active interface and deck language, shared by every view.
#[derive(Clone, Copy)]
pub struct LocaleState(Signal<Locale>);

impl LocaleState {
    #[must_use]
    pub fn get(&self) -> Locale {
        *self.0.read()
    }

    pub fn toggle(&mut self) {
        let next = self.get().toggled();
        tracing::debug!(locale = %next, "switching locale");
        self.0.set(next);
    }
}

/// Install the locale signal for the subtree; call once near the root.
pub fn use_locale_provider(initial: Locale) -> LocaleState {
    use_context_provider(|| LocaleState(Signal::new(initial)))
}

/// Read the active locale, subscribing the caller to changes.
#[must_use]
pub fn use_locale() -> Locale {
    use_context::<LocaleState>().get()
}
