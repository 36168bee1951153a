use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use prep_core::model::Locale;
use prep_core::time::fixed_now;
use services::{CardCatalog, Clock, ProgressStore, RecordLoader, StudyLoopService};
use storage::repository::{SlotRepository, Storage};

use crate::context::{UiApp, build_app_context, use_locale_provider};
use crate::platform::{LinkOpener, LinkOpenerRef};
use crate::views::study::StudyTestHandles;
use crate::views::{DashboardView, LanguageToggle, MasteredView, StudySectionView, StudyView};
use crate::vm::StudyIntent;

struct NoLinks;

impl LinkOpener for NoLinks {
    fn open(&self, _url: &str) {}
}

#[derive(Clone)]
struct TestApp {
    locale: Locale,
    progress: Arc<ProgressStore>,
    study_loop: Arc<StudyLoopService>,
    catalog: Arc<CardCatalog>,
}

impl UiApp for TestApp {
    fn initial_locale(&self) -> Locale {
        self.locale
    }

    fn progress_store(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    fn study_loop(&self) -> Arc<StudyLoopService> {
        Arc::clone(&self.study_loop)
    }

    fn catalog(&self) -> Arc<CardCatalog> {
        Arc::clone(&self.catalog)
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::new(NoLinks)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Study,
    StudySection(String),
    Mastered,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    study_handles: Option<StudyTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let initial = props.app.locale;
    use_context_provider(|| build_app_context(&app));
    use_locale_provider(initial);
    use_context_provider(|| props.view.clone());
    if let Some(handles) = props.study_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    rsx! {
        LanguageToggle {}
        match view {
            ViewKind::Dashboard => rsx! { DashboardView {} },
            ViewKind::Study => rsx! { StudyView {} },
            ViewKind::StudySection(section) => rsx! { StudySectionView { section } },
            ViewKind::Mastered => rsx! { MasteredView {} },
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub progress: Arc<ProgressStore>,
    pub study_handles: Option<StudyTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let resources and spawned tasks finish.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.drive(3).await;
    }

    pub async fn drive(&mut self, rounds: usize) {
        for _ in 0..rounds {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn study_handles(&self) -> StudyTestHandles {
        self.study_handles.clone().expect("study handles")
    }

    /// Send a study intent and let the resulting task run.
    pub async fn dispatch(&mut self, intent: StudyIntent) {
        let dispatch = self.study_handles().dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        drive_dom(&mut self.dom);
        self.drive(2).await;
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind, locale: Locale) -> ViewHarness {
    let storage = Storage::in_memory();
    setup_view_harness_with_slots(view, locale, Arc::clone(&storage.slots)).await
}

pub async fn setup_view_harness_with_slots(
    view: ViewKind,
    locale: Locale,
    slots: Arc<dyn SlotRepository>,
) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let progress = Arc::new(ProgressStore::open(slots).await);
    let study_loop =
        Arc::new(StudyLoopService::new(clock, Arc::clone(&progress)).with_shuffle(false));
    let catalog = Arc::new(CardCatalog::new(RecordLoader::bundled()));

    let study_handles = match view {
        ViewKind::Study | ViewKind::StudySection(_) => Some(StudyTestHandles::default()),
        _ => None,
    };

    let app = Arc::new(TestApp {
        locale,
        progress: Arc::clone(&progress),
        study_loop,
        catalog,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            study_handles: study_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        progress,
        study_handles,
    }
}
