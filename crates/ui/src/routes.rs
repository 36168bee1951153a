use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::use_locale;
use crate::i18n::t;
use crate::views::{DashboardView, LanguageToggle, MasteredView, StudySectionView, StudyView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/study", StudyView)] Study {},
        #[route("/study/:section", StudySectionView)] StudySection { section: String },
        #[route("/mastered", MasteredView)] Mastered {},
}

#[component]
fn Layout() -> Element {
    let locale = use_locale();
    rsx! {
        div { class: "app",
            header { class: "topbar",
                Link { class: "topbar__brand", to: Route::Dashboard {},
                    span { class: "topbar__logo", "☁" }
                    {t(locale, "dashboard_title")}
                }
                LanguageToggle {}
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
