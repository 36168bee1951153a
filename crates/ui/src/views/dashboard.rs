use dioxus::prelude::*;
use dioxus_router::use_navigator;

use prep_core::model::Locale;
use services::DashboardStats;

use crate::context::{AppContext, LocaleState};
use crate::i18n::{t, t_with};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SectionTileVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let locale_state = use_context::<LocaleState>();
    let locale = locale_state.get();
    let navigator = use_navigator();

    let resource = use_resource(move || {
        let ctx = ctx.clone();
        let locale = locale_state.get();
        async move {
            let records = ctx.catalog().records(locale);
            let progress = ctx.progress().snapshot().await;
            Ok::<_, ViewError>(map_dashboard(&DashboardStats::compute(&records, &progress)))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard",
            header { class: "dashboard__header",
                h1 { class: "dashboard__title", {t(locale, "dashboard_title")} }
                p { class: "dashboard__subtitle", {t(locale, "dashboard_subtitle")} }
            }
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { {t(locale, "loading")} }
                },
                ViewState::Error(err) => rsx! {
                    p { {t(locale, err.message_key())} }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        {t(locale, "retry")}
                    }
                },
                ViewState::Ready(vm) => rsx! {
                    section { class: "dashboard__summary glass-panel",
                        div {
                            class: "mastery-ring",
                            style: "--pct: {vm.percentage}",
                            div { class: "mastery-ring__value", "{vm.percentage}%" }
                            div { class: "mastery-ring__count",
                                {t_with(locale, "mastered_count", &[
                                    ("count", &vm.mastered.to_string()),
                                    ("total", &vm.total.to_string()),
                                ])}
                            }
                        }
                        div { class: "dashboard__actions",
                            h2 { {t(locale, "mastery_level")} }
                            button {
                                class: "btn btn-primary",
                                id: "start-random",
                                r#type: "button",
                                disabled: vm.total == 0,
                                onclick: move |_| {
                                    let _ = navigator.push(Route::Study {});
                                },
                                {t(locale, "start_random")}
                            }
                            button {
                                class: "btn btn-secondary",
                                id: "view-mastered",
                                r#type: "button",
                                onclick: move |_| {
                                    let _ = navigator.push(Route::Mastered {});
                                },
                                {t(locale, "view_mastered")}
                            }
                        }
                    }
                    h2 { class: "dashboard__sections-title", {t(locale, "study_by_section")} }
                    div { class: "section-grid",
                        for tile in vm.sections {
                            SectionTile { key: "{tile.section}", tile: tile.clone(), locale }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn SectionTile(tile: SectionTileVm, locale: Locale) -> Element {
    let navigator = use_navigator();
    let section = tile.section.to_string();
    let progress_label = t_with(
        locale,
        "section_mastered",
        &[
            ("count", &tile.mastered.to_string()),
            ("total", &tile.total.to_string()),
        ],
    );

    rsx! {
        button {
            class: "section-tile glass-panel",
            r#type: "button",
            style: "--accent: {tile.theme.color}",
            onclick: move |_| {
                let _ = navigator.push(Route::StudySection { section: section.clone() });
            },
            div { class: "section-tile__head",
                span { class: "section-tile__icon", "{tile.theme.icon.glyph()}" }
                h3 { class: "section-tile__name", "{tile.section}" }
            }
            p { class: "section-tile__count", "{progress_label}" }
            div { class: "progress-bar",
                div { class: "progress-bar__fill", style: "width: {tile.percentage}%" }
            }
        }
    }
}
