use dioxus::prelude::*;
use dioxus_router::use_navigator;

use prep_core::mastery::ProgressMap;
use prep_core::model::{Locale, Section};

use crate::context::{AppContext, LocaleState};
use crate::i18n::{t, t_with};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{MasteredRowVm, MasteredVm};

#[component]
pub fn MasteredView() -> Element {
    let ctx = use_context::<AppContext>();
    let locale_state = use_context::<LocaleState>();
    let locale = locale_state.get();
    let navigator = use_navigator();

    let mut vm = use_signal(MasteredVm::new);
    let progress = use_signal(|| None::<ProgressMap>);

    let resource = {
        let ctx = ctx.clone();
        use_resource(move || {
            let ctx = ctx.clone();
            let locale = locale_state.get();
            let mut progress = progress;
            async move {
                let records = ctx.catalog().records(locale);
                progress.set(Some(ctx.progress().snapshot().await));
                Ok::<_, ViewError>(records)
            }
        })
    };
    let state = view_state_from_resource(&resource);

    let on_confirm = use_callback(move |()| {
        let confirmed = vm.write().confirm_unmaster();
        let Some(key) = confirmed else {
            return;
        };
        let store = ctx.progress();
        let mut progress = progress;
        spawn(async move {
            match store.reset_mastery(&key).await {
                Ok(map) => progress.set(Some(map)),
                Err(err) => tracing::warn!(key = %key, error = %err, "failed to un-master card"),
            }
        });
    });

    let on_toggle_row = use_callback(move |key: String| vm.write().toggle_expanded(&key));
    let on_request_unmaster = use_callback(move |key: String| vm.write().request_unmaster(&key));
    let on_toggle_section = use_callback(move |section: Section| vm.write().toggle_section(&section));

    let search = vm.read().search().to_owned();
    let selected = vm.read().selected_section().cloned();
    let pending = vm.read().pending_unmaster().map(str::to_owned);

    rsx! {
        div { class: "page mastered",
            header { class: "mastered__header",
                button {
                    class: "btn btn-secondary",
                    id: "mastered-back",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Dashboard {});
                    },
                    "← "
                    {t(locale, "back")}
                }
                h2 { class: "mastered__title", {t(locale, "mastered_title")} }
            }
            input {
                class: "mastered__search",
                id: "mastered-search",
                r#type: "search",
                placeholder: t(locale, "filter_placeholder"),
                value: "{search}",
                oninput: move |evt: FormEvent| vm.write().set_search(evt.value()),
            }
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { {t(locale, "loading")} }
                },
                ViewState::Error(err) => rsx! {
                    p { {t(locale, err.message_key())} }
                },
                ViewState::Ready(records) => {
                    let map = progress.read().clone().unwrap_or_default();
                    let sections = vm.read().sections(&records, &map);
                    let rows = vm.read().rows(&records, &map);
                    rsx! {
                        div { class: "pill-row",
                            for section in sections {
                                SectionPill {
                                    key: "{section}",
                                    selected: selected.as_ref() == Some(&section),
                                    section: section.clone(),
                                    on_toggle: on_toggle_section,
                                }
                            }
                        }
                        if rows.is_empty() {
                            div { class: "mastered__empty glass-panel",
                                p { {t(locale, "no_mastered")} }
                                p { class: "mastered__hint", {t(locale, "keep_studying")} }
                            }
                        } else {
                            ul { class: "mastered__list",
                                for row in rows {
                                    MasteredRow {
                                        key: "{row.key}",
                                        row: row.clone(),
                                        locale,
                                        on_toggle: on_toggle_row,
                                        on_unmaster: on_request_unmaster,
                                    }
                                }
                            }
                        }
                    }
                }
            }
            if let Some(item) = pending {
                div { class: "confirm-overlay",
                    div { class: "confirm glass-panel", role: "dialog", aria_modal: "true",
                        p { {t_with(locale, "delist_confirm", &[("item", &item)])} }
                        div { class: "confirm__actions",
                            button {
                                class: "btn btn-secondary",
                                id: "confirm-cancel",
                                r#type: "button",
                                onclick: move |_| vm.write().cancel_unmaster(),
                                {t(locale, "cancel")}
                            }
                            button {
                                class: "btn btn-danger",
                                id: "confirm-unmaster",
                                r#type: "button",
                                onclick: move |_| on_confirm.call(()),
                                {t(locale, "confirm")}
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SectionPill(section: Section, selected: bool, on_toggle: EventHandler<Section>) -> Element {
    let class = if selected { "pill pill--active" } else { "pill" };
    let label = section.to_string();
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| on_toggle.call(section.clone()),
            "{label}"
        }
    }
}

#[component]
fn MasteredRow(
    row: MasteredRowVm,
    locale: Locale,
    on_toggle: EventHandler<String>,
    on_unmaster: EventHandler<String>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let toggle_key = row.key.clone();
    let unmaster_key = row.key.clone();
    let chevron = if row.expanded { "▲" } else { "▼" };

    rsx! {
        li { class: "mastered-row glass-panel", style: "--accent: {row.theme.color}",
            div {
                class: "mastered-row__summary",
                onclick: move |_| on_toggle.call(toggle_key.clone()),
                span { class: "mastered-row__icon", "{row.theme.icon.glyph()}" }
                div { class: "mastered-row__text",
                    span { class: "mastered-row__content", "{row.content}" }
                    span { class: "mastered-row__section", "{row.section}" }
                }
                button {
                    class: "btn btn-ghost mastered-row__unmaster",
                    r#type: "button",
                    title: t(locale, "unmaster"),
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        on_unmaster.call(unmaster_key.clone());
                    },
                    "✕"
                }
                span { class: "mastered-row__chevron", "{chevron}" }
            }
            if row.expanded {
                div { class: "mastered-row__details",
                    p { "{row.details}" }
                    if let Some(url) = row.link.clone() {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| ctx.open_link(&url),
                            "↗ "
                            {t(locale, "docs_link")}
                        }
                    }
                }
            }
        }
    }
}
