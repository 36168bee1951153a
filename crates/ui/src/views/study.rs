use dioxus::prelude::*;
use dioxus_router::use_navigator;

use prep_core::mastery::Judgment;
use prep_core::model::{CardRecord, Locale, Section};
use services::{SessionStats, StudyScope};

use crate::context::{AppContext, LocaleState};
use crate::i18n::{t, t_with};
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    StudyIntent, StudyOutcome, StudyVm, section_theme, start_study, swipe_judgment,
};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn StudyView() -> Element {
    rsx! {
        StudyPanel { scope: StudyScope::All }
    }
}

#[component]
pub fn StudySectionView(section: String) -> Element {
    rsx! {
        StudyPanel { scope: StudyScope::Section(Section::new(section)) }
    }
}

#[component]
fn StudyPanel(scope: StudyScope) -> Element {
    let ctx = use_context::<AppContext>();
    let locale_state = use_context::<LocaleState>();
    let locale = locale_state.get();
    let navigator = use_navigator();
    let study_loop = ctx.study_loop();

    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<StudyVm>);
    let completion = use_signal(|| None::<SessionStats>);

    let resource = use_resource(move || {
        let ctx = ctx.clone();
        let scope = scope.clone();
        let locale = locale_state.get();
        let mut error = error;
        let mut vm = vm;
        let mut completion = completion;

        async move {
            let records = ctx.catalog().records(locale);
            let started = start_study(&ctx.study_loop(), &records, scope).await?;
            vm.set(Some(started));
            completion.set(None);
            error.set(None);
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let dispatch_intent = use_callback(move |intent: StudyIntent| {
        let mut error = error;
        let mut vm = vm;
        let mut completion = completion;

        // Drags short of the threshold change nothing.
        let intent = match intent {
            StudyIntent::Swipe { delta_x } => match swipe_judgment(delta_x) {
                Some(judgment) => StudyIntent::Judge(judgment),
                None => return,
            },
            other => other,
        };

        match intent {
            StudyIntent::Swipe { .. } => {}
            StudyIntent::Flip => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.flip();
                }
            }
            StudyIntent::Restart => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.restart(&study_loop);
                }
                completion.set(None);
                error.set(None);
            }
            StudyIntent::Judge(judgment) => {
                let study_loop = study_loop.clone();
                spawn(async move {
                    let taken = vm.write().take();
                    let Some(mut local) = taken else {
                        error.set(Some(ViewError::Unknown));
                        return;
                    };

                    let result = local.judge(&study_loop, judgment).await;

                    // Put the session back even on error so the screen stays usable.
                    vm.set(Some(local));

                    match result {
                        Ok(StudyOutcome::Continue) => error.set(None),
                        Ok(StudyOutcome::Completed(stats)) => {
                            error.set(None);
                            completion.set(Some(stats));
                        }
                        Err(err) => error.set(Some(err)),
                    }
                });
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<StudyTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let vm_guard = vm.read();
    let card = vm_guard.as_ref().and_then(StudyVm::current_card).cloned();
    let flipped = vm_guard.as_ref().is_some_and(StudyVm::is_flipped);
    let streak = vm_guard.as_ref().map_or(0, StudyVm::streak);
    let (position, total) = vm_guard
        .as_ref()
        .map(StudyVm::progress)
        .map_or((0, 0), |p| (p.position(), p.total));
    let fraction = vm_guard
        .as_ref()
        .map_or(0.0, |vm| vm.progress().fraction() * 100.0);
    drop(vm_guard);
    let completion_state = *completion.read();
    let progress_label = t_with(
        locale,
        "card_progress",
        &[
            ("current", &position.to_string()),
            ("total", &total.to_string()),
        ],
    );

    rsx! {
        div { class: "page study",
            header { class: "study__header",
                button {
                    class: "btn btn-secondary",
                    id: "study-exit",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Dashboard {});
                    },
                    "← "
                    {t(locale, "exit")}
                }
                if completion_state.is_none() && total > 0 {
                    div { class: "study__progress",
                        span { class: "study__progress-label", "{progress_label}" }
                        div { class: "progress-bar progress-bar--thin",
                            div { class: "progress-bar__fill", style: "width: {fraction:.0}%" }
                        }
                    }
                }
            }
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { {t(locale, "loading")} }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "study__empty glass-panel",
                        p { {t(locale, err.message_key())} }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let _ = navigator.push(Route::Dashboard {});
                            },
                            {t(locale, "back_dashboard")}
                        }
                    }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(err) = *error.read() {
                        p { class: "study__error", {t(locale, err.message_key())} }
                    }
                    if let Some(stats) = completion_state {
                        CompletionPanel { stats, locale, on_intent: dispatch_intent }
                    } else if let Some(card) = card {
                        StudyCard { card, flipped, streak, locale, on_intent: dispatch_intent }
                    }
                },
            }
        }
    }
}

#[component]
fn StudyCard(
    card: CardRecord,
    flipped: bool,
    streak: u32,
    locale: Locale,
    on_intent: EventHandler<StudyIntent>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let theme = section_theme(card.section.as_str());
    let link = card.link.as_ref().map(ToString::to_string);
    let face_class = if flipped {
        "flashcard flashcard--back"
    } else {
        "flashcard flashcard--front"
    };
    let streak_label = t_with(locale, "streak", &[("count", &streak.to_string())]);
    let mut drag_start = use_signal(|| None::<f64>);
    let mut swiped = use_signal(|| false);

    rsx! {
        div { class: "study__card-area",
            div {
                class: "{face_class}",
                id: "study-card",
                style: "--accent: {theme.color}",
                onpointerdown: move |evt: PointerEvent| {
                    drag_start.set(Some(evt.client_coordinates().x));
                    swiped.set(false);
                },
                onpointerup: move |evt: PointerEvent| {
                    let Some(start_x) = drag_start.take() else {
                        return;
                    };
                    let delta_x = evt.client_coordinates().x - start_x;
                    if swipe_judgment(delta_x).is_some() {
                        swiped.set(true);
                        on_intent.call(StudyIntent::Swipe { delta_x });
                    }
                },
                onclick: move |_| {
                    // The click that ends a swipe must not flip the next card.
                    if swiped.replace(false) {
                        return;
                    }
                    on_intent.call(StudyIntent::Flip);
                },
                if flipped {
                    div { class: "flashcard__icon flashcard__icon--small", "{theme.icon.glyph()}" }
                    p { class: "flashcard__details", "{card.details}" }
                    if let Some(url) = link {
                        button {
                            class: "btn btn-secondary flashcard__link",
                            r#type: "button",
                            onpointerdown: move |evt: PointerEvent| evt.stop_propagation(),
                            onpointerup: move |evt: PointerEvent| evt.stop_propagation(),
                            onclick: move |evt: MouseEvent| {
                                evt.stop_propagation();
                                ctx.open_link(&url);
                            },
                            "↗ "
                            {t(locale, "docs_link")}
                        }
                    }
                } else {
                    div { class: "flashcard__icon", "{theme.icon.glyph()}" }
                    h3 { class: "flashcard__section", "{card.section}" }
                    h1 { class: "flashcard__content", "{card.content}" }
                    span { class: "flashcard__hint", {t(locale, "flip_instruction")} }
                }
            }
            p { class: "study__streak", "{streak_label}" }
            div { class: "study__controls",
                JudgeButton { judgment: Judgment::Failure, locale, on_intent }
                JudgeButton { judgment: Judgment::InstantMaster, locale, on_intent }
                JudgeButton { judgment: Judgment::Success, locale, on_intent }
            }
        }
    }
}

#[component]
fn JudgeButton(judgment: Judgment, locale: Locale, on_intent: EventHandler<StudyIntent>) -> Element {
    let (class, id, key, glyph) = match judgment {
        Judgment::Failure => ("judge judge--failure", "judge-failure", "judge_failure", "👎"),
        Judgment::Success => ("judge judge--success", "judge-success", "judge_success", "👍"),
        Judgment::InstantMaster => ("judge judge--instant", "judge-instant", "judge_instant", "★"),
    };
    rsx! {
        button {
            class: "{class}",
            id: "{id}",
            r#type: "button",
            title: t(locale, key),
            onclick: move |_| on_intent.call(StudyIntent::Judge(judgment)),
            span { class: "judge__glyph", "{glyph}" }
            span { class: "judge__label", {t(locale, key)} }
        }
    }
}

#[component]
fn CompletionPanel(stats: SessionStats, locale: Locale, on_intent: EventHandler<StudyIntent>) -> Element {
    let navigator = use_navigator();
    let result = t_with(
        locale,
        "session_result",
        &[
            ("correct", &stats.correct.to_string()),
            ("total", &stats.total.to_string()),
        ],
    );

    rsx! {
        div { class: "study__complete glass-panel",
            h2 { {t(locale, "session_complete")} }
            p { class: "study__result", "{result}" }
            div { class: "study__complete-actions",
                button {
                    class: "btn btn-secondary",
                    id: "study-back",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Dashboard {});
                    },
                    {t(locale, "back_dashboard")}
                }
                button {
                    class: "btn btn-primary",
                    id: "study-again",
                    r#type: "button",
                    onclick: move |_| on_intent.call(StudyIntent::Restart),
                    {t(locale, "study_again")}
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct StudyTestHandles {
    dispatch: Rc<RefCell<Option<Callback<StudyIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<StudyVm>>>>>,
}

#[cfg(test)]
impl StudyTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<StudyIntent>, vm: Signal<Option<StudyVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<StudyIntent> {
        (*self.dispatch.borrow()).expect("study dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<StudyVm>> {
        (*self.vm.borrow()).expect("study vm registered")
    }
}
