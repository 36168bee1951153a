use dioxus::prelude::*;

use crate::context::LocaleState;

/// Switches between English and Japanese; labelled with the other language.
#[component]
pub fn LanguageToggle() -> Element {
    let mut locale_state = use_context::<LocaleState>();
    let target = locale_state.get().toggled();

    rsx! {
        button {
            class: "language-toggle",
            id: "language-toggle",
            r#type: "button",
            onclick: move |_| locale_state.toggle(),
            span { class: "language-toggle__icon", "🌐" }
            "{target.native_name()}"
        }
    }
}
