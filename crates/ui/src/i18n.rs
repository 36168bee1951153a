//! Interface strings for each supported locale.
//!
//! Lookups fall back to English when a locale lacks a key, and to the key
//! itself when English lacks it too. Placeholders are written `{{name}}`.

use prep_core::model::Locale;

const EN: &[(&str, &str)] = &[
    ("dashboard_title", "AWS Cloud Practitioner Prep"),
    ("dashboard_subtitle", "Master the cloud concepts"),
    ("start_random", "Start Random Session"),
    ("view_mastered", "View Mastered"),
    ("study_by_section", "Study by Section"),
    ("mastery_level", "Mastery Level"),
    ("mastered_count", "{{count}} / {{total}}"),
    ("section_mastered", "{{count}} / {{total}} mastered"),
    ("exit", "Exit"),
    ("back", "Back"),
    ("card_progress", "Card {{current}} of {{total}}"),
    ("flip_instruction", "Tap to flip"),
    ("streak", "Streak {{count}} / 3"),
    ("judge_failure", "Still learning"),
    ("judge_success", "Got it"),
    ("judge_instant", "Already know it"),
    ("docs_link", "AWS Documentation"),
    ("mastered_title", "Mastered Cards"),
    ("filter_placeholder", "Filter by section or topic..."),
    ("no_mastered", "No cards mastered yet."),
    ("keep_studying", "Keep studying to fill this list!"),
    ("unmaster", "Un-master"),
    ("confirm", "Confirm"),
    ("cancel", "Cancel"),
    ("session_complete", "Session Complete!"),
    (
        "session_result",
        "You mastered {{correct}} out of {{total}} cards in this session.",
    ),
    ("study_again", "Study Again"),
    ("back_dashboard", "Back to Dashboard"),
    ("delist_confirm", "Are you sure you want to un-master \"{{item}}\"?"),
    ("no_cards", "No cards to study here."),
    ("loading", "Loading..."),
    ("error", "Something went wrong. Please try again."),
    ("retry", "Retry"),
];

const JA: &[(&str, &str)] = &[
    ("dashboard_title", "AWS クラウドプラクティショナー 復習"),
    ("dashboard_subtitle", "クラウドの概念をマスターしよう"),
    ("start_random", "ランダム学習を開始"),
    ("view_mastered", "習得済みを表示"),
    ("study_by_section", "セクション別学習"),
    ("mastery_level", "習得レベル"),
    ("mastered_count", "{{count}} / {{total}}"),
    ("section_mastered", "{{count}} / {{total}} 習得済み"),
    ("exit", "終了"),
    ("back", "戻る"),
    ("card_progress", "カード {{current}} / {{total}}"),
    ("flip_instruction", "タップして裏返す"),
    ("streak", "連続正解 {{count}} / 3"),
    ("judge_failure", "まだ覚えていない"),
    ("judge_success", "覚えた"),
    ("judge_instant", "もう知っている"),
    ("docs_link", "AWS ドキュメント"),
    ("mastered_title", "習得済みカード"),
    ("filter_placeholder", "セクションやトピックで検索..."),
    ("no_mastered", "まだ習得したカードはありません。"),
    ("keep_studying", "学習を続けてリストを埋めましょう！"),
    ("unmaster", "習得済みから外す"),
    ("confirm", "はい"),
    ("cancel", "キャンセル"),
    ("session_complete", "セッション完了！"),
    (
        "session_result",
        "今回のセッションで {{total}} 枚中 {{correct}} 枚を習得しました。",
    ),
    ("study_again", "もう一度学習する"),
    ("back_dashboard", "ダッシュボードに戻る"),
    ("delist_confirm", "「{{item}}」を習得済みから削除してもよろしいですか？"),
];

fn table(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => EN,
        Locale::Ja => JA,
    }
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    table(locale)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Translate `key` for `locale`.
#[must_use]
pub fn t(locale: Locale, key: &str) -> String {
    t_with(locale, key, &[])
}

/// Translate `key` and fill its `{{name}}` placeholders from `args`.
#[must_use]
pub fn t_with(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    let template = lookup(locale, key)
        .or_else(|| lookup(Locale::En, key))
        .unwrap_or(key);
    interpolate(template, args)
}

fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = template.to_owned();
    for (name, value) in args {
        out = out.replace(&format!("{{{{{name}}}}}"), value);
    }
    out
}
