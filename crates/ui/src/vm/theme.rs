/// Glyph shown on section tiles and card faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionIcon {
    Chart,
    Server,
    Database,
    Network,
    Lock,
    Brain,
    Tasks,
    Cloud,
    Money,
    Tools,
    People,
    Desktop,
    Mobile,
    Wifi,
    Globe,
    Briefcase,
}

impl SectionIcon {
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            SectionIcon::Chart => "📊",
            SectionIcon::Server => "🖥",
            SectionIcon::Database => "🗄",
            SectionIcon::Network => "🔗",
            SectionIcon::Lock => "🔒",
            SectionIcon::Brain => "🧠",
            SectionIcon::Tasks => "📋",
            SectionIcon::Cloud => "☁",
            SectionIcon::Money => "💰",
            SectionIcon::Tools => "🛠",
            SectionIcon::People => "👥",
            SectionIcon::Desktop => "💻",
            SectionIcon::Mobile => "📱",
            SectionIcon::Wifi => "📶",
            SectionIcon::Globe => "🌐",
            SectionIcon::Briefcase => "💼",
        }
    }
}

/// Accent color and icon for a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SectionTheme {
    pub color: &'static str,
    pub icon: SectionIcon,
}

pub const DEFAULT_THEME: SectionTheme = SectionTheme {
    color: "#94a3b8",
    icon: SectionIcon::Cloud,
};

// First match wins. "Cloud Financial Management" lands on the management rule.
const RULES: &[(&[&str], SectionTheme)] = &[
    (&["application integration", "アプリケーション統合"], theme("#db2777", SectionIcon::Network)),
    (&["business", "ビジネス"], theme("#ca8a04", SectionIcon::Briefcase)),
    (&["analytics", "アナリティクス"], theme("#3b82f6", SectionIcon::Chart)),
    (&["compute", "コンピュート", "コンピューティング"], theme("#f97316", SectionIcon::Server)),
    (&["storage", "ストレージ"], theme("#10b981", SectionIcon::Database)),
    (&["database", "データベース"], theme("#8b5cf6", SectionIcon::Database)),
    (&["network", "ネットワーキング"], theme("#ec4899", SectionIcon::Network)),
    (&["security", "セキュリティ"], theme("#ef4444", SectionIcon::Lock)),
    (&["machine learning", "機械学習"], theme("#06b6d4", SectionIcon::Brain)),
    (&["management", "マネジメント", "管理"], theme("#eab308", SectionIcon::Tasks)),
    (&["cloud financial", "財務管理"], theme("#84cc16", SectionIcon::Money)),
    (&["developer", "開発者"], theme("#6366f1", SectionIcon::Tools)),
    (&["customer", "顧客"], theme("#f43f5e", SectionIcon::People)),
    (&["end-user", "エンドユーザー"], theme("#d946ef", SectionIcon::Desktop)),
    (&["frontend", "フロントエンド"], theme("#0ea5e9", SectionIcon::Mobile)),
    (&["iot"], theme("#14b8a6", SectionIcon::Wifi)),
    (&["global", "グローバル"], theme("#64748b", SectionIcon::Globe)),
    (&["migration", "移行"], theme("#8b5cf6", SectionIcon::Cloud)),
    (&["purchasing", "購入"], theme("#f59e0b", SectionIcon::Money)),
    (&["well-architected"], theme("#475569", SectionIcon::Brain)),
];

const fn theme(color: &'static str, icon: SectionIcon) -> SectionTheme {
    SectionTheme { color, icon }
}

/// Theme for a section label, matched by keyword in English or Japanese.
#[must_use]
pub fn section_theme(section: &str) -> SectionTheme {
    let normalized = section.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| normalized.contains(k)))
        .map_or(DEFAULT_THEME, |(_, theme)| *theme)
}
