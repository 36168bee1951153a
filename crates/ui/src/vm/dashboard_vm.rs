use prep_core::model::Section;
use services::DashboardStats;

use super::theme::{SectionTheme, section_theme};

#[derive(Clone, Debug, PartialEq)]
pub struct SectionTileVm {
    pub section: Section,
    pub mastered: usize,
    pub total: usize,
    pub percentage: u8,
    pub theme: SectionTheme,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DashboardVm {
    pub mastered: usize,
    pub total: usize,
    pub percentage: u8,
    pub sections: Vec<SectionTileVm>,
}

#[must_use]
pub fn map_dashboard(stats: &DashboardStats) -> DashboardVm {
    let sections = stats
        .sections
        .iter()
        .map(|s| SectionTileVm {
            section: s.section.clone(),
            mastered: s.mastered,
            total: s.total,
            percentage: s.percentage(),
            theme: section_theme(s.section.as_str()),
        })
        .collect();

    DashboardVm {
        mastered: stats.mastered,
        total: stats.total,
        percentage: stats.percentage(),
        sections,
    }
}
