//! Pure filter-paginate pipeline over a team's projects.

use crate::model::project::{parse_date, Project, ProjectStatus, TeamId};
use chrono::{Datelike, Local, NaiveDate};

/// Projects per page.
pub const PAGE_SIZE: usize = 10;

/// Status stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProjectStatus),
}

impl StatusFilter {
    /// Parses a filter label from the listing UI.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Todos los estados" | "all" => Some(Self::All),
            other => ProjectStatus::from_label(other).map(Self::Only),
        }
    }

    pub fn matches(self, status: ProjectStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

/// Start-date stage of the pipeline, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    AnyDate,
    ThisMonth,
    /// January-June or July-December of the current year.
    ThisHalfYear,
    ThisYear,
}

impl DateRange {
    /// Parses a filter label from the listing UI.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Todas las fechas" | "all" => Some(Self::AnyDate),
            "Este mes" | "month" => Some(Self::ThisMonth),
            "Este semestre" | "half_year" => Some(Self::ThisHalfYear),
            "Este año" | "year" => Some(Self::ThisYear),
            _ => None,
        }
    }

    /// Whether a `YYYY-MM-DD` start date falls in this range.
    ///
    /// Unparseable dates only pass `AnyDate`.
    pub fn contains(self, start_date: &str, today: NaiveDate) -> bool {
        if self == Self::AnyDate {
            return true;
        }
        let Some(start) = parse_date(start_date) else {
            return false;
        };
        let same_year = start.year() == today.year();
        match self {
            Self::AnyDate => true,
            Self::ThisMonth => same_year && start.month() == today.month(),
            Self::ThisHalfYear => same_year && start.month0() / 6 == today.month0() / 6,
            Self::ThisYear => same_year,
        }
    }
}

/// Listing query as entered in the projects view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectQuery {
    /// Case-insensitive substring of the project name; empty matches all.
    pub term: String,
    pub status: StatusFilter,
    pub date_range: DateRange,
    /// 1-based page number.
    pub page: u32,
}

impl Default for ProjectQuery {
    fn default() -> Self {
        Self {
            term: String::new(),
            status: StatusFilter::All,
            date_range: DateRange::AnyDate,
            page: 1,
        }
    }
}

/// One visible page plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPage {
    pub items: Vec<Project>,
    pub page: u32,
    pub total_pages: u32,
    /// Matches across all pages.
    pub total_items: usize,
}

/// Runs the pipeline using the local calendar date as "today".
pub fn visible_projects_now(projects: &[Project], team_id: TeamId, query: &ProjectQuery) -> ProjectPage {
    visible_projects(projects, team_id, query, Local::now().date_naive())
}

/// Filters `projects` by team, name, status and start date, then slices one page.
///
/// Page 0 reads as page 1; pages past the end come back empty.
pub fn visible_projects(
    projects: &[Project],
    team_id: TeamId,
    query: &ProjectQuery,
    today: NaiveDate,
) -> ProjectPage {
    let needle = query.term.to_lowercase();
    let matches = projects
        .iter()
        .filter(|project| project.team == team_id)
        .filter(|project| needle.is_empty() || project.name.to_lowercase().contains(&needle))
        .filter(|project| query.status.matches(project.status))
        .filter(|project| query.date_range.contains(&project.start_date, today))
        .collect::<Vec<_>>();

    let total_items = matches.len();
    let offset = (query.page.max(1) as usize - 1) * PAGE_SIZE;
    let items = matches
        .into_iter()
        .skip(offset)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    ProjectPage {
        items,
        page: query.page,
        total_pages: total_pages(total_items),
        total_items,
    }
}

/// `ceil(count / PAGE_SIZE)`; zero when nothing matches.
pub fn total_pages(count: usize) -> u32 {
    u32::try_from(count.div_ceil(PAGE_SIZE)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{total_pages, DateRange, StatusFilter};
    use crate::model::project::ProjectStatus;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(25), 3);
    }

    #[test]
    fn status_filter_labels() {
        assert_eq!(StatusFilter::from_label("Todos los estados"), Some(StatusFilter::All));
        assert_eq!(
            StatusFilter::from_label("Terminado"),
            Some(StatusFilter::Only(ProjectStatus::Done))
        );
        assert_eq!(StatusFilter::from_label("Archivado"), None);
    }

    #[test]
    fn half_year_buckets_split_at_july() {
        let today = day(2025, 8, 15);
        assert!(DateRange::ThisHalfYear.contains("2025-07-01", today));
        assert!(DateRange::ThisHalfYear.contains("2025-12-31", today));
        assert!(!DateRange::ThisHalfYear.contains("2025-06-30", today));
        assert!(!DateRange::ThisHalfYear.contains("2024-08-01", today));
    }

    #[test]
    fn month_and_year_ranges_require_same_year() {
        let today = day(2025, 3, 2);
        assert!(DateRange::ThisMonth.contains("2025-03-31", today));
        assert!(!DateRange::ThisMonth.contains("2024-03-02", today));
        assert!(DateRange::ThisYear.contains("2025-11-01", today));
        assert!(!DateRange::ThisYear.contains("2026-01-01", today));
    }

    #[test]
    fn unparseable_start_date_only_passes_any_date() {
        let today = day(2025, 3, 2);
        assert!(DateRange::AnyDate.contains("soon", today));
        assert!(!DateRange::ThisYear.contains("soon", today));
    }
}
