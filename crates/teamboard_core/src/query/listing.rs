//! Listing view state: current filters and page.

use crate::model::project::TeamId;
use crate::model::team::Team;
use crate::query::pipeline::{visible_projects, DateRange, ProjectPage, ProjectQuery, StatusFilter};
use chrono::NaiveDate;

/// Current page of a listing, kept within `[1, total_pages]` by navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: u32,
}

impl Default for Pager {
    fn default() -> Self {
        Self { current: 1 }
    }
}

impl Pager {
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Moves to `page` when it is in range; returns whether it moved.
    pub fn go_to(&mut self, page: u32, total_pages: u32) -> bool {
        if page >= 1 && page <= total_pages {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self, total_pages: u32) -> bool {
        self.go_to(self.current.saturating_add(1), total_pages)
    }

    pub fn previous(&mut self, total_pages: u32) -> bool {
        self.go_to(self.current.saturating_sub(1), total_pages)
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Pulls the page back to `max(1, total_pages)` when it sits past the end;
    /// returns whether it moved.
    pub fn clamp(&mut self, total_pages: u32) -> bool {
        let last = total_pages.max(1);
        if self.current > last {
            self.current = last;
            true
        } else {
            false
        }
    }
}

/// Filters and page of the projects view.
///
/// The page goes back to 1 whenever the viewed team changes; filter edits
/// keep it. A list that shrank under the current page pulls it back to the
/// last page.
#[derive(Debug, Clone, Default)]
pub struct ProjectListing {
    term: String,
    status: StatusFilter,
    date_range: DateRange,
    pager: Pager,
    team_id: Option<TeamId>,
}

impl ProjectListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
    }

    pub fn set_date_range(&mut self, date_range: DateRange) {
        self.date_range = date_range;
    }

    pub fn page(&self) -> u32 {
        self.pager.current()
    }

    /// Records the team being viewed, resetting the page when it changed.
    pub fn sync_team(&mut self, team_id: Option<TeamId>) {
        if self.team_id != team_id {
            self.team_id = team_id;
            self.pager.reset();
        }
    }

    pub fn go_to(&mut self, page: u32, total_pages: u32) -> bool {
        self.pager.go_to(page, total_pages)
    }

    pub fn query(&self) -> ProjectQuery {
        ProjectQuery {
            term: self.term.clone(),
            status: self.status,
            date_range: self.date_range,
            page: self.pager.current(),
        }
    }

    /// Syncs to `team` and returns its visible page. No team yields an empty page.
    pub fn view(&mut self, team: Option<&Team>, today: NaiveDate) -> ProjectPage {
        self.sync_team(team.map(|team| team.id));
        let page = self.page_of(team, today);
        if self.pager.clamp(page.total_pages) {
            return self.page_of(team, today);
        }
        page
    }

    fn page_of(&self, team: Option<&Team>, today: NaiveDate) -> ProjectPage {
        let query = self.query();
        match team {
            Some(team) => visible_projects(&team.projects, team.id, &query, today),
            None => visible_projects(&[], 0, &query, today),
        }
    }
}
