use sea_query::Iden;
use serde::Deserialize;
use std::str::FromStr;

pub const PREFS_VERSION: i32 = 1;

/// Listings shown per "load more" step.
pub const PAGE_SIZE: usize = 12;

// Database table identifiers for the preference store
#[derive(Iden)]
pub enum PrefsMeta {
    Table,
    Key,
    Value,
}

#[derive(Iden)]
pub enum BookmarksTable {
    Table,
    Title,
}

/// One entry of the service catalog. Loaded once at startup and never
/// mutated afterward; the title doubles as the display identity.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing {
    pub title: String,
    pub description: String,
    pub link: String,
    pub department: String,
    pub category: String,
    pub tags: Vec<String>,
    pub eligibility: String,
    pub documents_required: Vec<String>,
    pub estimated_time: String,
    pub last_updated: String,
    pub state_specific: bool,
}

impl Listing {
    /// True when `last_updated` falls within 5 days of `today`.
    pub fn is_recently_updated(&self, today: chrono::NaiveDate) -> bool {
        chrono::NaiveDate::parse_from_str(&self.last_updated, "%Y-%m-%d")
            .map(|updated| (today - updated).num_days() <= 5)
            .unwrap_or(false)
    }
}

// Sort mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Relevance,
    Newest,
    EstimatedTime,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Relevance => "Relevance",
            SortMode::Newest => "Newest",
            SortMode::EstimatedTime => "Estimated Time",
        }
    }

    pub fn cycled(self) -> SortMode {
        match self {
            SortMode::Relevance => SortMode::Newest,
            SortMode::Newest => SortMode::EstimatedTime,
            SortMode::EstimatedTime => SortMode::Relevance,
        }
    }
}

impl FromStr for SortMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "newest" => SortMode::Newest,
            "estimated time" | "estimated_time" => SortMode::EstimatedTime,
            _ => SortMode::Relevance,
        })
    }
}

/// The full set of facet selections driving the visible listing set.
/// A derived view is recomputed from scratch whenever any field changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// `None` means "All Categories".
    pub category: Option<String>,
    pub query: String,
    pub state_only: bool,
    pub departments: Vec<String>,
    /// AND-combined: a listing must carry every selected tag.
    pub tags: Vec<String>,
    pub sort: SortMode,
}

impl FilterState {
    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    pub fn toggle_department(&mut self, dept: &str) {
        if let Some(pos) = self.departments.iter().position(|d| d == dept) {
            self.departments.remove(pos);
        } else {
            self.departments.push(dept.to_string());
        }
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    /// Idempotent add, used by the tag-click shortcut.
    pub fn add_tag(&mut self, tag: &str) {
        if !self.tags.iter().any(|t| t == tag) {
            self.tags.push(tag.to_string());
        }
    }
}
