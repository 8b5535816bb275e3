use ratatui::widgets::TableState;
use std::sync::mpsc::Receiver;

use crate::data::{all_departments, all_tags, FilterState, Listing, CATEGORIES, PAGE_SIZE};
use crate::services::{apply_filters, suggest, PrefsStore, VoiceInput};
use crate::view::theme::Theme;

pub struct App {
    // Catalog (immutable after startup)
    pub listings: Vec<Listing>,
    pub departments: Vec<String>,
    pub tags: Vec<String>,

    // Filter state and the derived view
    pub filter: FilterState,
    /// Indices into `listings`, filtered and sorted. Recomputed whole on
    /// every filter change.
    pub view_indices: Vec<usize>,
    /// Page count for the load-more window; `visible_count = page * PAGE_SIZE`.
    pub page: usize,
    pub table_state: TableState,

    // Search box state
    pub search_mode: bool,
    pub suggestions: Vec<String>,
    /// `None` = suggesting, `Some` = navigating the dropdown.
    pub suggestion_index: Option<usize>,

    // Popup state
    pub show_help_popup: bool,
    pub show_detail_popup: bool,
    pub show_error_popup: bool,
    pub show_category_popup: bool,
    pub show_departments_popup: bool,
    pub show_tags_popup: bool,
    pub category_cursor: usize,
    pub departments_cursor: usize,
    pub department_search: String,
    pub tags_cursor: usize,

    // Error state
    pub error: Option<String>,

    // Preferences
    pub theme: Theme,
    pub bookmarks: Vec<String>,
    pub prefs: Option<PrefsStore>,

    // Voice capability
    pub voice: Box<dyn VoiceInput>,
    pub voice_rx: Option<Receiver<String>>,
}

impl App {
    pub fn new(listings: Vec<Listing>, prefs: Option<PrefsStore>, voice: Box<dyn VoiceInput>) -> Self {
        let departments = all_departments(&listings);
        let tags = all_tags(&listings);

        let theme = prefs
            .as_ref()
            .and_then(|p| p.theme().ok().flatten())
            .map(|name| Theme::from_name(&name))
            .unwrap_or_default();
        let bookmarks = prefs
            .as_ref()
            .and_then(|p| p.bookmarks().ok())
            .unwrap_or_default();

        let view_indices: Vec<usize> = (0..listings.len()).collect();
        let mut table_state = TableState::default();
        if !view_indices.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            listings,
            departments,
            tags,
            filter: FilterState::default(),
            view_indices,
            page: 1,
            table_state,
            search_mode: false,
            suggestions: Vec::new(),
            suggestion_index: None,
            show_help_popup: false,
            show_detail_popup: false,
            show_error_popup: false,
            show_category_popup: false,
            show_departments_popup: false,
            show_tags_popup: false,
            category_cursor: 0,
            departments_cursor: 0,
            department_search: String::new(),
            tags_cursor: 0,
            error: None,
            theme,
            bookmarks,
            prefs,
            voice,
            voice_rx: None,
        }
    }

    // Getters

    /// How many listings the pagination window currently exposes.
    pub fn visible_count(&self) -> usize {
        (self.page * PAGE_SIZE).min(self.view_indices.len())
    }

    pub fn has_more(&self) -> bool {
        self.page * PAGE_SIZE < self.view_indices.len()
    }

    /// The paged slice of the filtered, sorted view.
    pub fn visible_listings(&self) -> Vec<&Listing> {
        self.view_indices[..self.visible_count()]
            .iter()
            .filter_map(|&idx| self.listings.get(idx))
            .collect()
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.table_state
            .selected()
            .filter(|&sel| sel < self.visible_count())
            .and_then(|sel| self.view_indices.get(sel))
            .and_then(|&idx| self.listings.get(idx))
    }

    pub fn is_bookmarked(&self, title: &str) -> bool {
        self.bookmarks.iter().any(|t| t == title)
    }

    /// The category popup choices: "All Categories" plus the fixed set.
    pub fn category_choices(&self) -> Vec<&'static str> {
        let mut choices = vec!["All Categories"];
        choices.extend_from_slice(CATEGORIES);
        choices
    }

    /// Departments matching the popup's type-to-filter input.
    pub fn department_choices(&self) -> Vec<&String> {
        let needle = self.department_search.to_lowercase();
        self.departments
            .iter()
            .filter(|d| d.to_lowercase().contains(&needle))
            .collect()
    }

    /// Listings passing the current filter, before pagination. Facet
    /// counts are computed over this set.
    pub fn filtered_listings(&self) -> Vec<&Listing> {
        self.view_indices
            .iter()
            .filter_map(|&idx| self.listings.get(idx))
            .collect()
    }

    pub fn category_count(&self, category: &str) -> usize {
        if category == "All Categories" {
            return self.view_indices.len();
        }
        self.filtered_listings()
            .iter()
            .filter(|l| l.category == category)
            .count()
    }

    pub fn department_count(&self, department: &str) -> usize {
        self.filtered_listings()
            .iter()
            .filter(|l| l.department == department)
            .count()
    }

    // View maintenance

    /// Recompute the derived view after any filter/sort/search change.
    /// Resets pagination to the first page and selection to the top.
    pub fn refresh_view(&mut self) {
        self.view_indices = apply_filters(&self.listings, &self.filter);
        self.page = 1;
        self.table_state = TableState::default();
        if !self.view_indices.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    pub fn refresh_suggestions(&mut self) {
        self.suggestions = suggest(&self.listings, &self.filter.query);
        self.suggestion_index = None;
    }

    // Voice capture

    pub fn check_voice_result(&mut self) -> Option<String> {
        let transcript = self.voice_rx.as_ref().and_then(|rx| rx.try_recv().ok());
        if transcript.is_some() {
            // One transcript per capture
            self.voice_rx = None;
        }
        transcript
    }
}
