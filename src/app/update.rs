use super::message::{Command, Message};
use super::model::App;

/// Update the application state based on a message.
/// Returns an optional command to be executed by the main loop.
pub fn update(app: &mut App, msg: Message) -> Option<Command> {
    match msg {
        // Navigation
        Message::NextItem => {
            next_item(app);
            None
        }
        Message::PreviousItem => {
            previous_item(app);
            None
        }
        Message::GoToTop => {
            if app.visible_count() > 0 {
                app.table_state.select(Some(0));
            }
            None
        }
        Message::GoToBottom => {
            if app.visible_count() > 0 {
                app.table_state.select(Some(app.visible_count() - 1));
            }
            None
        }
        Message::LoadMore => {
            if app.has_more() {
                app.page += 1;
            }
            None
        }

        // Search box
        Message::EnterSearchMode => {
            app.search_mode = true;
            app.refresh_suggestions();
            None
        }
        Message::ExitSearchMode { clear } => {
            exit_search_mode(app, clear);
            None
        }
        Message::SearchInput(c) => {
            app.filter.query.push(c);
            app.refresh_suggestions();
            app.refresh_view();
            None
        }
        Message::SearchBackspace => {
            app.filter.query.pop();
            app.refresh_suggestions();
            app.refresh_view();
            None
        }
        Message::SuggestionNext => {
            suggestion_next(app);
            None
        }
        Message::SuggestionPrevious => {
            suggestion_previous(app);
            None
        }
        Message::AcceptSuggestion => {
            accept_suggestion(app);
            None
        }
        Message::StartVoice => {
            if app.voice.is_available() {
                Some(Command::StartVoiceCapture)
            } else {
                None
            }
        }
        Message::VoiceTranscript(transcript) => {
            // Most recent result overwrites the query
            app.filter.query = transcript;
            app.search_mode = true;
            app.refresh_suggestions();
            app.refresh_view();
            None
        }

        // Facets
        Message::CycleSort => {
            app.filter.sort = app.filter.sort.cycled();
            app.refresh_view();
            None
        }
        Message::ToggleStateOnly => {
            app.filter.state_only = !app.filter.state_only;
            app.refresh_view();
            None
        }
        Message::ClearFilters => {
            app.filter.clear();
            app.department_search.clear();
            app.refresh_view();
            None
        }
        Message::OpenCategoryPopup => {
            app.show_category_popup = true;
            app.category_cursor = current_category_position(app);
            None
        }
        Message::CloseCategoryPopup => {
            app.show_category_popup = false;
            None
        }
        Message::CategoryNext => {
            let len = app.category_choices().len();
            app.category_cursor = (app.category_cursor + 1).min(len - 1);
            None
        }
        Message::CategoryPrevious => {
            app.category_cursor = app.category_cursor.saturating_sub(1);
            None
        }
        Message::SelectCategory => {
            select_category(app);
            None
        }
        Message::OpenDepartmentsPopup => {
            app.show_departments_popup = true;
            app.departments_cursor = 0;
            app.department_search.clear();
            None
        }
        Message::CloseDepartmentsPopup => {
            app.show_departments_popup = false;
            None
        }
        Message::DepartmentsNext => {
            let len = app.department_choices().len();
            if len > 0 {
                app.departments_cursor = (app.departments_cursor + 1).min(len - 1);
            }
            None
        }
        Message::DepartmentsPrevious => {
            app.departments_cursor = app.departments_cursor.saturating_sub(1);
            None
        }
        Message::ToggleDepartment => {
            toggle_department(app);
            None
        }
        Message::DepartmentSearchInput(c) => {
            app.department_search.push(c);
            clamp_departments_cursor(app);
            None
        }
        Message::DepartmentSearchBackspace => {
            app.department_search.pop();
            clamp_departments_cursor(app);
            None
        }
        Message::OpenTagsPopup => {
            app.show_tags_popup = true;
            app.tags_cursor = 0;
            None
        }
        Message::CloseTagsPopup => {
            app.show_tags_popup = false;
            None
        }
        Message::TagsNext => {
            if !app.tags.is_empty() {
                app.tags_cursor = (app.tags_cursor + 1).min(app.tags.len() - 1);
            }
            None
        }
        Message::TagsPrevious => {
            app.tags_cursor = app.tags_cursor.saturating_sub(1);
            None
        }
        Message::ToggleTag => {
            if let Some(tag) = app.tags.get(app.tags_cursor).cloned() {
                app.filter.toggle_tag(&tag);
                app.refresh_view();
            }
            None
        }

        // Listing actions
        Message::OpenDetail => {
            if app.selected_listing().is_some() {
                app.show_detail_popup = true;
            }
            None
        }
        Message::CloseDetail => {
            app.show_detail_popup = false;
            None
        }
        Message::OpenSelectedLink => app
            .selected_listing()
            .map(|listing| Command::OpenLink(listing.link.clone())),
        Message::ToggleBookmark => {
            toggle_bookmark(app);
            None
        }
        Message::AddListingTag(n) => {
            add_listing_tag(app, n);
            None
        }

        // Popups / theme
        Message::ToggleTheme => {
            toggle_theme(app);
            None
        }
        Message::ToggleHelp => {
            app.show_help_popup = !app.show_help_popup;
            None
        }
        Message::DismissHelp => {
            app.show_help_popup = false;
            None
        }
        Message::DismissError => {
            app.show_error_popup = false;
            None
        }

        // System
        Message::Quit => Some(Command::Quit),
    }
}

// Helper functions

fn next_item(app: &mut App) {
    let count = app.visible_count();
    if count == 0 {
        return;
    }
    let i = match app.table_state.selected() {
        Some(i) => {
            if i >= count - 1 {
                i
            } else {
                i + 1
            }
        }
        None => 0,
    };
    app.table_state.select(Some(i));
}

fn previous_item(app: &mut App) {
    if app.visible_count() == 0 {
        return;
    }
    let i = match app.table_state.selected() {
        Some(i) => i.saturating_sub(1),
        None => 0,
    };
    app.table_state.select(Some(i));
}

fn exit_search_mode(app: &mut App, clear_query: bool) {
    app.search_mode = false;
    app.suggestions.clear();
    app.suggestion_index = None;
    if clear_query {
        app.filter.query.clear();
        app.refresh_view();
    }
}

fn suggestion_next(app: &mut App) {
    let len = app.suggestions.len();
    if len == 0 {
        return;
    }
    // Wraps at both ends
    app.suggestion_index = Some(match app.suggestion_index {
        Some(i) => (i + 1) % len,
        None => 0,
    });
}

fn suggestion_previous(app: &mut App) {
    let len = app.suggestions.len();
    if len == 0 {
        return;
    }
    app.suggestion_index = Some(match app.suggestion_index {
        Some(i) => (i + len - 1) % len,
        None => len - 1,
    });
}

fn accept_suggestion(app: &mut App) {
    let Some(title) = app
        .suggestion_index
        .and_then(|i| app.suggestions.get(i).cloned())
    else {
        // Enter with no highlight keeps the query and closes the dropdown
        exit_search_mode(app, false);
        return;
    };
    app.filter.query = title;
    app.refresh_view();
    exit_search_mode(app, false);
}

fn current_category_position(app: &App) -> usize {
    match &app.filter.category {
        None => 0,
        Some(cat) => app
            .category_choices()
            .iter()
            .position(|c| c == cat)
            .unwrap_or(0),
    }
}

fn select_category(app: &mut App) {
    let choices = app.category_choices();
    let Some(&choice) = choices.get(app.category_cursor) else {
        return;
    };
    app.filter.category = if choice == "All Categories" {
        None
    } else {
        Some(choice.to_string())
    };
    app.show_category_popup = false;
    app.refresh_view();
}

fn clamp_departments_cursor(app: &mut App) {
    let len = app.department_choices().len();
    if len == 0 {
        app.departments_cursor = 0;
    } else if app.departments_cursor >= len {
        app.departments_cursor = len - 1;
    }
}

fn toggle_department(app: &mut App) {
    let Some(dept) = app
        .department_choices()
        .get(app.departments_cursor)
        .map(|d| (*d).clone())
    else {
        return;
    };
    app.filter.toggle_department(&dept);
    app.refresh_view();
}

fn add_listing_tag(app: &mut App, n: usize) {
    let Some(tag) = app
        .selected_listing()
        .and_then(|listing| listing.tags.get(n))
        .cloned()
    else {
        return;
    };
    app.filter.add_tag(&tag);
    app.show_detail_popup = false;
    // refresh_view returns the selection to the top, the scroll-into-view analog
    app.refresh_view();
}

fn toggle_bookmark(app: &mut App) {
    let Some(title) = app.selected_listing().map(|l| l.title.clone()) else {
        return;
    };
    let result = if let Some(pos) = app.bookmarks.iter().position(|t| *t == title) {
        app.bookmarks.remove(pos);
        app.prefs.as_ref().map(|p| p.remove_bookmark(&title))
    } else {
        app.bookmarks.push(title.clone());
        app.prefs.as_ref().map(|p| p.add_bookmark(&title))
    };
    if let Some(Err(e)) = result {
        app.error = Some(format!("Failed to save bookmark: {}", e));
        app.show_error_popup = true;
    }
}

fn toggle_theme(app: &mut App) {
    app.theme = app.theme.toggled();
    if let Some(Err(e)) = app.prefs.as_ref().map(|p| p.set_theme(app.theme.name)) {
        app.error = Some(format!("Failed to save theme: {}", e));
        app.show_error_popup = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Listing, PAGE_SIZE};
    use crate::services::voice::testing::StubVoice;
    use crate::services::NoVoice;

    fn listing(i: usize) -> Listing {
        Listing {
            title: format!("Service {i:02}"),
            description: format!("Description for service {i}"),
            link: format!("https://example.gov.in/{i}"),
            department: if i % 2 == 0 {
                "Ministry of Even".to_string()
            } else {
                "Ministry of Odd".to_string()
            },
            category: if i % 3 == 0 {
                "Health".to_string()
            } else {
                "Transport".to_string()
            },
            tags: if i % 2 == 0 {
                vec!["even".to_string(), "common".to_string()]
            } else {
                vec!["odd".to_string(), "common".to_string()]
            },
            eligibility: String::new(),
            documents_required: Vec::new(),
            estimated_time: format!("{} min", 5 + i),
            last_updated: format!("2025-01-{:02}", (i % 28) + 1),
            state_specific: i % 4 == 0,
        }
    }

    fn app_with(count: usize) -> App {
        let listings = (0..count).map(listing).collect();
        App::new(listings, None, Box::new(NoVoice))
    }

    #[test]
    fn load_more_grows_visible_count_monotonically() {
        let mut app = app_with(30);
        assert_eq!(app.visible_count(), PAGE_SIZE);

        let mut last = app.visible_count();
        while app.has_more() {
            update(&mut app, Message::LoadMore);
            assert!(app.visible_count() >= last);
            last = app.visible_count();
        }
        assert_eq!(app.visible_count(), 30);

        // Past the end: full set stays, no affordance
        update(&mut app, Message::LoadMore);
        assert_eq!(app.visible_count(), 30);
        assert!(!app.has_more());
    }

    #[test]
    fn filter_change_resets_pagination_to_first_page() {
        let mut app = app_with(30);
        update(&mut app, Message::LoadMore);
        assert_eq!(app.visible_count(), 2 * PAGE_SIZE);

        update(&mut app, Message::EnterSearchMode);
        update(&mut app, Message::SearchInput('s'));
        assert_eq!(app.page, 1);
        assert_eq!(app.visible_count(), PAGE_SIZE);
    }

    #[test]
    fn sort_change_resets_pagination_too() {
        let mut app = app_with(30);
        update(&mut app, Message::LoadMore);
        update(&mut app, Message::CycleSort);
        assert_eq!(app.visible_count(), PAGE_SIZE);
    }

    #[test]
    fn selection_is_clamped_to_the_visible_window() {
        let mut app = app_with(30);
        for _ in 0..100 {
            update(&mut app, Message::NextItem);
        }
        assert_eq!(app.table_state.selected(), Some(PAGE_SIZE - 1));

        update(&mut app, Message::LoadMore);
        update(&mut app, Message::GoToBottom);
        assert_eq!(app.table_state.selected(), Some(2 * PAGE_SIZE - 1));
    }

    #[test]
    fn state_only_toggle_never_grows_the_result_count() {
        let mut app = app_with(30);
        let before = app.view_indices.len();
        update(&mut app, Message::ToggleStateOnly);
        assert!(app.view_indices.len() <= before);
    }

    #[test]
    fn adding_the_same_listing_tag_twice_keeps_it_once() {
        let mut app = app_with(10);
        update(&mut app, Message::OpenDetail);
        update(&mut app, Message::AddListingTag(1));
        let selected = app.filter.tags.clone();
        assert_eq!(selected, vec!["common".to_string()]);

        update(&mut app, Message::OpenDetail);
        update(&mut app, Message::AddListingTag(1));
        assert_eq!(app.filter.tags, selected);
    }

    #[test]
    fn listing_tag_shortcut_closes_detail_and_rests_selection_on_top() {
        let mut app = app_with(30);
        update(&mut app, Message::NextItem);
        update(&mut app, Message::NextItem);
        update(&mut app, Message::OpenDetail);
        update(&mut app, Message::AddListingTag(0));
        assert!(!app.show_detail_popup);
        assert_eq!(app.table_state.selected(), Some(0));
        assert_eq!(app.page, 1);
    }

    #[test]
    fn tag_filters_are_intersection_not_union() {
        let mut app = app_with(20);
        app.filter.tags = vec!["even".to_string(), "common".to_string()];
        app.refresh_view();
        for l in app.filtered_listings() {
            assert!(l.tags.contains(&"even".to_string()));
            assert!(l.tags.contains(&"common".to_string()));
        }
        // "odd" listings carry "common" but not "even"
        assert_eq!(app.view_indices.len(), 10);
    }

    #[test]
    fn facet_counts_follow_the_filtered_set() {
        let mut app = app_with(12);
        assert_eq!(app.category_count("All Categories"), 12);
        assert_eq!(app.category_count("Health"), 4);
        assert_eq!(app.department_count("Ministry of Even"), 6);

        // a query narrows the view, and the counts with it
        app.filter.query = "Service 0".to_string();
        app.refresh_view();
        assert_eq!(app.view_indices.len(), 10);
        assert_eq!(app.category_count("All Categories"), app.view_indices.len());
        assert_eq!(app.category_count("Health"), 4);
        assert_eq!(app.department_count("Ministry of Even"), 5);
        assert_eq!(app.department_count("Ministry of Odd"), 5);
    }

    #[test]
    fn department_counts_respect_an_active_category() {
        let mut app = app_with(12);
        app.filter.category = Some("Health".to_string());
        app.refresh_view();
        assert_eq!(app.view_indices.len(), 4);
        assert_eq!(app.department_count("Ministry of Even"), 2);
        assert_eq!(app.department_count("Ministry of Odd"), 2);
    }

    #[test]
    fn search_box_walks_idle_suggesting_navigating_and_back() {
        let mut app = app_with(10);

        // idle
        assert!(app.suggestions.is_empty());

        // suggesting
        update(&mut app, Message::EnterSearchMode);
        for c in "service".chars() {
            update(&mut app, Message::SearchInput(c));
        }
        assert!(!app.suggestions.is_empty());
        assert_eq!(app.suggestion_index, None);

        // navigating
        update(&mut app, Message::SuggestionNext);
        assert_eq!(app.suggestion_index, Some(0));

        // accepting returns to idle with the query replaced
        let expected = app.suggestions[0].clone();
        update(&mut app, Message::AcceptSuggestion);
        assert!(!app.search_mode);
        assert!(app.suggestions.is_empty());
        assert_eq!(app.filter.query, expected);
        // and the view is re-filtered to that title
        assert_eq!(app.view_indices.len(), 1);
    }

    #[test]
    fn accepting_a_suggestion_refilters_and_resets_pagination() {
        let mut app = app_with(30);
        update(&mut app, Message::LoadMore);
        assert_eq!(app.page, 2);
        update(&mut app, Message::NextItem);

        update(&mut app, Message::EnterSearchMode);
        for c in "service".chars() {
            update(&mut app, Message::SearchInput(c));
        }
        update(&mut app, Message::SuggestionNext);
        let accepted = app.suggestions[0].clone();
        update(&mut app, Message::AcceptSuggestion);

        assert_eq!(app.view_indices.len(), 1);
        assert_eq!(app.listings[app.view_indices[0]].title, accepted);
        assert_eq!(app.page, 1);
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn suggestion_highlight_wraps_at_both_ends() {
        let mut app = app_with(10);
        update(&mut app, Message::EnterSearchMode);
        for c in "service".chars() {
            update(&mut app, Message::SearchInput(c));
        }
        let len = app.suggestions.len();
        assert!(len > 1);

        update(&mut app, Message::SuggestionPrevious);
        assert_eq!(app.suggestion_index, Some(len - 1));
        update(&mut app, Message::SuggestionNext);
        assert_eq!(app.suggestion_index, Some(0));

        for _ in 0..len {
            update(&mut app, Message::SuggestionNext);
        }
        assert_eq!(app.suggestion_index, Some(0));
    }

    #[test]
    fn editing_the_query_resets_the_highlight() {
        let mut app = app_with(10);
        update(&mut app, Message::EnterSearchMode);
        for c in "service".chars() {
            update(&mut app, Message::SearchInput(c));
        }
        update(&mut app, Message::SuggestionNext);
        assert!(app.suggestion_index.is_some());
        update(&mut app, Message::SearchBackspace);
        assert_eq!(app.suggestion_index, None);
    }

    #[test]
    fn escape_clears_query_and_restores_the_full_view() {
        let mut app = app_with(10);
        update(&mut app, Message::EnterSearchMode);
        update(&mut app, Message::SearchInput('z'));
        assert!(app.view_indices.len() < 10);
        update(&mut app, Message::ExitSearchMode { clear: true });
        assert!(app.filter.query.is_empty());
        assert_eq!(app.view_indices.len(), 10);
    }

    #[test]
    fn clear_filters_restores_defaults() {
        let mut app = app_with(20);
        update(&mut app, Message::ToggleStateOnly);
        update(&mut app, Message::CycleSort);
        app.filter.tags = vec!["even".to_string()];
        app.filter.departments = vec!["Ministry of Even".to_string()];
        app.refresh_view();

        update(&mut app, Message::ClearFilters);
        assert_eq!(app.filter, crate::data::FilterState::default());
        assert_eq!(app.view_indices.len(), 20);
        assert_eq!(app.page, 1);
    }

    #[test]
    fn category_selection_filters_exactly() {
        let mut app = app_with(12);
        update(&mut app, Message::OpenCategoryPopup);
        // Move the cursor to "Health"
        let health = app
            .category_choices()
            .iter()
            .position(|c| *c == "Health")
            .unwrap();
        app.category_cursor = health;
        update(&mut app, Message::SelectCategory);
        assert!(!app.show_category_popup);
        assert!(app
            .filtered_listings()
            .iter()
            .all(|l| l.category == "Health"));
    }

    #[test]
    fn department_search_narrows_the_popup_choices() {
        let mut app = app_with(10);
        update(&mut app, Message::OpenDepartmentsPopup);
        assert_eq!(app.department_choices().len(), 2);
        for c in "even".chars() {
            update(&mut app, Message::DepartmentSearchInput(c));
        }
        assert_eq!(app.department_choices().len(), 1);
        update(&mut app, Message::ToggleDepartment);
        assert_eq!(app.filter.departments, vec!["Ministry of Even".to_string()]);
    }

    #[test]
    fn bookmark_toggle_is_symmetric_without_a_store() {
        let mut app = app_with(5);
        update(&mut app, Message::ToggleBookmark);
        assert_eq!(app.bookmarks.len(), 1);
        update(&mut app, Message::ToggleBookmark);
        assert!(app.bookmarks.is_empty());
        assert!(!app.show_error_popup);
    }

    #[test]
    fn theme_toggle_flips_the_palette() {
        let mut app = app_with(1);
        let before = app.theme;
        update(&mut app, Message::ToggleTheme);
        assert_eq!(app.theme, before.toggled());
    }

    #[test]
    fn voice_transcript_overwrites_the_query() {
        let listings = (0..5).map(listing).collect();
        let mut app = App::new(
            listings,
            None,
            Box::new(StubVoice("service 03".to_string())),
        );

        let cmd = update(&mut app, Message::StartVoice);
        assert!(matches!(cmd, Some(Command::StartVoiceCapture)));

        app.voice_rx = app.voice.start_capture();
        let transcript = app.check_voice_result().unwrap();
        update(&mut app, Message::VoiceTranscript(transcript));
        assert_eq!(app.filter.query, "service 03");
        assert!(app.search_mode);
    }

    #[test]
    fn unavailable_voice_degrades_silently() {
        let mut app = app_with(5);
        let cmd = update(&mut app, Message::StartVoice);
        assert!(cmd.is_none());
        assert!(!app.show_error_popup);
    }

    #[test]
    fn open_link_command_carries_the_selected_url() {
        let mut app = app_with(5);
        update(&mut app, Message::NextItem);
        let cmd = update(&mut app, Message::OpenSelectedLink);
        match cmd {
            Some(Command::OpenLink(url)) => assert_eq!(url, "https://example.gov.in/1"),
            _ => panic!("expected OpenLink"),
        }
    }
}
