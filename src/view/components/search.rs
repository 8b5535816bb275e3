use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::icons;

/// Render the search bar
pub fn render_search_bar(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let total_count = app.listings.len();
    let filtered_count = app.view_indices.len();

    let cursor = if app.search_mode { icons::CURSOR } else { "" };
    let count_display = if app.filter.query.is_empty() {
        String::new()
    } else {
        format!(" ({}/{})", filtered_count, total_count)
    };
    let hint = if app.search_mode || !app.filter.query.is_empty() {
        ""
    } else {
        "Search schemes, services, or portals (press /)"
    };

    let search_line = Line::from(vec![
        Span::styled("/", Style::default().fg(theme.accent)),
        Span::styled(&app.filter.query, Style::default().fg(theme.fg)),
        Span::styled(cursor, Style::default().fg(theme.accent)),
        Span::styled(count_display, Style::default().fg(theme.muted)),
        Span::styled(hint, Style::default().fg(theme.muted)),
    ]);

    f.render_widget(Paragraph::new(search_line), area);
}

/// Render the autocomplete dropdown under the search bar
pub fn render_suggestions(f: &mut Frame, app: &App, search_area: Rect) {
    if !app.search_mode || app.suggestions.is_empty() {
        return;
    }
    let theme = &app.theme;

    let frame = f.area();
    let width = app
        .suggestions
        .iter()
        .map(|s| s.chars().count() as u16 + 4)
        .max()
        .unwrap_or(20)
        .min(search_area.width.saturating_sub(2));
    let height = (app.suggestions.len() as u16)
        .min(frame.height.saturating_sub(search_area.y + 1));
    if width == 0 || height == 0 {
        return;
    }
    let area = Rect {
        x: search_area.x + 1,
        y: search_area.y + 1,
        width,
        height,
    };

    f.render_widget(Clear, area);

    let items: Vec<ListItem> = app
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let style = if app.suggestion_index == Some(i) {
                Style::default().fg(theme.fg).bg(theme.highlight_bg).bold()
            } else {
                Style::default().fg(theme.muted)
            };
            ListItem::new(format!(" {} ", title)).style(style)
        })
        .collect();

    f.render_widget(List::new(items), area);
}
