use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::icons;

use super::popups::truncate_string;

/// Render the filter sidebar: active facets with counts over the current
/// filtered set, plus sort mode and the state-only toggle.
pub fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let label = Style::default().fg(theme.muted);
    let value = Style::default().fg(theme.fg);

    let mut lines: Vec<Line> = Vec::new();

    let category = app.filter.category.as_deref().unwrap_or("All Categories");
    lines.push(Line::from(vec![
        Span::styled("Category  ", label),
        Span::styled(
            format!("{} ({})", category, app.category_count(category)),
            value,
        ),
    ]));

    lines.push(Line::from(vec![
        Span::styled("Sort      ", label),
        Span::styled(app.filter.sort.label(), value),
    ]));

    let state_marker = if app.filter.state_only {
        icons::CHECK_ON
    } else {
        icons::CHECK_OFF
    };
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", state_marker), Style::default().fg(theme.accent)),
        Span::styled("State-specific only", value),
    ]));

    lines.push(Line::raw(""));
    lines.push(Line::styled("Departments", Style::default().fg(theme.accent).bold()));
    if app.filter.departments.is_empty() {
        lines.push(Line::styled("  (all)", label));
    } else {
        for dept in &app.filter.departments {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", icons::BULLET), label),
                Span::styled(
                    format!("{} ({})", truncate_string(dept, 22), app.department_count(dept)),
                    value,
                ),
            ]));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Tags", Style::default().fg(theme.accent).bold()));
    if app.filter.tags.is_empty() {
        lines.push(Line::styled("  (all)", label));
    } else {
        for tag in &app.filter.tags {
            lines.push(Line::from(vec![
                Span::styled(format!("  {} ", icons::BULLET), label),
                Span::styled(truncate_string(tag, 24), Style::default().fg(theme.badge)),
            ]));
        }
    }

    if !app.bookmarks.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", icons::BOOKMARK_ON), Style::default().fg(theme.badge)),
            Span::styled(format!("{} bookmarked", app.bookmarks.len()), label),
        ]));
    }

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .title(" Filters ")
            .title_style(Style::default().fg(theme.accent).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted)),
    );

    f.render_widget(sidebar, area);
}
