use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::icons;

use super::components::{
    render_category_popup, render_departments_popup, render_detail_popup, render_error_popup,
    render_footer, render_help_popup, render_results_header, render_search_bar, render_sidebar,
    render_suggestions, render_table, render_tags_popup,
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Search bar
        Constraint::Length(1), // Separator
        Constraint::Min(0),    // Body
        Constraint::Length(1), // Footer
    ])
    .split(f.area());

    render_search_bar(f, app, chunks[0]);

    let separator = icons::SEPARATOR_CHAR.repeat(chunks[1].width as usize);
    f.render_widget(
        Paragraph::new(separator).style(Style::default().fg(app.theme.muted)),
        chunks[1],
    );

    let body = Layout::horizontal([Constraint::Length(32), Constraint::Min(0)]).split(chunks[2]);
    render_sidebar(f, app, body[0]);

    let results = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(body[1]);
    render_results_header(f, app, results[0]);
    render_table(f, app, results[1]);

    render_footer(f, app, chunks[3]);

    // Dropdown overlays the separator and body
    render_suggestions(f, app, chunks[0]);

    // Render popups (order matters for layering)
    if app.show_detail_popup {
        render_detail_popup(f, app);
    }

    if app.show_category_popup {
        render_category_popup(f, app);
    }

    if app.show_departments_popup {
        render_departments_popup(f, app);
    }

    if app.show_tags_popup {
        render_tags_popup(f, app);
    }

    if app.show_help_popup {
        render_help_popup(f, app);
    }

    if app.show_error_popup {
        if let Some(ref error) = app.error {
            render_error_popup(f, app, error);
        }
    }
}
