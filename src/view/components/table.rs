use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::App;
use crate::icons;

use super::popups::truncate_string;

/// "N services found for ..." line above the results table
pub fn render_results_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let count = app.view_indices.len();

    let mut spans = vec![Span::styled(
        format!("{} services found", count),
        Style::default().fg(theme.fg).bold(),
    )];
    if !app.filter.query.is_empty() {
        spans.push(Span::styled(
            format!(" for \"{}\"", app.filter.query),
            Style::default().fg(theme.muted),
        ));
    }
    if !app.filter.departments.is_empty() {
        spans.push(Span::styled(
            format!("  Departments: {}", app.filter.departments.len()),
            Style::default().fg(theme.accent),
        ));
    }
    if app.filter.category.is_some() {
        spans.push(Span::styled("  Categories: 1", Style::default().fg(theme.badge)));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the results table (the paged window of the filtered view)
pub fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let visible = app.visible_listings();

    let header = Row::new(vec![
        Cell::from(" "),
        Cell::from("Title").style(Style::default().fg(theme.accent).bold()),
        Cell::from("Department").style(Style::default().fg(theme.accent).bold()),
        Cell::from("Time").style(Style::default().fg(theme.accent).bold()),
        Cell::from("Tags").style(Style::default().fg(theme.accent).bold()),
    ])
    .height(1)
    .bottom_margin(1);

    let rows: Vec<Row> = visible
        .iter()
        .map(|listing| {
            let star = if app.is_bookmarked(&listing.title) {
                icons::BOOKMARK_ON
            } else {
                " "
            };
            let title = if listing.state_specific {
                format!("{} {}", truncate_string(&listing.title, 38), icons::STATE_BADGE)
            } else {
                truncate_string(&listing.title, 40)
            };
            Row::new(vec![
                Cell::from(star).style(Style::default().fg(theme.badge)),
                Cell::from(title).style(Style::default().fg(theme.fg)),
                Cell::from(truncate_string(&listing.department, 28))
                    .style(Style::default().fg(theme.muted)),
                Cell::from(listing.estimated_time.clone())
                    .style(Style::default().fg(theme.muted)),
                Cell::from(truncate_string(&listing.tags.join(", "), 30))
                    .style(Style::default().fg(theme.badge)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(30),
        Constraint::Length(30),
        Constraint::Length(14),
        Constraint::Length(32),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(theme.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(icons::SELECTOR);

    f.render_stateful_widget(table, area, &mut app.table_state.clone());
}

/// Bottom line: load-more affordance and key hints
pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let load_more = if app.has_more() {
        format!(
            "m: load more ({}/{})  ",
            app.visible_count(),
            app.view_indices.len()
        )
    } else {
        String::new()
    };

    let footer = Line::from(vec![
        Span::styled(load_more, Style::default().fg(theme.accent)),
        Span::styled(
            "enter: details  o: open link  b: bookmark  c/d/a: facets  s: sort  ?: help",
            Style::default().fg(theme.muted),
        ),
    ]);

    f.render_widget(Paragraph::new(footer), area);
}
