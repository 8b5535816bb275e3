use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::icons;

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    area
}

pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Render the help popup
pub fn render_help_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = f.area();
    let popup_area = centered_rect(44, 22, area);

    f.render_widget(Clear, popup_area);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(theme.accent));
    let help_lines = vec![
        Line::from(vec![key("/    "), Span::raw("Search with suggestions")]),
        Line::from(vec![key("v    "), Span::raw("Voice search (if available)")]),
        Line::from(vec![key("j/↓  "), Span::raw("Move down")]),
        Line::from(vec![key("k/↑  "), Span::raw("Move up")]),
        Line::from(vec![key("g/G  "), Span::raw("Go to top/bottom")]),
        Line::from(vec![key("m    "), Span::raw("Load more results")]),
        Line::from(vec![key("⏎    "), Span::raw("Listing details")]),
        Line::from(vec![key("o    "), Span::raw("Open link in browser")]),
        Line::from(vec![key("b    "), Span::raw("Toggle bookmark")]),
        Line::from(vec![key("c    "), Span::raw("Choose category")]),
        Line::from(vec![key("d    "), Span::raw("Choose departments")]),
        Line::from(vec![key("a    "), Span::raw("Choose tags")]),
        Line::from(vec![key("x    "), Span::raw("State-specific only")]),
        Line::from(vec![key("s    "), Span::raw("Cycle sort mode")]),
        Line::from(vec![key("C    "), Span::raw("Clear all filters")]),
        Line::from(vec![key("t    "), Span::raw("Toggle light/dark theme")]),
        Line::from(vec![key("q    "), Span::raw("Quit")]),
        Line::raw(""),
        Line::from("Press any key to close").centered(),
    ];

    let help = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .title_style(Style::default().fg(theme.accent).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );

    f.render_widget(help, popup_area);
}

/// Render the error popup
pub fn render_error_popup(f: &mut Frame, app: &App, error: &str) {
    let theme = &app.theme;
    let area = f.area();
    let popup_width = (area.width * 60 / 100).max(40).min(area.width.saturating_sub(4));
    let popup_area = centered_rect(popup_width, 7, area);

    f.render_widget(Clear, popup_area);

    let error_paragraph = Paragraph::new(error)
        .style(Style::default().fg(theme.fg))
        .block(
            Block::default()
                .title(" Error ")
                .title_style(Style::default().fg(theme.error).bold())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(error_paragraph, popup_area);
}

/// Render the listing detail overlay (the "More Info" modal)
pub fn render_detail_popup(f: &mut Frame, app: &App) {
    let Some(listing) = app.selected_listing() else {
        return;
    };
    let theme = &app.theme;
    let area = f.area();
    let popup_width = (area.width * 70 / 100).max(50).min(area.width.saturating_sub(4));
    let popup_height = (area.height * 80 / 100).max(18).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let heading = Style::default().fg(theme.accent).bold();
    let body = Style::default().fg(theme.fg);
    let muted = Style::default().fg(theme.muted);

    let mut lines: Vec<Line> = Vec::new();

    if listing.is_recently_updated(chrono::Local::now().date_naive()) {
        lines.push(Line::styled(
            "Updated recently",
            Style::default().fg(theme.badge).bold(),
        ));
        lines.push(Line::raw(""));
    }

    lines.push(Line::styled(listing.description.clone(), body));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Eligibility: ", heading),
        Span::styled(listing.eligibility.clone(), body),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Documents Required: ", heading),
        Span::styled(listing.documents_required.join(", "), body),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Department: ", heading),
        Span::styled(listing.department.clone(), body),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Category: ", heading),
        Span::styled(listing.category.clone(), body),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Estimated Time: ", heading),
        Span::styled(listing.estimated_time.clone(), body),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Last Updated: ", heading),
        Span::styled(listing.last_updated.clone(), body),
    ]));
    if listing.state_specific {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", icons::STATE_BADGE), Style::default().fg(theme.badge)),
            Span::styled("State-specific service", muted),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled("Tags (press number to filter):", heading));
    for (i, tag) in listing.tags.iter().take(9).enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", i + 1), Style::default().fg(theme.accent)),
            Span::styled(tag.clone(), Style::default().fg(theme.badge)),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", icons::LINK), Style::default().fg(theme.accent)),
        Span::styled(listing.link.clone(), muted),
    ]));
    lines.push(Line::raw(""));
    lines.push(
        Line::from(vec![
            Span::styled("o", Style::default().fg(theme.accent)),
            Span::styled(" open link  ", muted),
            Span::styled("b", Style::default().fg(theme.accent)),
            Span::styled(" bookmark  ", muted),
            Span::styled("esc", Style::default().fg(theme.accent)),
            Span::styled(" close", muted),
        ])
        .centered(),
    );

    let bookmark = if app.is_bookmarked(&listing.title) {
        format!(" {} ", icons::BOOKMARK_ON)
    } else {
        String::new()
    };
    let detail = Paragraph::new(lines)
        .block(
            Block::default()
                .title(format!(" {}{}", truncate_string(&listing.title, 60), bookmark))
                .title_style(Style::default().fg(theme.accent).bold())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(detail, popup_area);
}

/// Render the category single-choice popup
pub fn render_category_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let choices = app.category_choices();
    let area = f.area();
    let popup_area = centered_rect(42, choices.len() as u16 + 4, area);

    f.render_widget(Clear, popup_area);

    let current = app.filter.category.as_deref().unwrap_or("All Categories");
    let lines: Vec<Line> = choices
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            let marker = if *cat == current {
                icons::RADIO_ON
            } else {
                icons::RADIO_OFF
            };
            let style = if i == app.category_cursor {
                Style::default().fg(theme.fg).bg(theme.highlight_bg).bold()
            } else {
                Style::default().fg(theme.fg)
            };
            Line::styled(
                format!(" {} {} ({})", marker, cat, app.category_count(cat)),
                style,
            )
        })
        .collect();

    let mut content = lines;
    content.push(Line::raw(""));
    content.push(
        Line::from(vec![
            Span::styled("⏎", Style::default().fg(theme.accent)),
            Span::styled(" select  ", Style::default().fg(theme.muted)),
            Span::styled("esc", Style::default().fg(theme.accent)),
            Span::styled(" close", Style::default().fg(theme.muted)),
        ])
        .centered(),
    );

    let popup = Paragraph::new(content).block(
        Block::default()
            .title(" Categories ")
            .title_style(Style::default().fg(theme.accent).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );

    f.render_widget(popup, popup_area);
}

/// Render the departments multi-select popup with its filter input
pub fn render_departments_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let choices = app.department_choices();
    let area = f.area();
    let popup_height = (choices.len() as u16 + 6).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(52, popup_height, area);

    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(theme.muted)),
            Span::styled(&app.department_search, Style::default().fg(theme.fg)),
            Span::styled(icons::CURSOR, Style::default().fg(theme.accent)),
        ]),
        Line::raw(""),
    ];

    if choices.is_empty() {
        lines.push(Line::styled(
            " No departments to filter",
            Style::default().fg(theme.muted),
        ));
    }
    for (i, dept) in choices.iter().enumerate() {
        let marker = if app.filter.departments.contains(dept) {
            icons::CHECK_ON
        } else {
            icons::CHECK_OFF
        };
        let style = if i == app.departments_cursor {
            Style::default().fg(theme.fg).bg(theme.highlight_bg).bold()
        } else {
            Style::default().fg(theme.fg)
        };
        lines.push(Line::styled(
            format!(
                " {} {} ({})",
                marker,
                truncate_string(dept, 36),
                app.department_count(dept)
            ),
            style,
        ));
    }

    lines.push(Line::raw(""));
    lines.push(
        Line::from(vec![
            Span::styled("space", Style::default().fg(theme.accent)),
            Span::styled(" toggle  ", Style::default().fg(theme.muted)),
            Span::styled("↑/↓", Style::default().fg(theme.accent)),
            Span::styled(" move  ", Style::default().fg(theme.muted)),
            Span::styled("esc", Style::default().fg(theme.accent)),
            Span::styled(" close", Style::default().fg(theme.muted)),
        ])
        .centered(),
    );

    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(" Departments ")
            .title_style(Style::default().fg(theme.accent).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );

    f.render_widget(popup, popup_area);
}

/// Render the tags multi-select popup
pub fn render_tags_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = f.area();
    let popup_height = (app.tags.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup_area = centered_rect(42, popup_height, area);

    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = Vec::new();
    if app.tags.is_empty() {
        lines.push(Line::styled(
            " No tags to filter",
            Style::default().fg(theme.muted),
        ));
    }
    for (i, tag) in app.tags.iter().enumerate() {
        let marker = if app.filter.tags.contains(tag) {
            icons::CHECK_ON
        } else {
            icons::CHECK_OFF
        };
        let style = if i == app.tags_cursor {
            Style::default().fg(theme.fg).bg(theme.highlight_bg).bold()
        } else {
            Style::default().fg(theme.fg)
        };
        lines.push(Line::styled(
            format!(" {} {}", marker, truncate_string(tag, 32)),
            style,
        ));
    }

    lines.push(Line::raw(""));
    lines.push(
        Line::from(vec![
            Span::styled("space", Style::default().fg(theme.accent)),
            Span::styled(" toggle  ", Style::default().fg(theme.muted)),
            Span::styled("esc", Style::default().fg(theme.accent)),
            Span::styled(" close", Style::default().fg(theme.muted)),
        ])
        .centered(),
    );

    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(" Tags ")
            .title_style(Style::default().fg(theme.accent).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    );

    f.render_widget(popup, popup_area);
}
