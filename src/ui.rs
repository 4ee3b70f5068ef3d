use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::menu::LinkTarget;
use crate::navigator::ViewRow;
use crate::router::component_pathname;
use crate::theme::{get_theme, Theme};

pub fn draw(frame: &mut Frame, app: &App) {
    let theme = get_theme();

    let status_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(app.config.layout.sidebar_width),
            Constraint::Min(0),
        ])
        .split(status_chunks[0]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(chunks[0]);

    draw_header(frame, app, &theme, sidebar_chunks[0]);
    draw_search_input(frame, app, &theme, sidebar_chunks[1]);
    draw_menu(frame, app, &theme, sidebar_chunks[2]);
    draw_content(frame, app, &theme, chunks[1]);
    draw_status_bar(frame, app, &theme, status_chunks[1]);
}

fn draw_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let catalog = app.navigator.catalog();
    let header = Line::from(vec![
        Span::styled(
            catalog.title.clone(),
            Style::default()
                .fg(theme.header_title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            catalog.version.clone(),
            Style::default().fg(theme.header_version),
        ),
    ]);

    let paragraph = Paragraph::new(header)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(theme.sidebar_border)))
        .style(Style::default().bg(theme.sidebar_bg).fg(theme.sidebar_fg));
    frame.render_widget(paragraph, area);
}

fn draw_search_input(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let is_active = app.ui.focus == Focus::Search;
    let border_style = if is_active {
        Style::default().fg(theme.filter_focused_border)
    } else {
        Style::default().fg(theme.sidebar_border)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    let query = app.navigator.query();
    let text = if query.is_empty() {
        Span::styled(
            format!(
                "Press \"{}\" to find a component",
                app.config.keybindings.focus_search
            ),
            Style::default().fg(theme.filter_placeholder),
        )
    } else {
        Span::styled(query.to_string(), Style::default().fg(theme.filter_text))
    };

    let line = Line::from(vec![
        Span::styled("⌕ ", Style::default().fg(theme.filter_icon)),
        text,
    ]);

    let paragraph = Paragraph::new(line)
        .block(block)
        .style(Style::default().bg(theme.sidebar_bg));
    frame.render_widget(paragraph, area);

    if is_active && area.width > 2 && area.height > 2 {
        frame.set_cursor_position(Position::new(search_cursor_x(area, query), area.y + 1));
    }
}

/// Column just past the query, kept inside the input's right border.
fn search_cursor_x(area: Rect, query: &str) -> u16 {
    // Border + icon + space, then the query in display cells.
    let query_width = u16::try_from(Line::raw(query).width()).unwrap_or(u16::MAX);
    let offset = 3u16.saturating_add(query_width);
    let right_edge = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(offset).min(right_edge)
}

fn draw_menu(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let location = app.router.location();
    let menu_focused = app.ui.focus == Focus::Menu;

    let mut rows: Vec<ListItem<'static>> = Vec::new();
    let mut cursor_row = None;
    let mut item_index = 0usize;

    let mut push_item = |rows: &mut Vec<ListItem<'static>>, line: Line<'static>, is_active: bool| {
        let mut style = Style::default().fg(theme.sidebar_fg);
        if is_active {
            style = style
                .bg(theme.link_active_bg)
                .fg(theme.link_active_fg)
                .add_modifier(Modifier::BOLD);
        }
        if menu_focused && item_index == app.ui.menu_cursor {
            cursor_row = Some(rows.len());
        }
        item_index += 1;
        rows.push(ListItem::new(line).style(style));
    };

    let links = app.links();
    if !links.is_empty() {
        rows.push(heading_item("Getting Started", theme));
        for link in links {
            let (line, is_active) = match &link.target {
                LinkTarget::Internal(path) => (
                    Line::from(format!("  {}", link.label)),
                    path == location,
                ),
                LinkTarget::External(_) => (
                    Line::from(vec![
                        Span::raw(format!("  {} ", link.label)),
                        Span::styled("↗", Style::default().fg(theme.link_external)),
                    ]),
                    false,
                ),
            };
            push_item(&mut rows, line, is_active);
        }
    }

    let view = app.navigator.view_model(app.config.layout.hide_empty_groups);
    let arrows_label = if view.show_arrows { "↕ or Enter" } else { "Enter" };
    let no_matches = view.is_filtering && view.rows.is_empty();

    for row in view.rows {
        match row {
            ViewRow::Heading(heading) => rows.push(heading_item(&heading, theme)),
            ViewRow::Entry { entry, is_selected } => {
                let is_active = component_pathname(entry) == location;
                let line = if is_selected {
                    Line::from(vec![
                        Span::styled(
                            format!("  {} ", entry.display_name),
                            Style::default()
                                .fg(theme.candidate_selected_fg)
                                .bg(theme.candidate_selected_bg)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!(" {} ", arrows_label),
                            Style::default()
                                .fg(theme.selected_label_fg)
                                .bg(theme.selected_label_bg),
                        ),
                    ])
                } else {
                    Line::from(format!("  {}", entry.display_name))
                };
                push_item(&mut rows, line, is_active);
            }
        }
    }

    if no_matches {
        rows.push(ListItem::new(Line::from(Span::styled(
            "  No matching components",
            Style::default().fg(theme.filter_placeholder),
        ))));
    }

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.sidebar_border));

    let list = List::new(rows)
        .block(block)
        .style(Style::default().bg(theme.sidebar_bg))
        .highlight_style(Style::default().bg(theme.menu_cursor_bg).add_modifier(Modifier::REVERSED))
        .highlight_symbol("");

    let mut list_state = ListState::default();
    list_state.select(cursor_row);
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn heading_item(text: &str, theme: &Theme) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(theme.section_heading)
            .add_modifier(Modifier::BOLD),
    )))
}

fn draw_content(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Docs ");

    if app.ui.is_loading {
        let paragraph = Paragraph::new("Loading catalog...")
            .block(block)
            .style(Style::default().fg(theme.filter_placeholder));
        frame.render_widget(paragraph, area);
        return;
    }

    let page = app.current_page();
    let mut lines = vec![
        Line::from(Span::styled(
            page.title,
            Style::default()
                .fg(theme.content_title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(
        page.lines
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.content_text)))),
    );

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let status_text = if app.ui.is_loading {
        format!("Loading... | {}", app.ui.status_message)
    } else {
        app.ui.status_message.clone()
    };

    let help_text = match app.ui.focus {
        Focus::Search => "Type to filter | ↑↓: Select | Enter: Open | Esc: Clear".to_string(),
        Focus::Menu => "↑↓: Move | Enter: Open | Esc/Tab: Leave menu".to_string(),
        Focus::Body => format!(
            "{}: Search | Tab: Menu | Backspace: Back | {}: Quit",
            app.config.keybindings.focus_search, app.config.keybindings.quit
        ),
    };

    let status_line = Line::from(vec![
        Span::styled(status_text, Style::default().fg(theme.status_bar_fg)),
        Span::raw(" | "),
        Span::styled(help_text, Style::default().fg(theme.status_help_text)),
    ]);

    let paragraph = Paragraph::new(status_line).style(Style::default().bg(theme.status_bar_bg));
    frame.render_widget(paragraph, area);
}
