use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, Focus, LineStyle};

pub fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[0]);

    draw_index(f, app, chunks[0]);
    draw_text(f, app, chunks[1]);

    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("Tab: Switch panel | "),
        Span::raw("↑/↓: Move | "),
        Span::raw("Enter: Jump | Space: Toggle | →/←: Expand/Collapse"),
    ]);
    f.render_widget(Paragraph::new(help), rows[1]);
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn draw_index(f: &mut Frame, app: &mut App, area: ratatui::layout::Rect) {
    let items: Vec<ListItem> = app
        .rows
        .iter()
        .map(|row| {
            let indent = "  ".repeat(row.level);
            let marker = match (row.has_children, row.expanded) {
                (false, _) => "• ",
                (true, true) => "▼ ",
                (true, false) => "▶ ",
            };
            let name = &app.novel.doc.index.get(row.id).name;
            ListItem::new(Line::from(format!("{indent}{marker}{name}")))
        })
        .collect();

    let list = List::new(items)
        .block(panel("索引", app.focus == Focus::Index))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, area, &mut app.index_state);
}

fn draw_text(f: &mut Frame, app: &mut App, area: ratatui::layout::Rect) {
    // Borders take one column on each side
    app.set_wrap_width(usize::from(area.width.saturating_sub(2)));
    let height = usize::from(area.height.saturating_sub(2));

    let lines: Vec<Line> = app
        .lines
        .iter()
        .skip(app.scroll)
        .take(height)
        .map(|line| Line::styled(line.text.as_str(), line_style(line.style)))
        .collect();

    let title = app.title().to_string();
    let text = Paragraph::new(lines).block(panel(&title, app.focus == Focus::Text));
    f.render_widget(text, area);
}

fn line_style(style: LineStyle) -> Style {
    match style {
        LineStyle::Title => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        LineStyle::Heading(0) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        LineStyle::Heading(1) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        LineStyle::Heading(_) => Style::default().fg(Color::Green),
        LineStyle::Body | LineStyle::Blank => Style::default(),
    }
}
