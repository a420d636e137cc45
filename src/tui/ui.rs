// UI rendering - draws the shortening form
//
// Layout, top to bottom, centred and capped at FORM_WIDTH columns:
// title, URL field, action hint, result box (only with a result),
// status message, logs panel (optional), key legend.

use super::app::App;
use crate::form::MessageKind;
use crate::logging::LogLevel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Maximum width of the form column
const FORM_WIDTH: u16 = 80;

/// Main UI render function - called on every frame
pub fn draw<B>(f: &mut Frame, app: &App<B>) {
    let theme = &app.theme;
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        f.area(),
    );

    let area = centered_column(f.area(), FORM_WIDTH);
    let result_height = if app.form.has_result() { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // title
            Constraint::Length(3),             // URL field
            Constraint::Length(1),             // action hint
            Constraint::Length(result_height), // result box
            Constraint::Length(3),             // status message
            Constraint::Min(0),                // logs panel / filler
            Constraint::Length(1),             // key legend
        ])
        .split(area);

    render_title(f, chunks[0], app);
    render_input(f, chunks[1], app);
    render_action(f, chunks[2], app);
    if app.form.has_result() {
        render_result(f, chunks[3], app);
    }
    render_message(f, chunks[4], app);
    if app.show_logs {
        render_logs(f, chunks[5], app);
    }
    render_legend(f, chunks[6], app);
}

/// A column of at most `width` cells, horizontally centred in `area`
fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

fn render_title<B>(f: &mut Frame, area: Rect, app: &App<B>) {
    let theme = &app.theme;
    let title = Line::from(vec![
        Span::styled(
            "🔗 shortURL",
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", app.api_url), Style::default().fg(theme.muted)),
    ]);
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), area);
}

fn render_input<B>(f: &mut Frame, area: Rect, app: &App<B>) {
    let theme = &app.theme;
    let border = if app.form.in_flight {
        theme.border
    } else {
        theme.highlight
    };

    let block = Block::default()
        .title(" Enter Long URL ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));

    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_col = app.editor.display_offset(&app.form.input);
    // Scroll horizontally so the cursor stays visible
    let scroll = cursor_col.saturating_sub(inner_width.saturating_sub(1));

    let content = if app.form.input.is_empty() {
        Paragraph::new(Span::styled(
            "e.g., https://www.example.com/very/long/path/to/resource",
            Style::default().fg(theme.muted),
        ))
    } else {
        Paragraph::new(app.form.input.as_str())
            .style(Style::default().fg(theme.foreground))
            .scroll((0, scroll as u16))
    };
    f.render_widget(content.block(block), area);

    if !app.form.in_flight {
        let x = area.x + 1 + (cursor_col - scroll) as u16;
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}

fn render_action<B>(f: &mut Frame, area: Rect, app: &App<B>) {
    let theme = &app.theme;
    let line = if app.form.in_flight {
        // A submit clears the result first, so a result here means a delete
        let doing = if app.form.has_result() {
            "Deleting..."
        } else {
            "Shortening..."
        };
        Line::from(Span::styled(
            format!("{} {}", app.spinner(), doing),
            Style::default().fg(theme.info),
        ))
    } else if app.form.can_submit() {
        Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(theme.highlight)),
            Span::styled("Shorten URL", Style::default().fg(theme.foreground)),
        ])
    } else {
        Line::from(Span::styled(
            "[Enter] Shorten URL",
            Style::default().fg(theme.muted),
        ))
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_result<B>(f: &mut Frame, area: Rect, app: &App<B>) {
    let theme = &app.theme;
    let Some(result) = app.form.result.as_deref() else {
        return;
    };

    let block = Block::default()
        .title(" Your Short URL ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.success));

    let hint_style = if app.form.in_flight {
        Style::default().fg(theme.muted)
    } else {
        Style::default().fg(theme.highlight)
    };

    let lines = vec![
        Line::from(Span::styled(
            result,
            Style::default()
                .fg(theme.link)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(vec![
            Span::styled("[Ctrl+Y] copy", hint_style),
            Span::raw("   "),
            Span::styled("[Ctrl+D] delete", hint_style),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_message<B>(f: &mut Frame, area: Rect, app: &App<B>) {
    let theme = &app.theme;
    let Some(message) = app.form.message.as_ref() else {
        return;
    };

    let color = match message.kind {
        MessageKind::Success => theme.success,
        MessageKind::Error => theme.error,
        MessageKind::Info => theme.info,
    };

    let paragraph = Paragraph::new(message.text.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme.border)),
        );
    f.render_widget(paragraph, area);
}

fn render_logs<B>(f: &mut Frame, area: Rect, app: &App<B>) {
    let theme = &app.theme;
    if area.height < 3 {
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .log_buffer
        .recent(visible)
        .into_iter()
        .map(|entry| {
            let level_color = match entry.level {
                LogLevel::Error => theme.error,
                LogLevel::Warn => theme.info,
                LogLevel::Info => theme.success,
                LogLevel::Debug | LogLevel::Trace => theme.muted,
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(
                    format!("{:<5} ", entry.level.as_str()),
                    Style::default().fg(level_color),
                ),
                Span::styled(entry.message, Style::default().fg(theme.foreground)),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(" Logs ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    f.render_widget(List::new(items).block(block), area);
}

fn render_legend<B>(f: &mut Frame, area: Rect, app: &App<B>) {
    let theme = &app.theme;
    let key = Style::default().fg(theme.highlight);
    let label = Style::default().fg(theme.muted);

    let mut spans = vec![Span::styled("Enter", key), Span::styled(" shorten  ", label)];
    if app.form.has_result() {
        spans.extend([
            Span::styled("^Y", key),
            Span::styled(" copy  ", label),
            Span::styled("^D", key),
            Span::styled(" delete  ", label),
        ]);
    }
    spans.extend([
        Span::styled("^U", key),
        Span::styled(" clear  ", label),
        Span::styled("^L", key),
        Span::styled(" logs  ", label),
        Span::styled("Esc", key),
        Span::styled(" quit", label),
    ]);

    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
