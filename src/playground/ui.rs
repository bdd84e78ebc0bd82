//! UI rendering

use modeterm_core::surface::is_normal_like;
use modeterm_core::{EditorMode, EditorSurface, TerminalIntegration};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::surface::PlaygroundSurface;

pub(crate) const PANE_MIN_HEIGHT: u16 = 5;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const HINT_BAR_HEIGHT: u16 = 1;

const NORMAL_HINT: &str = "i/a:insert  h/l w/b 0/$:move  u:undo  D:kill  p:yank  \
     SPC:keypad  Q:macro  F2:integration  C-q:quit";
const INSERT_HINT: &str = "type to edit  Esc:leave insert  C-q:quit";

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(PANE_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
            Constraint::Length(HINT_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

fn mode_color(mode: EditorMode) -> Color {
    match mode {
        EditorMode::Normal => Color::White,
        EditorMode::Insert => Color::Yellow,
        EditorMode::Keypad => Color::Magenta,
        EditorMode::Motion => Color::Blue,
        EditorMode::Terminal => Color::Cyan,
    }
}

/// Draw the playground UI
pub fn draw(f: &mut Frame, surface: &PlaygroundSurface, integration: &TerminalIntegration) {
    let [pane, status, hint] = split_main_chunks(f.area());
    draw_pane(f, surface, pane);
    draw_status_bar(f, surface, integration, status);
    draw_hint_bar(f, surface, hint);
}

fn draw_pane(f: &mut Frame, surface: &PlaygroundSurface, area: Rect) {
    let visible = area.height.saturating_sub(3) as usize;
    let mut lines: Vec<Line> = Vec::new();

    let (title, cursor) = match surface.session() {
        Some(session) => {
            let scrollback = session.scrollback();
            let skip = scrollback.len().saturating_sub(visible);
            lines.extend(
                scrollback[skip..]
                    .iter()
                    .map(|line| Line::from(Span::raw(line.clone()))),
            );
            let title = format!(" Terminal ({} keys received) ", session.keys_received());
            (title, Some(session.cursor()))
        }
        None => (" Buffer ".to_string(), None),
    };

    let mut prompt = vec![Span::styled("$ ", Style::default().fg(Color::Green))];
    prompt.extend(prompt_spans(surface.text(), surface.point(), cursor));
    lines.push(Line::from(prompt));

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(mode_color(surface.mode())));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the input line with the editor's point reversed and the terminal's
/// cursor underlined.
pub(crate) fn prompt_spans(
    text: &str,
    point: usize,
    cursor: Option<usize>,
) -> Vec<Span<'static>> {
    let len = text.chars().count();
    let cell_style = |idx: usize| {
        let mut style = Style::default();
        if idx == point {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if cursor == Some(idx) {
            style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
        }
        style
    };
    let mut spans: Vec<Span<'static>> = text
        .chars()
        .enumerate()
        .map(|(idx, ch)| Span::styled(ch.to_string(), cell_style(idx)))
        .collect();
    if point >= len || cursor.is_some_and(|c| c >= len) {
        spans.push(Span::styled(" ", cell_style(len)));
    }
    spans
}

fn draw_status_bar(
    f: &mut Frame,
    surface: &PlaygroundSurface,
    integration: &TerminalIntegration,
    area: Rect,
) {
    let mode = surface.mode();
    let integration_info = if integration.is_enabled() {
        format!("terminal integration on ({})", integration.config().policy.name())
    } else {
        "terminal integration off".to_string()
    };
    let macro_info = if surface.is_recording_quick_macro() {
        "  |  recording"
    } else {
        ""
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default()
                .fg(Color::Black)
                .bg(mode_color(mode))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    match surface.status() {
        Some(message) => {
            let style = if message.starts_with("Error") {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Yellow)
            };
            spans.push(Span::styled(message.to_string(), style));
        }
        None => spans.push(Span::styled(
            format!("{}{}", integration_info, macro_info),
            Style::default().fg(Color::DarkGray),
        )),
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_hint_bar(f: &mut Frame, surface: &PlaygroundSurface, area: Rect) {
    let hint = if is_normal_like(surface) {
        NORMAL_HINT
    } else {
        INSERT_HINT
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(paragraph, area);
}
