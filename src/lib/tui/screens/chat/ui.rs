//! Chat UI rendering components

use super::state::{ChatState, EntryRole};
use super::transcript::visible_transcript;
use crate::tui::theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

pub const TITLE: &str = "Expense MCP Chat";
pub const SUBTITLE: &str = "Ask questions about your expenses. Tools run silently.";
pub const INPUT_PLACEHOLDER: &str = "Ask about your expenses…";
pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "Summarize all expenses",
    "What did I spend last month?",
    "Give category-wise totals",
];

/// Static facts shown around the transcript
pub struct ChatInfo<'a> {
    pub provider: &'a str,
    pub model: &'a str,
    pub tools: &'a [&'a str],
}

/// Main chat UI renderer
pub struct ChatUI;

impl ChatUI {
    /// Render the complete chat interface; returns the transcript's max scroll
    pub fn render(frame: &mut Frame, state: &ChatState, info: &ChatInfo<'_>) -> u16 {
        let area = frame.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Body
                Constraint::Length(3), // Input area
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(20)])
            .split(rows[1]);

        Self::render_header(frame, rows[0], state, info);
        Self::render_sidebar(frame, body[0], info);
        let max_scroll = Self::render_messages(frame, body[1], state);
        Self::render_input(frame, rows[2], state);
        Self::render_help_bar(frame, rows[3], state);
        max_scroll
    }

    fn render_header(frame: &mut Frame, area: Rect, state: &ChatState, info: &ChatInfo<'_>) {
        let session_display: String = state.session.id().chars().take(8).collect();

        let mut status = vec![
            Span::styled(" 💬 ", theme::title()),
            Span::styled(TITLE, theme::title()),
            Span::styled("  │ ", theme::rule(false)),
            Span::styled(format!("{}/{}", info.provider, info.model), theme::badge()),
            Span::styled(format!(" │ session {session_display}"), theme::muted()),
        ];
        if state.loading {
            status.push(Span::styled(
                format!(" {} ", SPINNER[state.loading_frame % SPINNER.len()]),
                theme::busy(),
            ));
        }
        if let Some(message) = &state.status_message {
            status.push(Span::styled(format!(" │ {message}"), theme::muted()));
        }

        let lines = vec![
            Line::from(status),
            Line::from(Span::styled(format!(" {SUBTITLE}"), theme::muted())),
        ];
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme::rule(false));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_sidebar(frame: &mut Frame, area: Rect, info: &ChatInfo<'_>) {
        let mut lines = vec![
            Line::from(Span::styled("⚙ MCP Assistant", theme::title())),
            Line::from(Span::styled(
                "Interact with your expense summarizer using natural language.",
                theme::text(),
            )),
            Line::from(""),
            Line::from(Span::styled("Examples", theme::heading())),
        ];
        lines.extend(
            EXAMPLE_PROMPTS
                .iter()
                .map(|example| Line::from(Span::styled(format!("• {example}"), theme::example()))),
        );
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Tools", theme::heading())));
        if info.tools.is_empty() {
            lines.push(Line::from(Span::styled("(none discovered)", theme::muted())));
        } else {
            lines.extend(
                info.tools
                    .iter()
                    .map(|tool| Line::from(Span::styled(format!("• {tool}"), theme::muted()))),
            );
        }

        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(theme::rule(false));
        let para = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(para, area);
    }

    /// Render messages area
    fn render_messages(frame: &mut Frame, area: Rect, state: &ChatState) -> u16 {
        let inner_height = area.height as usize;
        let mut lines: Vec<Line> = Vec::new();

        for entry in visible_transcript(state) {
            let prefix = match entry.role {
                EntryRole::User => "You: ",
                EntryRole::Assistant => "AI: ",
                EntryRole::Error => "Error: ",
            };
            let style = theme::speaker(entry.role);
            let stamp = entry
                .timestamp
                .map(|at| format!("[{}] ", at.format("%H:%M:%S")))
                .unwrap_or_default();

            let mut content_lines = entry.content.lines();
            let first = content_lines.next().unwrap_or_default().to_string();
            lines.push(Line::from(vec![
                Span::styled(stamp, theme::muted()),
                Span::styled(prefix, style),
                Span::raw(first),
            ]));
            let indent = " ".repeat(prefix.len());
            for line in content_lines {
                lines.push(Line::from(format!("{indent}{line}")));
            }
            lines.push(Line::from(""));
        }

        if state.loading {
            lines.push(Line::from(Span::styled(
                format!("AI: {} Thinking...", SPINNER[state.loading_frame % SPINNER.len()]),
                theme::busy(),
            )));
        }

        let max_scroll = lines.len().saturating_sub(inner_height).min(u16::MAX as usize) as u16;
        let scroll = state.scroll_offset.min(max_scroll);

        let para = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));
        frame.render_widget(para, area.inner(Margin::new(1, 0)));
        max_scroll
    }

    fn render_input(frame: &mut Frame, area: Rect, state: &ChatState) {
        let (display_input, style) = if state.loading {
            ("Waiting for response...".to_string(), theme::muted())
        } else if state.input.is_empty() {
            (INPUT_PLACEHOLDER.to_string(), theme::muted())
        } else {
            let mut chars: Vec<char> = state.input.chars().collect();
            if state.cursor_pos >= chars.len() {
                chars.push('_');
            } else {
                chars.insert(state.cursor_pos, '|');
            }
            (chars.into_iter().collect(), theme::text())
        };

        let input_line = Line::from(vec![
            Span::styled("> ", theme::speaker(EntryRole::User)),
            Span::styled(display_input, style),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::rule(!state.loading))
            .title(" Message ");

        frame.render_widget(Paragraph::new(input_line).block(block), area);
    }

    fn render_help_bar(frame: &mut Frame, area: Rect, state: &ChatState) {
        let help_text = if state.loading {
            Line::from(vec![
                Span::styled(" Processing... Please wait ", theme::busy()),
                Span::styled("Ctrl+C", theme::key(true)),
                Span::raw(": Exit "),
            ])
        } else {
            Line::from(vec![
                Span::styled(" Enter", theme::key(false)),
                Span::raw(": Send │ "),
                Span::styled("PageUp/Down", theme::key(false)),
                Span::raw(": Scroll │ "),
                Span::styled("Esc", theme::key(true)),
                Span::raw(": Clear/Exit │ "),
                Span::styled("Ctrl+C", theme::key(true)),
                Span::raw(": Exit │ "),
                Span::styled("Tip: ask for summaries or totals", theme::muted()),
            ])
        };

        frame.render_widget(Paragraph::new(help_text), area);
    }
}
