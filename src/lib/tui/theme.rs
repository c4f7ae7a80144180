//! Colours and styles for the chat screen

use super::screens::chat::EntryRole;
use ratatui::style::{Color, Modifier, Style};

pub const TEAL: Color = Color::Rgb(80, 190, 170);
pub const AMBER: Color = Color::Rgb(240, 190, 90);
pub const LEAF: Color = Color::Rgb(140, 205, 120);
pub const CORAL: Color = Color::Rgb(225, 110, 95);
pub const SLATE: Color = Color::Rgb(115, 120, 135);
pub const RULE: Color = Color::Rgb(65, 70, 82);

pub fn title() -> Style {
    Style::new().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::new().fg(SLATE)
}

pub fn text() -> Style {
    Style::new().fg(Color::White)
}

pub fn heading() -> Style {
    text().add_modifier(Modifier::BOLD)
}

pub fn example() -> Style {
    Style::new().fg(TEAL).add_modifier(Modifier::ITALIC)
}

/// Provider/model badge in the header
pub fn badge() -> Style {
    Style::new().fg(Color::Black).bg(TEAL)
}

/// Pane separators; `focused` highlights the input box while it accepts text
pub fn rule(focused: bool) -> Style {
    Style::new().fg(if focused { TEAL } else { RULE })
}

pub fn busy() -> Style {
    Style::new().fg(AMBER)
}

/// Label style for a transcript line
pub fn speaker(role: EntryRole) -> Style {
    match role {
        EntryRole::User => Style::new().fg(TEAL).add_modifier(Modifier::BOLD),
        EntryRole::Assistant => Style::new().fg(LEAF),
        EntryRole::Error => Style::new().fg(CORAL).add_modifier(Modifier::BOLD),
    }
}

/// Key name in the help bar; `exits` marks keys that leave or discard
pub fn key(exits: bool) -> Style {
    Style::new().fg(if exits { CORAL } else { LEAF })
}
