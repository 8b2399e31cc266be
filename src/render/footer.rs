//! Keymap help bar and status line.

use crate::style::StyleContext;
use crate::viewer::{Command, Keymap};
use crossterm::event::KeyCode;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

/// Commands listed in the help bar, in display order.
const HELP_ORDER: [Command; 5] = [
    Command::Retreat,
    Command::Advance,
    Command::SwitchDataset,
    Command::CopyFrame,
    Command::Quit,
];

const ARROWS: [(KeyCode, char); 4] = [
    (KeyCode::Left, '←'),
    (KeyCode::Right, '→'),
    (KeyCode::Up, '↑'),
    (KeyCode::Down, '↓'),
];

/// Compact label for the keys bound to one command, e.g. `hj/←↓`.
fn keys_label(mut keys: Vec<KeyCode>) -> String {
    let mut letters: Vec<char> = keys
        .iter()
        .filter_map(|code| match code {
            KeyCode::Char(c) => Some(*c),
            _ => None,
        })
        .collect();
    letters.sort_unstable();
    let arrows: String = ARROWS
        .iter()
        .filter(|(code, _)| keys.contains(code))
        .map(|(_, glyph)| *glyph)
        .collect();
    keys.retain(|code| !matches!(code, KeyCode::Char(_)) && !ARROWS.iter().any(|(a, _)| a == code));
    let mut named: Vec<String> = keys
        .iter()
        .map(|code| match code {
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            other => format!("{:?}", other),
        })
        .collect();
    named.sort();

    let mut parts = Vec::new();
    if !letters.is_empty() {
        parts.push(letters.into_iter().collect::<String>());
    }
    if !arrows.is_empty() {
        parts.push(arrows);
    }
    parts.extend(named);
    parts.join("/")
}

/// Help text built from the keymap; the dataset switch is listed only when
/// there is a second dataset.
pub fn keymap_text(keymap: &Keymap, can_switch: bool) -> String {
    HELP_ORDER
        .iter()
        .filter(|command| can_switch || **command != Command::SwitchDataset)
        .filter_map(|command| {
            let keys = keymap.keys_for(*command);
            (!keys.is_empty()).then(|| format!("{}:{}", keys_label(keys), command.name()))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Draw the keymap help bar.
pub(super) fn draw_keymap(f: &mut Frame<'_>, area: Rect, keymap: &Keymap, can_switch: bool, style: &StyleContext) {
    let paragraph =
        Paragraph::new(keymap_text(keymap, can_switch)).style(Style::default().fg(style.text).bg(style.bar_bg));
    f.render_widget(paragraph, area);
}

/// Draw the status bar.
pub(super) fn draw_status(f: &mut Frame<'_>, area: Rect, text: &str, style: &StyleContext) {
    let paragraph = Paragraph::new(text.to_string()).style(Style::default().fg(style.text).bg(style.bar_bg));
    f.render_widget(paragraph, area);
}
