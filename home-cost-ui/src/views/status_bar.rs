//! Status bar for displaying keyboard shortcuts.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Keyboard shortcut hint for the status bar.
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(
        key: &'static str,
        action: &'static str,
    ) -> Self {
        Self { key, action }
    }
}

/// Build a status line from a list of key hints.
pub fn status_line(hints: &[KeyHint]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(": {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Key hints shown on the calculator screen.
pub mod hints {
    use super::KeyHint;

    pub const TAB: KeyHint = KeyHint::new("Tab", "Next");
    pub const SHIFT_TAB: KeyHint = KeyHint::new("S-Tab", "Prev");
    pub const ARROWS: KeyHint = KeyHint::new("←/→", "Move");
    pub const PAGE: KeyHint = KeyHint::new("PgUp/PgDn", "Cash ±5%");
    pub const QUIT: KeyHint = KeyHint::new("Esc/C-q", "Quit");

    pub const CALCULATOR: &[KeyHint] = &[TAB, SHIFT_TAB, ARROWS, PAGE, QUIT];
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn status_line_joins_hints() {
        let line = status_line(&[hints::TAB, hints::QUIT]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        assert_eq!(text, "Tab: Next | Esc/C-q: Quit");
    }
}
