use ratatui::layout::Alignment;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};

use crate::theme;

pub(crate) fn wrapped_paragraph<'a, T>(text: T) -> Paragraph<'a>
where
    T: Into<Text<'a>>,
{
    Paragraph::new(text).wrap(Wrap { trim: false })
}

pub(crate) fn key_hint_paragraph<'a, T>(text: T) -> Paragraph<'a>
where
    T: Into<Text<'a>>,
{
    wrapped_paragraph(text).alignment(Alignment::Center)
}

pub(crate) fn key_hint_height(total_width: u16, text: &str) -> u16 {
    let content_width = usize::from(total_width.saturating_sub(2).max(1));
    let lines = text.chars().count().div_ceil(content_width).max(1);
    u16::try_from(lines).unwrap_or(u16::MAX).saturating_add(2).max(3)
}

pub(crate) fn compact_hint<'a>(
    width: u16,
    full: &'a str,
    medium: &'a str,
    compact: &'a str,
) -> &'a str {
    if width >= 110 {
        full
    } else if width >= 78 {
        medium
    } else {
        compact
    }
}

pub(crate) fn focus_line(message: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(message.into(), theme::focus_prompt()))
}

#[cfg(test)]
mod tests {
    use ratatui::style::{Color, Modifier};

    use super::{compact_hint, focus_line, key_hint_height};

    #[test]
    fn compact_hint_selects_variant_by_width() {
        assert_eq!(compact_hint(120, "full", "medium", "compact"), "full");
        assert_eq!(compact_hint(90, "full", "medium", "compact"), "medium");
        assert_eq!(compact_hint(60, "full", "medium", "compact"), "compact");
    }

    #[test]
    fn key_hint_height_is_single_line_when_hint_fits() {
        assert_eq!(key_hint_height(80, "Enter: run    Esc: quit"), 3);
    }

    #[test]
    fn key_hint_height_grows_when_hint_wraps() {
        let height = key_hint_height(20, "Enter: run    Space: stage    Tab: next pane    q: quit");
        assert!(height > 3);
    }

    #[test]
    fn focus_line_uses_blue_bold_style() {
        let line = focus_line("Tests");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content.as_ref(), "Tests");
        assert_eq!(line.spans[0].style.fg, Some(Color::Blue));
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }
}
