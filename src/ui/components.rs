//! Reusable UI component helpers

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::{accent, header, inactive, text, text_dim};
use crate::form::Field;

/// A bordered single-line text input titled with the field label.
/// Required fields get a `*` after the label.
pub fn field_input(field: Field, value: &str, focused: bool, width: u16) -> Paragraph<'static> {
    let marker = if field.is_required() { "*" } else { "" };
    let title_style = if focused {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(header())
    };
    let border_color = if focused { accent() } else { inactive() };

    // Two columns for the borders, one for the cursor
    let room = usize::from(width.saturating_sub(3));

    let line = if value.is_empty() && !focused {
        Line::from(Span::styled(field.placeholder().to_string(), Style::default().fg(text_dim())))
    } else {
        let mut spans = vec![Span::styled(visible_tail(value, room), Style::default().fg(text()))];
        if focused {
            spans.push(Span::styled("_", Style::default().fg(accent())));
        }
        Line::from(spans)
    };

    Paragraph::new(line).block(
        Block::default()
            .title(Span::styled(format!(" {}{} ", field.label(), marker), title_style))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    )
}

/// Last `max` characters of `value`, so the end being typed stays visible
pub fn visible_tail(value: &str, max: usize) -> String {
    let count = value.chars().count();
    value.chars().skip(count.saturating_sub(max)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_tail() {
        assert_eq!(visible_tail("email@email.com", 5), "l.com");
        assert_eq!(visible_tail("short", 10), "short");
        assert_eq!(visible_tail("anything", 0), "");
    }
}
