mod components;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus, Popup};
use crate::form::{Field, FormStatus};
use crate::theme::Theme;

// Colors are fixed for the lifetime of the process
static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme used for drawing. Only the first call has an effect.
pub fn set_theme(theme: Theme) {
    let _ = THEME.set(theme);
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

fn accent() -> Color { theme().accent }
fn danger() -> Color { theme().danger }
fn success() -> Color { theme().success }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn inactive() -> Color { theme().inactive }
fn header() -> Color { theme().header }

/// Rows taken by one input: bordered box plus its error line
const FIELD_HEIGHT: u16 = 4;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let summary_height = app
        .form
        .submitted()
        .map(|s| s.summary_lines().len() as u16 + 2)
        .unwrap_or(0);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                       // Header
            Constraint::Length(1),                       // Info line
            Constraint::Length(FIELD_HEIGHT * 4),        // Inputs
            Constraint::Length(3),                       // Submit
            Constraint::Length(summary_height),          // Summary
            Constraint::Min(0),
            Constraint::Length(1),                       // Footer
        ])
        .split(area);

    draw_header(f, chunks[0]);
    draw_info_line(f, app, chunks[1]);
    draw_fields(f, app, chunks[2]);
    draw_submit(f, app, chunks[3]);
    draw_summary(f, app, chunks[4]);
    draw_footer(f, chunks[6]);

    if app.popup == Popup::Help {
        draw_help_popup(f);
    }
}

fn draw_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Contact Form",
        Style::default().fg(header()).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.status_message {
        Some(ref status) => {
            let color = if app.status_ok { success() } else { danger() };
            Line::from(Span::styled(status.as_str(), Style::default().fg(color)))
        }
        None => {
            let idle = match app.form.status() {
                FormStatus::Editing => "Ready",
                FormStatus::Submitted => "Edits apply on the next submit",
            };
            Line::from(Span::styled(idle, Style::default().fg(text_dim())))
        }
    };
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_fields(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(FIELD_HEIGHT); 4])
        .split(area);

    for (field, row) in Field::ALL.into_iter().zip(rows.iter()) {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(*row);

        let focused = app.focus == Focus::Input(field);
        let input = components::field_input(field, app.form.value(field), focused, parts[0].width);
        f.render_widget(input, parts[0]);

        if let Some(err) = app.form.error(field) {
            let error = Paragraph::new(Line::from(Span::styled(
                format!(" {}", err),
                Style::default().fg(danger()),
            )));
            f.render_widget(error, parts[1]);
        }
    }
}

fn draw_submit(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Submit;
    let (border, label_style) = if focused {
        (accent(), Style::default().fg(success()).add_modifier(Modifier::BOLD | Modifier::REVERSED))
    } else {
        (inactive(), Style::default().fg(success()))
    };

    let button = Paragraph::new(Line::from(Span::styled(" Submit ", label_style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    f.render_widget(button, area);
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let Some(submission) = app.form.submitted() else {
        return;
    };

    let lines: Vec<Line> = submission
        .summary_lines()
        .into_iter()
        .map(|line| Line::styled(line, Style::default().fg(text())))
        .collect();

    let summary = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(Span::styled(" You Submitted ", Style::default().fg(success())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(success())),
        );
    f.render_widget(summary, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let hints = [
        ("Tab", "Next"),
        ("S-Tab", "Prev"),
        ("F2", "Submit"),
        ("^U", "Clear"),
        ("F1", "Help"),
        ("Esc", "Quit"),
    ];

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else { hints.len() };

    let spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn draw_help_popup(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 30 { 90 } else { 60 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let key_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), Style::default().fg(accent())),
            Span::raw(desc),
        ])
    };
    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(header()).add_modifier(Modifier::BOLD)))
    };

    let help_text = vec![
        section("═══ Navigation ═══"),
        key_line("Tab/↓", "Next field"),
        key_line("S-Tab/↑", "Previous field"),
        key_line("Enter", "Next field, or submit on the button"),
        Line::from(""),
        section("═══ Editing ═══"),
        key_line("Backspace", "Delete last character"),
        key_line("Ctrl+U", "Clear field"),
        key_line("F2", "Submit from anywhere"),
        Line::from(""),
        section("═══ Rules ═══"),
        Line::from("  First Name needs at least 5 characters"),
        Line::from("  Last Name is required"),
        Line::from("  Email must look like name@example.com"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(text_dim())),
            Span::styled("Esc", Style::default().fg(accent())),
            Span::styled(" to close", Style::default().fg(text_dim())),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" Contact Form Help ", Style::default().fg(accent())))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_to_string(buf: &Buffer) -> String {
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 34)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn fill(app: &mut App, first: &str, last: &str, email: &str, message: &str) {
        app.form.on_field_change(Field::FirstName, first);
        app.form.on_field_change(Field::LastName, last);
        app.form.on_field_change(Field::Email, email);
        app.form.on_field_change(Field::Message, message);
    }

    #[test]
    fn test_renders_header_and_labels() {
        let app = App::new(AppConfig::default());
        let output = render(&app);

        assert!(output.contains("Contact Form"));
        assert!(output.contains("First Name*"));
        assert!(output.contains("Last Name*"));
        assert!(output.contains("Email*"));
        assert!(output.contains("Message"));
        assert!(output.contains("Submit"));
        assert!(!output.contains("must"), "a fresh form shows no errors");
    }

    #[test]
    fn test_renders_short_first_name_error() {
        let mut app = App::new(AppConfig::default());
        app.form.on_field_change(Field::FirstName, "four");
        let output = render(&app);

        assert!(output.contains("firstName must have at least 5 characters."));
        assert!(!output.contains("lastName is a required field."));
        assert!(!output.contains("email must be a valid email address."));
    }

    #[test]
    fn test_renders_three_errors_on_empty_submit() {
        let mut app = App::new(AppConfig::default());
        app.submit();
        let output = render(&app);

        assert!(output.contains("firstName must have at least 5 characters."));
        assert!(output.contains("lastName is a required field."));
        assert!(output.contains("email must be a valid email address."));
        assert!(!output.contains("You Submitted"));
    }

    #[test]
    fn test_renders_summary_without_message() {
        let mut app = App::new(AppConfig::default());
        fill(&mut app, "William", "Ward", "email@email.com", "");
        app.submit();
        let output = render(&app);

        assert!(output.contains("You Submitted"));
        assert!(output.contains("First Name: William"));
        assert!(output.contains("Last Name: Ward"));
        assert!(output.contains("Email: email@email.com"));
        assert!(!output.contains("Message:"));
    }

    #[test]
    fn test_renders_summary_with_message() {
        let mut app = App::new(AppConfig::default());
        fill(&mut app, "Geezer", "Butler", "geezer@sabbath.com", "Iron Man");
        app.submit();
        let output = render(&app);

        assert!(output.contains("Message: Iron Man"));
    }

    #[test]
    fn test_help_popup() {
        let mut app = App::new(AppConfig::default());
        app.popup = Popup::Help;
        let output = render(&app);

        assert!(output.contains("Contact Form Help"));
        assert!(output.contains("Clear field"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = App::new(AppConfig::default());
        fill(&mut app, "William", "Ward", "email@email.com", "hi");
        app.submit();

        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
