use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::config::AppConfig;
use crate::form::{ContactForm, Field, Submission};

/// How long a status message stays in the info line
const STATUS_TIMEOUT_SECS: u64 = 3;

/// Which control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input(Field),
    Submit,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Input(Field::FirstName),
        Focus::Input(Field::LastName),
        Focus::Input(Field::Email),
        Focus::Input(Field::Message),
        Focus::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let pos = self.position();
        Self::ORDER[pos.checked_sub(1).unwrap_or(Self::ORDER.len() - 1)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    Help,
}

pub struct App {
    pub form: ContactForm,
    pub focus: Focus,
    pub popup: Popup,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
    pub status_ok: bool, // Outcome of the action that set the message

    pub config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            form: ContactForm::new(),
            focus: Focus::Input(Field::FirstName),
            popup: Popup::None,
            status_message: None,
            status_message_time: None,
            status_ok: true,
            config,
        }
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>, ok: bool) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
        self.status_ok = ok;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.popup == Popup::Help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) | KeyCode::Char('q')) {
                self.popup = Popup::None;
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::F(1) => self.popup = Popup::Help,
            KeyCode::F(2) => self.submit(),
            KeyCode::Enter => match self.focus {
                Focus::Submit => self.submit(),
                Focus::Input(_) => self.focus = self.focus.next(),
            },
            KeyCode::Backspace => self.edit_focused(|value| {
                value.pop();
            }),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_focused(String::clear)
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_focused(|value| value.push(c))
            }
            _ => {}
        }
    }

    /// Apply `edit` to the focused input and hand the result to the form
    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        let Focus::Input(field) = self.focus else {
            return;
        };
        let mut value = self.form.value(field).to_string();
        edit(&mut value);
        self.form.on_field_change(field, value);
    }

    pub fn submit(&mut self) {
        match self.form.on_submit().cloned() {
            Some(submission) => {
                self.set_status("Submitted", true);
                if self.config.notifications {
                    notify_submitted(&submission);
                }
            }
            None => {
                let count = self.form.error_count();
                let noun = if count == 1 { "error" } else { "errors" };
                self.set_status(format!("Fix {} {} before submitting", count, noun), false);
            }
        }
    }

    pub fn tick(&mut self) {
        // Clear status message after timeout
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_TIMEOUT_SECS {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }
}

fn notify_submitted(submission: &Submission) {
    let values = submission.values();
    let result = notify_rust::Notification::new()
        .summary("Contact Form")
        .body(&format!("Submitted by {} {}", values.first_name, values.last_name))
        .icon("mail-send")
        .show();

    if let Err(e) = result {
        tracing::warn!("Failed to show notification: {}", e);
    }
}
