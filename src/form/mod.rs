pub mod validate;

use serde::Serialize;
use std::collections::BTreeMap;

pub use validate::{validate, FieldError};

/// Form inputs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::FirstName, Field::LastName, Field::Email, Field::Message];

    /// Fields that must pass validation before a submit goes through
    pub const REQUIRED: [Field; 3] = [Field::FirstName, Field::LastName, Field::Email];

    /// Label shown next to the input (and in the summary)
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::FirstName => "Edd",
            Field::LastName => "Burke",
            Field::Email => "bluebill1049@hotmail.com",
            Field::Message => "",
        }
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

impl FormState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }
}

/// Snapshot of the values taken at the last successful submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission(pub FormState);

impl Submission {
    /// Lines of the summary block. The message line is left out when no
    /// message was given.
    pub fn summary_lines(&self) -> Vec<String> {
        Field::ALL
            .iter()
            .filter(|field| **field != Field::Message || !self.0.message.is_empty())
            .map(|field| format!("{}: {}", field.label(), self.0.get(*field)))
            .collect()
    }

    pub fn values(&self) -> &FormState {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitted,
}

/// The contact form: current values, the errors they produce, and the last
/// submission.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    values: FormState,
    errors: BTreeMap<Field, FieldError>,
    submitted: Option<Submission>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn values(&self) -> &FormState {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    /// Error currently shown for `field`, if any
    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// All shown errors, in field order
    pub fn errors(&self) -> impl Iterator<Item = FieldError> + '_ {
        self.errors.values().copied()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn submitted(&self) -> Option<&Submission> {
        self.submitted.as_ref()
    }

    pub fn status(&self) -> FormStatus {
        if self.submitted.is_some() {
            FormStatus::Submitted
        } else {
            FormStatus::Editing
        }
    }

    /// Store a new value and re-check only that field.
    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        tracing::debug!(field = ?field, len = value.len(), "field changed");
        *self.values.get_mut(field) = value;
        self.revalidate(field);
    }

    /// Validate every required field. Returns the submission when all of
    /// them pass; otherwise the errors are left on display and the previous
    /// submission (if any) is kept.
    pub fn on_submit(&mut self) -> Option<&Submission> {
        for field in Field::REQUIRED {
            self.revalidate(field);
        }

        if !self.errors.is_empty() {
            tracing::info!(errors = self.errors.len(), "submit rejected");
            return None;
        }

        tracing::info!("form submitted");
        self.submitted = Some(Submission(self.values.clone()));
        self.submitted.as_ref()
    }

    fn revalidate(&mut self, field: Field) {
        match validate(field, self.values.get(field)) {
            Some(err) => {
                self.errors.insert(field, err);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }
}
