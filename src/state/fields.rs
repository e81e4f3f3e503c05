//! Contact form field values

use serde::{Deserialize, Serialize};

/// The three fields collected by the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Name,
    Email,
    Message,
}

impl FieldName {
    /// Label shown above the input box
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Name => "Name",
            FieldName::Email => "Email",
            FieldName::Message => "Message",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, FieldName::Message)
    }
}

/// Values typed into the form so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: FieldName) -> &mut String {
        match field {
            FieldName::Name => &mut self.name,
            FieldName::Email => &mut self.email,
            FieldName::Message => &mut self.message,
        }
    }

    pub fn set(&mut self, field: FieldName, value: String) {
        *self.get_mut(field) = value;
    }
}

/// Flat mapping handed to the mailer.
///
/// Serializes to exactly `user_name`, `user_email` and `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub user_name: String,
    pub user_email: String,
    pub message: String,
}

impl From<&ContactFields> for TemplateParams {
    fn from(fields: &ContactFields) -> Self {
        Self {
            user_name: fields.name.clone(),
            user_email: fields.email.clone(),
            message: fields.message.clone(),
        }
    }
}
