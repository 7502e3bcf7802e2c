//! Field validation applied before anything is written.
//!
//! Each form field runs through a [`FieldRule`]: trim, then the required
//! check, then the length check. Lengths count characters, not bytes.

use serde::Deserialize;
use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 60;
pub const MAX_YEAR_CHARS: usize = 4;
pub const MAX_NAME_CHARS: usize = 20;

/// Which field failed and why. Only used for logging; users see a
/// generic message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    field: &'static str,
    trim: bool,
    required: bool,
    max_chars: Option<usize>,
}

impl FieldRule {
    #[must_use]
    pub const fn new(field: &'static str) -> Self {
        Self {
            field,
            trim: false,
            required: false,
            max_chars: None,
        }
    }

    #[must_use]
    pub const fn trimmed(mut self) -> Self {
        self.trim = true;
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    /// Returns the normalized value or the first rule it breaks.
    pub fn apply(&self, raw: &str) -> Result<String, ValidationError> {
        let value = if self.trim { raw.trim() } else { raw };

        if self.required && value.is_empty() {
            return Err(ValidationError::Required { field: self.field });
        }

        if let Some(max) = self.max_chars
            && value.chars().count() > max
        {
            return Err(ValidationError::TooLong {
                field: self.field,
                max,
            });
        }

        Ok(value.to_string())
    }
}

const TITLE: FieldRule = FieldRule::new("title")
    .trimmed()
    .required()
    .max_chars(MAX_TITLE_CHARS);

const YEAR: FieldRule = FieldRule::new("year")
    .trimmed()
    .required()
    .max_chars(MAX_YEAR_CHARS);

const NAME: FieldRule = FieldRule::new("name")
    .trimmed()
    .required()
    .max_chars(MAX_NAME_CHARS);

const LOGIN_USERNAME: FieldRule = FieldRule::new("username").trimmed().required();

/// Applied both when a password is set and when it is checked at login.
pub const PASSWORD: FieldRule = FieldRule::new("password").trimmed().required();

/// Submitted movie form. Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MovieInput {
    pub title: String,
    pub year: String,
}

/// A movie form that passed validation; fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidMovie {
    pub title: String,
    pub year: String,
}

impl MovieInput {
    pub fn new(title: impl Into<String>, year: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: year.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidMovie, ValidationError> {
        Ok(ValidMovie {
            title: TITLE.apply(&self.title)?,
            year: YEAR.apply(&self.year)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub name: String,
}

impl ProfileInput {
    pub fn validate(&self) -> Result<String, ValidationError> {
        NAME.apply(&self.name)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Trimmed `(username, password)`; both must be non-empty.
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        Ok((
            LOGIN_USERNAME.apply(&self.username)?,
            PASSWORD.apply(&self.password)?,
        ))
    }
}
