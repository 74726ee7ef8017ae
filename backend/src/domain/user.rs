//! Reviewer accounts and subject assignment.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a positive integer")]
    InvalidId,
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },
    #[error("subject code must not be empty")]
    EmptySubjectCode,
    #[error("subject code must be at most {max} characters")]
    SubjectCodeTooLong { max: usize },
    #[error("subject code may only contain letters, digits, '.', '_' or '-'")]
    SubjectCodeInvalidCharacters,
}

/// Surrogate identifier of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// Validate and wrap a database identifier.
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw database value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i32 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum length of a username.
pub const USERNAME_MAX: usize = 64;

/// Login name of a reviewer, trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Maximum length of a subject code.
pub const SUBJECT_CODE_MAX: usize = 32;

static SUBJECT_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn subject_code_regex() -> &'static Regex {
    SUBJECT_CODE_RE.get_or_init(|| {
        // Length is enforced separately; this regex constrains allowed characters.
        Regex::new("^[A-Za-z0-9._-]+$")
            .unwrap_or_else(|error| panic!("subject code regex failed to compile: {error}"))
    })
}

/// Identifier of an academic subject grouping domains and reviewers.
///
/// The character set is restricted so the code can be embedded in a CSV
/// download file name without escaping.
///
/// # Examples
/// ```
/// use rating_backend::domain::SubjectCode;
///
/// let code = SubjectCode::new("MATH").expect("valid code");
/// assert_eq!(code.as_ref(), "MATH");
/// assert!(SubjectCode::new("no spaces").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubjectCode(String);

impl SubjectCode {
    /// Validate and construct a [`SubjectCode`].
    pub fn new(code: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(UserValidationError::EmptySubjectCode);
        }
        if code.chars().count() > SUBJECT_CODE_MAX {
            return Err(UserValidationError::SubjectCodeTooLong {
                max: SUBJECT_CODE_MAX,
            });
        }
        if !subject_code_regex().is_match(code) {
            return Err(UserValidationError::SubjectCodeInvalidCharacters);
        }
        Ok(Self(code.to_owned()))
    }
}

impl AsRef<str> for SubjectCode {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SubjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SubjectCode {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SubjectCode> for String {
    fn from(value: SubjectCode) -> Self {
        value.0
    }
}

/// Sanitised reviewer profile. Never carries credential material.
///
/// Serialises as `{"id": 1, "username": "…", "subjectCode": "…" | null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: Username,
    subject_code: Option<SubjectCode>,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, username: Username, subject_code: Option<SubjectCode>) -> Self {
        Self {
            id,
            username,
            subject_code,
        }
    }

    /// Fallible constructor from raw storage values.
    pub fn try_from_parts(
        id: i32,
        username: &str,
        subject_code: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            Username::new(username)?,
            subject_code.map(SubjectCode::new).transpose()?,
        ))
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Subject the reviewer is assigned to rate, if any.
    pub fn subject_code(&self) -> Option<&SubjectCode> {
        self.subject_code.as_ref()
    }
}

#[cfg(test)]
mod tests;
