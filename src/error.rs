use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::path::Path;

use crate::voting::Id;

#[derive(Debug)]
pub struct ValidationError {
    message: String,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Validation error: {}", self.message)
    }
}

impl StdError for ValidationError {}

pub fn credentials_missing() -> ValidationError {
    ValidationError {
        message: String::from("email and password are required"),
    }
}

pub fn poll_question_empty() -> ValidationError {
    ValidationError {
        message: String::from("poll question must not be empty"),
    }
}

pub fn poll_too_few_options(count: usize) -> ValidationError {
    ValidationError {
        message: format!("poll must have at least 2 non-empty options, got {count}"),
    }
}

#[derive(Debug)]
pub struct ConflictError {
    message: String,
}

impl Display for ConflictError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Conflict: {}", self.message)
    }
}

impl StdError for ConflictError {}

pub fn user_email_taken(email: &str) -> ConflictError {
    ConflictError {
        message: format!("a user with email {email} already exists"),
    }
}

#[derive(Debug)]
pub struct NotFoundError {
    message: String,
}

impl Display for NotFoundError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Not found: {}", self.message)
    }
}

impl StdError for NotFoundError {}

pub fn user_not_found(email: &str) -> NotFoundError {
    NotFoundError {
        message: format!("no user with email {email}"),
    }
}

pub fn poll_not_found(poll_id: Id) -> NotFoundError {
    NotFoundError {
        message: format!("no poll with id {poll_id}"),
    }
}

pub fn poll_option_not_found(poll_id: Id, option_id: Id) -> NotFoundError {
    NotFoundError {
        message: format!("poll {poll_id} has no option {option_id}"),
    }
}

#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Auth error: {}", self.message)
    }
}

impl StdError for AuthError {}

pub fn password_mismatch() -> AuthError {
    AuthError {
        message: String::from("password does not match"),
    }
}

pub fn session_unknown() -> AuthError {
    AuthError {
        message: String::from("session token is not recognized"),
    }
}

pub fn session_expired() -> AuthError {
    AuthError {
        message: String::from("session has expired"),
    }
}

#[derive(Debug)]
pub struct StoreError {
    message: String,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "Store error: {}: {source}", self.message),
            None => write!(f, "Store error: {}", self.message),
        }
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn store_read(path: &Path, source: std::io::Error) -> StoreError {
    StoreError {
        message: format!("failed to read state from {}", path.display()),
        source: Some(Box::new(source)),
    }
}

pub fn store_parse(path: &Path, source: serde_json::Error) -> StoreError {
    StoreError {
        message: format!("failed to parse state in {}", path.display()),
        source: Some(Box::new(source)),
    }
}

pub fn store_write(path: &Path, source: impl StdError + Send + Sync + 'static) -> StoreError {
    StoreError {
        message: format!("failed to write state to {}", path.display()),
        source: Some(Box::new(source)),
    }
}

/// Umbrella over every failure a domain operation can surface. All of these
/// are recoverable at the operation boundary; none abort the process.
#[derive(Debug)]
pub enum Error {
    Validation(ValidationError),
    Conflict(ConflictError),
    NotFound(NotFoundError),
    Auth(AuthError),
    Store(StoreError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(err) => err.fmt(f),
            Error::Conflict(err) => err.fmt(f),
            Error::NotFound(err) => err.fmt(f),
            Error::Auth(err) => err.fmt(f),
            Error::Store(err) => err.fmt(f),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Validation(err) => Some(err),
            Error::Conflict(err) => Some(err),
            Error::NotFound(err) => Some(err),
            Error::Auth(err) => Some(err),
            Error::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Error::Validation(value)
    }
}

impl From<ConflictError> for Error {
    fn from(value: ConflictError) -> Self {
        Error::Conflict(value)
    }
}

impl From<NotFoundError> for Error {
    fn from(value: NotFoundError) -> Self {
        Error::NotFound(value)
    }
}

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        Error::Auth(value)
    }
}

impl From<StoreError> for Error {
    fn from(value: StoreError) -> Self {
        Error::Store(value)
    }
}
