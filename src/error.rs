use std::fmt::{Display, Formatter};

use crate::store::UserId;

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// Attach a lazily built context message to a fallible call.
pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

#[derive(Debug)]
pub struct WithContextError {
    pub context: String,
    pub source: DynError,
}

impl Display for WithContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl std::error::Error for WithContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            Box::new(WithContextError {
                context: f(),
                source: e.into(),
            }) as DynError
        })
    }
}

#[derive(Debug)]
pub struct SimpleError(pub String);

impl SimpleError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl Display for SimpleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SimpleError {}

pub fn simple_error(msg: impl Into<String>) -> DynError {
    Box::new(SimpleError::new(msg))
}

/// Errors raised by local list operations and draft edits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserListError {
    /// Age input that is neither blank nor a non-negative integer.
    InvalidAge(String),
    InvalidMaritalStatus(String),
    /// Boolean field given something other than yes/no style text.
    InvalidFlag { field: &'static str, value: String },
    UnknownField(String),
    /// A required text field is blank at commit time.
    MissingField(&'static str),
    /// The id no longer refers to a record in the canonical list.
    UnknownUser(UserId),
    NoOpenForm,
    /// The initial fetch has not completed successfully.
    NotReady,
}

impl Display for UserListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAge(v) => write!(f, "age must be a whole number, got '{v}'"),
            Self::InvalidMaritalStatus(v) => {
                write!(f, "marital status must be 'unmarried' or 'married', got '{v}'")
            }
            Self::InvalidFlag { field, value } => {
                write!(f, "{field} must be yes or no, got '{value}'")
            }
            Self::UnknownField(name) => write!(f, "unknown field '{name}'"),
            Self::MissingField(name) => write!(f, "{name} is required"),
            Self::UnknownUser(id) => write!(f, "user {id} no longer exists"),
            Self::NoOpenForm => write!(f, "no add or edit form is open"),
            Self::NotReady => write!(f, "user list is not loaded yet"),
        }
    }
}

impl std::error::Error for UserListError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wraps_source_message() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = res.with_ctx(|| "read users.json".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "read users.json: missing");
        assert!(err.source().is_some());
    }

    #[test]
    fn list_errors_render_readably() {
        assert_eq!(
            UserListError::InvalidAge("3x".into()).to_string(),
            "age must be a whole number, got '3x'"
        );
        assert_eq!(
            UserListError::MissingField("username").to_string(),
            "username is required"
        );
    }
}
