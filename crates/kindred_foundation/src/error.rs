//! Error types for Kindred.
//!
//! Uses `thiserror` for ergonomic error definition. Every failure the core
//! can produce is a recoverable, returned outcome.

use std::fmt;

use thiserror::Error;

use crate::member::{MemberId, Relation};

/// Message reported when a name is missing or blank.
pub const NAME_MESSAGE: &str = "Name is required";
/// Message reported when an age is missing, non-numeric, or below 1.
pub const AGE_MESSAGE: &str = "Age must be a positive integer";
/// Message reported when a gender is missing or not recognised.
pub const GENDER_MESSAGE: &str = r#"Gender must be either "male" or "female""#;
/// Message reported when a stored id is zero.
pub const ID_MESSAGE: &str = "Member ID must be a positive integer";
/// Message reported when roster ids are not in ascending order.
pub const ROSTER_ORDER_MESSAGE: &str = "Roster IDs must be in ascending order";
/// Message reported when an update tries to write relation fields.
pub const RELATION_FIELDS_MESSAGE: &str =
    "Relation fields cannot be updated directly; use marry or add-child";

/// The main error type for Kindred operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a validation error from one or more messages.
    #[must_use]
    pub fn validation<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ErrorKind::Validation(
            messages.into_iter().map(Into::into).collect(),
        ))
    }

    /// Creates a member not found error.
    #[must_use]
    pub fn member_not_found(id: MemberId) -> Self {
        Self::new(ErrorKind::MemberNotFound(id))
    }

    /// Creates an invalid relationship error.
    #[must_use]
    pub fn invalid_relationship(relation: Relation) -> Self {
        Self::new(ErrorKind::InvalidRelationship(relation))
    }

    /// Creates an id conflict error.
    #[must_use]
    pub fn id_conflict(id: MemberId) -> Self {
        Self::new(ErrorKind::IdConflict(id))
    }

    /// Returns the HTTP-equivalent status a transport layer would report.
    #[must_use]
    pub fn status_hint(&self) -> u16 {
        match self.kind {
            ErrorKind::Validation(_)
            | ErrorKind::InvalidRelationship(_)
            | ErrorKind::IdConflict(_)
            | ErrorKind::Command(_) => 400,
            ErrorKind::MemberNotFound(_) => 404,
            ErrorKind::Io(_) | ErrorKind::Internal(_) => 500,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed validation. Messages are reported in field order.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// The targeted member does not exist.
    #[error("Family member with ID {0} not found")]
    MemberNotFound(MemberId),

    /// A precondition of a relation operation was violated.
    ///
    /// Deliberately coarse: unknown ids, self-relations, and existing
    /// relations all report the same outcome.
    #[error("Invalid {0} relationship")]
    InvalidRelationship(Relation),

    /// An id was already taken when a member was inserted.
    #[error("Family member with ID {0} already exists")]
    IdConflict(MemberId),

    /// A shell command could not be parsed.
    #[error("{0}")]
    Command(String),

    /// Reading a command file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Source file or input name.
    pub source: Option<String>,
    /// Line number in source (1-indexed).
    pub line: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line number.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.source, self.line) {
            (Some(source), Some(line)) => write!(f, "at {source}:{line}"),
            (Some(source), None) => write!(f, "at {source}"),
            (None, Some(line)) => write!(f, "at line {line}"),
            (None, None) => Ok(()),
        }
    }
}

/// Result type alias for Kindred operations.
pub type Result<T> = std::result::Result<T, Error>;
