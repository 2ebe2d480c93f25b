//! Error types for the Parley system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::message::{Message, MessageArgs};

/// Message shown to invokers lacking a required permission.
pub const NO_PERMISSION_MESSAGE: &str = "You don't have the permission to do that.";

/// Message shown to invokers when an unexpected error occurs.
pub const UNEXPECTED_ERROR_MESSAGE: &str =
    "An error occurred during command handling! Check the console log.";

/// The main error type for Parley operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional diagnostic context. Never shown to invokers.
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

    /// Creates a no-permission error.
    #[must_use]
    pub fn no_permission() -> Self {
        Self::new(ErrorKind::NoPermission)
    }

    /// Creates an error for an invoker the command does not accept.
    #[must_use]
    pub fn source_rejected(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::SourceRejected(message.into()))
    }

    /// Creates a user-facing command failure.
    #[must_use]
    pub fn failed(message: impl Into<Message>) -> Self {
        Self::new(ErrorKind::Failed(message.into()))
    }

    /// Creates a registration error.
    #[must_use]
    pub fn registration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Registration(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns the argument error, if this is one.
    #[must_use]
    pub fn as_argument_error(&self) -> Option<&ArgumentError> {
        match &self.kind {
            ErrorKind::Argument(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if this error should be reported with the generic
    /// unexpected-error message rather than its own text.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        matches!(self.kind, ErrorKind::Internal(_) | ErrorKind::Registration(_))
    }

    /// Returns the text that should be shown to the invoker.
    #[must_use]
    pub fn user_message(&self) -> String {
        match &self.kind {
            ErrorKind::Argument(err) => err.to_string(),
            ErrorKind::NoPermission => NO_PERMISSION_MESSAGE.to_string(),
            ErrorKind::SourceRejected(msg) | ErrorKind::Failed(msg) => msg.to_string(),
            ErrorKind::Registration(_) | ErrorKind::Internal(_) => {
                UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl From<ArgumentError> for Error {
    fn from(err: ArgumentError) -> Self {
        Self::new(ErrorKind::Argument(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// An argument could not be parsed.
    #[error("{0}")]
    Argument(ArgumentError),

    /// The invoker lacks the command's permission.
    #[error("{}", NO_PERMISSION_MESSAGE)]
    NoPermission,

    /// The command does not accept this kind of invoker.
    #[error("{0}")]
    SourceRejected(Message),

    /// The command ran and reported a user-facing failure.
    #[error("{0}")]
    Failed(Message),

    /// Tree registration was invalid.
    #[error("registration error: {0}")]
    Registration(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Diagnostic detail attached to an error by the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The command being handled, as its usage format.
    pub command: Option<String>,
    /// Argument chain, innermost first.
    pub chain: Vec<String>,
    /// Parse context entries at the time of the error.
    pub values: Vec<(String, String)>,
    /// Cursor state description.
    pub cursor: Option<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the command.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Adds an argument to the chain.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.chain.push(frame.into());
        self
    }

    /// Records a parse context entry.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.values.push((key.into(), value.to_string()));
        self
    }

    /// Sets the cursor description.
    #[must_use]
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(command) = &self.command {
            write!(f, "in {command}")?;
        }
        if !self.chain.is_empty() {
            write!(f, " argument chain: {}", self.chain.join(" < "))?;
        }
        if !self.values.is_empty() {
            write!(f, " context: {{")?;
            for (i, (k, v)) in self.values.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
            }
            write!(f, "}}")?;
        }
        if let Some(cursor) = &self.cursor {
            write!(f, " cursor: {cursor}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Argument errors
// ============================================================================

/// Identifies an argument in error messages and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentLabel {
    /// Context key of the argument.
    pub name: Arc<str>,
    /// Name shown to invokers.
    pub display_name: Arc<str>,
    /// Usage format, possibly empty for hidden arguments.
    pub format: Arc<str>,
}

impl ArgumentLabel {
    /// Creates a label whose display name equals its name.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, format: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        Self {
            display_name: Arc::clone(&name),
            name,
            format: format.into(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<Arc<str>>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Returns the format, falling back to the display name if empty.
    #[must_use]
    pub fn format_or_name(&self) -> &str {
        if self.format.is_empty() {
            &self.display_name
        } else {
            &self.format
        }
    }
}

impl fmt::Display for ArgumentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What went wrong while parsing an argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentErrorKind {
    /// No token was available.
    Missing,
    /// The token could not be interpreted.
    Invalid {
        /// The offending token.
        input: String,
    },
    /// The token was understood but is not allowed.
    Rejected {
        /// The offending token.
        input: String,
    },
    /// The argument can only be omitted by a player.
    RequiresPlayer,
    /// No child command matches the token.
    UnknownCommand {
        /// The offending token.
        input: String,
    },
    /// A token remained after all arguments were parsed.
    Unexpected {
        /// The offending token.
        input: String,
    },
}

impl ArgumentErrorKind {
    fn default_template(&self) -> &'static str {
        match self {
            Self::Missing => "Missing argument: {format}",
            Self::Invalid { .. } => "Invalid {argument}: {input}",
            Self::Rejected { .. } => "Not allowed for {argument}: {input}",
            Self::RequiresPlayer => "Only players can omit {format}",
            Self::UnknownCommand { .. } => "Unknown command: {input}",
            Self::Unexpected { .. } => "Unexpected argument: {input}",
        }
    }
}

/// A hard parse failure attributed to an argument.
///
/// The chain lists argument labels from the argument that failed outward to
/// the argument declared on the command. Messages use the outermost label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentError {
    kind: ArgumentErrorKind,
    chain: Vec<ArgumentLabel>,
    message: Option<Message>,
}

impl ArgumentError {
    /// Creates an error of the given kind, attributed to `label` if present.
    #[must_use]
    pub fn new(kind: ArgumentErrorKind, label: Option<ArgumentLabel>) -> Self {
        Self {
            kind,
            chain: label.into_iter().collect(),
            message: None,
        }
    }

    /// Creates a missing-argument error.
    #[must_use]
    pub fn missing(label: ArgumentLabel) -> Self {
        Self::new(ArgumentErrorKind::Missing, Some(label))
    }

    /// Creates an invalid-argument error.
    #[must_use]
    pub fn invalid(label: ArgumentLabel, input: impl Into<String>) -> Self {
        Self::new(
            ArgumentErrorKind::Invalid {
                input: input.into(),
            },
            Some(label),
        )
    }

    /// Creates a rejected-argument error.
    #[must_use]
    pub fn rejected(label: ArgumentLabel, input: impl Into<String>) -> Self {
        Self::new(
            ArgumentErrorKind::Rejected {
                input: input.into(),
            },
            Some(label),
        )
    }

    /// Creates a requires-player error.
    #[must_use]
    pub fn requires_player(label: ArgumentLabel) -> Self {
        Self::new(ArgumentErrorKind::RequiresPlayer, Some(label))
    }

    /// Creates an unknown-command error.
    #[must_use]
    pub fn unknown_command(input: impl Into<String>) -> Self {
        Self::new(
            ArgumentErrorKind::UnknownCommand {
                input: input.into(),
            },
            None,
        )
    }

    /// Creates an unexpected-argument error.
    #[must_use]
    pub fn unexpected(input: impl Into<String>) -> Self {
        Self::new(
            ArgumentErrorKind::Unexpected {
                input: input.into(),
            },
            None,
        )
    }

    /// Replaces the message template.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Records that the error passed through an enclosing argument.
    #[must_use]
    pub fn wrapped_by(mut self, label: ArgumentLabel) -> Self {
        if self.chain.last() != Some(&label) {
            self.chain.push(label);
        }
        self
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> &ArgumentErrorKind {
        &self.kind
    }

    /// Returns the argument chain, innermost first.
    #[must_use]
    pub fn chain(&self) -> &[ArgumentLabel] {
        &self.chain
    }

    /// Returns the argument that failed.
    #[must_use]
    pub fn argument(&self) -> Option<&ArgumentLabel> {
        self.chain.first()
    }

    /// Returns the outermost argument.
    #[must_use]
    pub fn root_argument(&self) -> Option<&ArgumentLabel> {
        self.chain.last()
    }

    /// Returns the offending input token, if any.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        match &self.kind {
            ArgumentErrorKind::Invalid { input }
            | ArgumentErrorKind::Rejected { input }
            | ArgumentErrorKind::UnknownCommand { input }
            | ArgumentErrorKind::Unexpected { input } => Some(input),
            ArgumentErrorKind::Missing | ArgumentErrorKind::RequiresPlayer => None,
        }
    }

    /// Returns true for missing-argument errors.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self.kind, ArgumentErrorKind::Missing)
    }

    /// Returns true for requires-player errors.
    #[must_use]
    pub const fn is_requires_player(&self) -> bool {
        matches!(self.kind, ArgumentErrorKind::RequiresPlayer)
    }

    /// Returns true for rejected-argument errors.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self.kind, ArgumentErrorKind::Rejected { .. })
    }

    /// Builds the placeholder values for this error's message.
    #[must_use]
    pub fn message_args(&self) -> MessageArgs<'_> {
        let (argument, format) = self
            .root_argument()
            .map_or(("", ""), |label| (&*label.display_name, label.format_or_name()));
        MessageArgs::new()
            .with("argument", argument)
            .with("format", format)
            .with("input", self.input().unwrap_or(""))
    }

    /// Renders the user-facing message.
    #[must_use]
    pub fn render(&self) -> String {
        let template = self
            .message
            .clone()
            .unwrap_or_else(|| Message::new(self.kind.default_template()));
        template.render(&self.message_args())
    }
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for ArgumentError {}

/// Result type alias for Parley operations.
pub type Result<T> = std::result::Result<T, Error>;
