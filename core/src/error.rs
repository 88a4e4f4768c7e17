//! Error types for option registration, parsing, and value access.
//!
//! Every failure the crate can produce is a [`CommandLineError`]. Callers that
//! only care about the broad category can match on [`CommandLineError::kind`].

use thiserror::Error;

/// Broad category of a [`CommandLineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The argument list could not be interpreted.
    Malformed,
    /// Mandatory options were never given a value.
    MissingRequired,
    /// A value index beyond the supplied values, with no default to fall back on.
    OptionIndexOutOfBounds,
    /// An option was registered with an unusable name.
    InvalidName,
    /// An option was registered under a name that is already taken.
    DuplicateName,
    /// A handle was used with a parser that did not issue it.
    ForeignHandle,
}

/// Errors that can occur while registering options, parsing, or reading values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandLineError {
    /// Unrecognized option, misplaced value, or a value that fails conversion.
    #[error("{0}")]
    Malformed(String),

    /// One or more mandatory options were not set.
    #[error("one or more required options were not set: {}", format_names(.0))]
    MissingRequired(Vec<String>),

    /// Requested value index is not within the supplied values.
    #[error("option \"--{option}\" has {count} value(s), index {index} is out of bounds")]
    OptionIndexOutOfBounds {
        /// Long name of the option.
        option: String,
        /// Requested index.
        index: usize,
        /// Number of values actually supplied.
        count: usize,
    },

    /// Short or long name cannot be used as an option name.
    #[error("invalid option name: {0}")]
    InvalidName(String),

    /// Short or long name is already registered.
    #[error("duplicate option name: {0}")]
    DuplicateName(String),

    /// Handle belongs to another parser.
    #[error("option handle was issued by a different parser")]
    ForeignHandle,
}

impl CommandLineError {
    /// Returns the broad category of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_line_core::{CommandLineError, ErrorKind};
    ///
    /// let err = CommandLineError::Malformed("Unrecognized option: foo".into());
    /// assert_eq!(err.kind(), ErrorKind::Malformed);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed(_) => ErrorKind::Malformed,
            Self::MissingRequired(_) => ErrorKind::MissingRequired,
            Self::OptionIndexOutOfBounds { .. } => ErrorKind::OptionIndexOutOfBounds,
            Self::InvalidName(_) => ErrorKind::InvalidName,
            Self::DuplicateName(_) => ErrorKind::DuplicateName,
            Self::ForeignHandle => ErrorKind::ForeignHandle,
        }
    }

    pub(crate) fn takes_no_value(name: &str) -> Self {
        Self::Malformed(format!("Option \"{name}\" does not take a value."))
    }

    pub(crate) fn unrecognized(token: &str) -> Self {
        Self::Malformed(format!("Unrecognized option: {token}"))
    }
}

fn format_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("--{name}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias for results with [`CommandLineError`].
pub type Result<T> = std::result::Result<T, CommandLineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_lists_long_names() {
        let err = CommandLineError::MissingRequired(vec!["input".into(), "output".into()]);
        assert_eq!(
            err.to_string(),
            "one or more required options were not set: --input, --output"
        );
        assert_eq!(err.kind(), ErrorKind::MissingRequired);
    }

    #[test]
    fn test_takes_no_value_message() {
        let err = CommandLineError::takes_no_value("-v");
        assert_eq!(err.to_string(), "Option \"-v\" does not take a value.");
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_index_out_of_bounds_message() {
        let err = CommandLineError::OptionIndexOutOfBounds {
            option: "number".into(),
            index: 2,
            count: 1,
        };
        assert!(err.to_string().contains("--number"));
        assert!(err.to_string().contains("index 2"));
    }
}
