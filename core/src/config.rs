//! Parser presentation settings.
//!
//! These settings only affect help output; parsing behaves the same under
//! every configuration.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "program": "resize",
//!   "required_marker": "(required)",
//!   "separator": " - "
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Settings for a [`Parser`](crate::Parser).
///
/// Missing fields fall back to [`ParserConfig::default`] when deserializing.
///
/// # Examples
///
/// ```
/// use command_line_core::ParserConfig;
///
/// let config = ParserConfig::from_json(r#"{ "program": "resize" }"#).unwrap();
/// assert_eq!(config.program.as_deref(), Some("resize"));
/// assert_eq!(config.required_marker, "(REQUIRED)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Program name; when set, help output starts with a `Usage:` line.
    pub program: Option<String>,
    /// Text appended to the help line of every mandatory option.
    pub required_marker: String,
    /// Text placed between the option names and the description.
    pub separator: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            program: None,
            required_marker: "(REQUIRED)".to_string(),
            separator: " : ".to_string(),
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration with a program name.
    pub fn for_program(program: &str) -> Self {
        Self {
            program: Some(program.to_string()),
            ..Default::default()
        }
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if the text is not a valid
    /// configuration object.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
