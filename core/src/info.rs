//! Serializable summaries of registered options.
//!
//! [`Parser::describe`] exposes the registry as plain data, for tooling that
//! wants to document or inspect a program's options without parsing help text.

use serde::{Deserialize, Serialize};

use crate::parser::{Parser, Requirement};

/// Summary of one registered option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionInfo {
    /// Short form without the dash (e.g., `'v'`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<char>,
    /// Long form without the dashes (e.g., `"verbose"`).
    pub long_name: String,
    /// Help text as shown by [`Parser::render_help`].
    pub description: String,
    /// Whether the option must be supplied.
    pub requirement: Requirement,
    /// Whether the option consumes a value.
    pub takes_value: bool,
    /// Value type name (`"flag"` for options without a value).
    pub value_type: String,
    /// Rendered default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Parser {
    /// Describes every registered option in registration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_line_core::{Parser, Requirement};
    ///
    /// let mut parser = Parser::new();
    /// parser.optional::<bool>(Some('b'), "some_boolean", "A switch", Some(false)).unwrap();
    ///
    /// let info = parser.describe();
    /// assert_eq!(info[0].long_name, "some_boolean");
    /// assert_eq!(info[0].requirement, Requirement::Optional);
    /// assert_eq!(info[0].default.as_deref(), Some("false"));
    /// ```
    pub fn describe(&self) -> Vec<OptionInfo> {
        self.descriptors
            .iter()
            .map(|descriptor| {
                let option = &self.options[descriptor.index];
                OptionInfo {
                    short_name: descriptor.short_name,
                    long_name: descriptor.long_name.clone(),
                    description: descriptor.description.clone(),
                    requirement: descriptor.requirement,
                    takes_value: option.takes_value(),
                    value_type: option.type_name().to_string(),
                    default: option.rendered_default(),
                }
            })
            .collect()
    }

    /// Serializes [`describe`](Parser::describe) as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialization fails.
    pub fn describe_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.describe())
    }
}
