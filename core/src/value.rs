//! Conversion from command-line text into typed option values.
//!
//! Numeric and boolean conversions trim surrounding whitespace, reject empty
//! input, and must consume the whole text. Textual types take the token as-is.

use std::fmt;
use std::path::PathBuf;

/// A type that can be stored in a [`ValuedOption`](crate::ValuedOption).
///
/// Implement this for your own types to register options of that type.
///
/// # Examples
///
/// ```
/// use command_line_core::OptionValue;
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Level {
///     Low,
///     High,
/// }
///
/// impl OptionValue for Level {
///     const TYPE_NAME: &'static str = "level";
///
///     fn convert(text: &str) -> Option<Self> {
///         match text.trim() {
///             "low" => Some(Level::Low),
///             "high" => Some(Level::High),
///             _ => None,
///         }
///     }
///
///     fn render(&self) -> String {
///         format!("{self:?}").to_lowercase()
///     }
/// }
///
/// assert_eq!(Level::convert(" high "), Some(Level::High));
/// assert_eq!(Level::convert("medium"), None);
/// ```
pub trait OptionValue: Sized + fmt::Debug + 'static {
    /// Short human-readable name of the type, used in messages and descriptions.
    const TYPE_NAME: &'static str;

    /// Converts a command-line token, returning `None` if it is not a valid value.
    fn convert(text: &str) -> Option<Self>;

    /// Renders the value as text, used for default values in help output.
    fn render(&self) -> String;
}

impl OptionValue for String {
    const TYPE_NAME: &'static str = "string";

    fn convert(text: &str) -> Option<Self> {
        Some(text.to_string())
    }

    fn render(&self) -> String {
        self.clone()
    }
}

impl OptionValue for PathBuf {
    const TYPE_NAME: &'static str = "path";

    fn convert(text: &str) -> Option<Self> {
        Some(PathBuf::from(text))
    }

    fn render(&self) -> String {
        self.display().to_string()
    }
}

impl OptionValue for char {
    const TYPE_NAME: &'static str = "character";

    fn convert(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

impl OptionValue for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn convert(text: &str) -> Option<Self> {
        match text.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

macro_rules! numeric_option_value {
    ($name:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl OptionValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn convert(text: &str) -> Option<Self> {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        return None;
                    }
                    trimmed.parse().ok()
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

numeric_option_value!("integer" => i8, i16, i32, i64, i128, isize);
numeric_option_value!("unsigned integer" => u8, u16, u32, u64, u128, usize);
numeric_option_value!("number" => f32, f64);
