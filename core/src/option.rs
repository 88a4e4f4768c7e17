//! Option containers filled in by the parser.
//!
//! The parser drives every option through the same two calls: [`recognize`]
//! when its name is matched, and [`apply`] when a value token is attached.
//! Valued options ask for a value on every occurrence; flags count the
//! occurrence and ask for nothing.
//!
//! [`recognize`]: ArgumentOption::recognize
//! [`apply`]: ArgumentOption::apply

use std::any::Any;
use std::fmt;

use crate::error::{CommandLineError, Result};
use crate::value::OptionValue;

/// Behavior shared by every option the parser can hold.
pub trait ArgumentOption: Any + fmt::Debug {
    /// Converts `text` and records it as a new occurrence.
    ///
    /// On failure returns the name of the expected value type.
    fn apply(&mut self, text: &str) -> std::result::Result<(), &'static str>;

    /// Called each time the option's name is matched on the command line.
    ///
    /// Returns whether the option expects a following token as its value.
    fn recognize(&mut self) -> bool;

    /// Whether this option type consumes a value at all.
    fn takes_value(&self) -> bool;

    /// Short name of the value type, `"flag"` for options without a value.
    fn type_name(&self) -> &'static str;

    /// Rendered default value, if any.
    fn rendered_default(&self) -> Option<String>;

    /// Upcast for typed access through a handle.
    fn as_any(&self) -> &dyn Any;
}

/// An option that takes one value per occurrence.
///
/// Values are kept in the order they appeared on the command line. An
/// optional default stands in for missing occurrences.
///
/// # Examples
///
/// ```
/// use command_line_core::{ArgumentOption, ValuedOption};
///
/// let mut jobs = ValuedOption::with_default("jobs", 4u32);
/// assert!(jobs.defined());
/// assert_eq!(jobs.get(0), Ok(&4));
///
/// assert!(jobs.recognize());
/// jobs.apply("8").unwrap();
/// assert_eq!(jobs.count(), 1);
/// assert_eq!(jobs.get(0), Ok(&8));
/// assert_eq!(jobs.get(1), Ok(&4));
/// ```
#[derive(Debug)]
pub struct ValuedOption<T> {
    long_name: String,
    values: Vec<T>,
    default: Option<T>,
}

impl<T: OptionValue> ValuedOption<T> {
    /// Creates an option without a default.
    pub fn new(long_name: &str) -> Self {
        Self {
            long_name: long_name.to_string(),
            values: Vec::new(),
            default: None,
        }
    }

    /// Creates an option that falls back to `default` when not supplied.
    pub fn with_default(long_name: &str, default: T) -> Self {
        Self {
            long_name: long_name.to_string(),
            values: Vec::new(),
            default: Some(default),
        }
    }

    /// Long name the option was registered under.
    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    /// True if a value was supplied or a default exists.
    pub fn defined(&self) -> bool {
        !self.values.is_empty() || self.default.is_some()
    }

    /// Number of values supplied on the command line, not counting the default.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Returns the value at `index`, or the default if `index` is past the
    /// supplied values.
    ///
    /// # Errors
    ///
    /// Returns [`OptionIndexOutOfBounds`](CommandLineError::OptionIndexOutOfBounds)
    /// if `index` is out of range and there is no default.
    pub fn get(&self, index: usize) -> Result<&T> {
        if let Some(value) = self.values.get(index) {
            return Ok(value);
        }

        self.default
            .as_ref()
            .ok_or_else(|| CommandLineError::OptionIndexOutOfBounds {
                option: self.long_name.clone(),
                index,
                count: self.values.len(),
            })
    }

    /// All supplied values in order, or just the default if none were supplied.
    pub fn range(&self) -> &[T] {
        match &self.default {
            Some(default) if self.values.is_empty() => std::slice::from_ref(default),
            _ => &self.values,
        }
    }

    /// The configured default, if any.
    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }
}

impl<T: OptionValue> ArgumentOption for ValuedOption<T> {
    fn apply(&mut self, text: &str) -> std::result::Result<(), &'static str> {
        let value = T::convert(text).ok_or(T::TYPE_NAME)?;
        self.values.push(value);
        Ok(())
    }

    fn recognize(&mut self) -> bool {
        true
    }

    fn takes_value(&self) -> bool {
        true
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn rendered_default(&self) -> Option<String> {
        self.default.as_ref().map(OptionValue::render)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An option without a value; only its occurrences are counted.
///
/// # Examples
///
/// ```
/// use command_line_core::{ArgumentOption, FlagOption};
///
/// let mut verbose = FlagOption::default();
/// assert!(!verbose.recognize());
/// assert!(!verbose.recognize());
/// assert_eq!(verbose.count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct FlagOption {
    count: usize,
}

impl FlagOption {
    /// Number of times the flag appeared.
    pub fn count(&self) -> usize {
        self.count
    }

    /// True if the flag appeared at least once.
    pub fn is_set(&self) -> bool {
        self.count > 0
    }
}

impl ArgumentOption for FlagOption {
    // Only reachable through `--name=value`; the occurrence is already counted.
    fn apply(&mut self, _text: &str) -> std::result::Result<(), &'static str> {
        Ok(())
    }

    fn recognize(&mut self) -> bool {
        self.count += 1;
        false
    }

    fn takes_value(&self) -> bool {
        false
    }

    fn type_name(&self) -> &'static str {
        "flag"
    }

    fn rendered_default(&self) -> Option<String> {
        None
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_undefined_without_default() {
        let option = ValuedOption::<String>::new("name");
        assert!(!option.defined());
        assert_eq!(option.count(), 0);
        assert!(option.range().is_empty());

        let err = option.get(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OptionIndexOutOfBounds);
    }

    #[test]
    fn test_default_fills_range() {
        let option = ValuedOption::with_default("name", "fallback".to_string());
        assert!(option.defined());
        assert_eq!(option.count(), 0);
        assert_eq!(option.get(0).unwrap(), "fallback");
        assert_eq!(option.get(5).unwrap(), "fallback");
        assert_eq!(option.range(), ["fallback".to_string()]);
    }

    #[test]
    fn test_applied_values_keep_order() {
        let mut option = ValuedOption::<i32>::new("number");
        option.apply("3").unwrap();
        option.apply("1").unwrap();
        option.apply("2").unwrap();

        assert_eq!(option.range(), [3, 1, 2]);
        assert_eq!(option.get(1), Ok(&1));
        assert!(option.get(3).is_err());
    }

    #[test]
    fn test_applied_values_replace_default_in_range() {
        let mut option = ValuedOption::with_default("number", 10i64);
        option.apply("20").unwrap();
        assert_eq!(option.range(), [20]);
        assert_eq!(option.get(1), Ok(&10));
    }

    #[test]
    fn test_apply_reports_expected_type() {
        let mut option = ValuedOption::<u16>::new("port");
        assert_eq!(option.apply("eighty"), Err("unsigned integer"));
        assert_eq!(option.count(), 0);
    }

    #[test]
    fn test_flag_counts_recognitions() {
        let mut flag = FlagOption::default();
        assert!(!flag.is_set());
        assert!(!flag.recognize());
        assert!(flag.is_set());
        assert_eq!(flag.apply("ignored"), Ok(()));
        assert_eq!(flag.count(), 1);
        assert!(!flag.takes_value());
    }

    #[test]
    fn test_rendered_default() {
        let option = ValuedOption::with_default("enabled", false);
        assert_eq!(option.rendered_default().as_deref(), Some("false"));
        assert_eq!(option.type_name(), "boolean");
    }
}
