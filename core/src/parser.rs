//! Option registry and argument dispatch.
//!
//! A [`Parser`] owns every registered option in an arena. Short and long
//! names map to arena indices, and callers read results back through typed
//! [`OptionHandle`]s.
//!
//! Each token is dispatched on its own, with at most one option left waiting
//! for a value from the next token:
//!
//! - `--name=value` and `-nVALUE` carry their value in the same token.
//! - `--name` and `-n` leave a valued option pending; the next bare token is
//!   its value.
//! - Any token starting with `-` introduces an option, so negative numbers
//!   must use one of the joined forms.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::error::{CommandLineError, Result};
use crate::option::{ArgumentOption, FlagOption, ValuedOption};
use crate::value::OptionValue;

static NEXT_PARSER_ID: AtomicUsize = AtomicUsize::new(0);

/// Whether an option must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// May be omitted (the default).
    #[default]
    Optional,
    /// [`Parser::run`] fails if the option received no value.
    Mandatory,
}

/// Registration metadata for one option.
#[derive(Debug, Clone)]
pub struct OptionDescriptor {
    /// Whether the option must be supplied.
    pub requirement: Requirement,
    /// Single-character name used as `-x`.
    pub short_name: Option<char>,
    /// Name used as `--name`.
    pub long_name: String,
    /// Help text, including the rendered default if one was given.
    pub description: String,
    pub(crate) index: usize,
}

/// Typed reference to an option registered with a [`Parser`].
///
/// Handles are cheap to copy and only valid with the parser that issued them.
pub struct OptionHandle<O> {
    parser: usize,
    index: usize,
    marker: PhantomData<fn() -> O>,
}

impl<O> OptionHandle<O> {
    fn new(parser: usize, index: usize) -> Self {
        Self {
            parser,
            index,
            marker: PhantomData,
        }
    }
}

impl<O> Clone for OptionHandle<O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O> Copy for OptionHandle<O> {}

impl<O> fmt::Debug for OptionHandle<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionHandle")
            .field("parser", &self.parser)
            .field("index", &self.index)
            .finish()
    }
}

/// Registry of command-line options and the dispatcher that fills them.
///
/// Running the same parser more than once appends to the values collected by
/// earlier runs.
///
/// # Examples
///
/// ```
/// use command_line_core::{ErrorKind, Parser};
///
/// let mut parser = Parser::new();
/// let name = parser.mandatory::<String>(Some('n'), "name", "Name of user").unwrap();
/// let height = parser
///     .optional::<f64>(Some('h'), "height", "Height in centimeters", Some(170.0))
///     .unwrap();
/// let verbose = parser.flag(Some('v'), "verbose", "Chatty output").unwrap();
///
/// parser.run(["-nJohnny", "-v", "--verbose"]).unwrap();
///
/// assert_eq!(parser.value(name).unwrap(), "Johnny");
/// assert_eq!(parser.value(height).unwrap(), &170.0);
/// assert_eq!(parser.option(verbose).unwrap().count(), 2);
///
/// let err = Parser::new().run(["stray"]).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Malformed);
/// ```
#[derive(Debug)]
pub struct Parser {
    id: usize,
    pub(crate) config: ParserConfig,
    pub(crate) options: Vec<Box<dyn ArgumentOption>>,
    pub(crate) descriptors: Vec<OptionDescriptor>,
    short_names: HashMap<char, usize>,
    long_names: HashMap<String, usize>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates an empty parser with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates an empty parser with the given configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            id: NEXT_PARSER_ID.fetch_add(1, Ordering::Relaxed),
            config,
            options: Vec::new(),
            descriptors: Vec::new(),
            short_names: HashMap::new(),
            long_names: HashMap::new(),
        }
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Returns the descriptors of all options in registration order.
    pub fn descriptors(&self) -> &[OptionDescriptor] {
        &self.descriptors
    }

    /// Registers an option that [`run`](Parser::run) requires a value for.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidName`](CommandLineError::InvalidName) or
    /// [`DuplicateName`](CommandLineError::DuplicateName) if either name
    /// cannot be used.
    pub fn mandatory<T: OptionValue>(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        description: &str,
    ) -> Result<OptionHandle<ValuedOption<T>>> {
        self.register(
            ValuedOption::new(long_name),
            Requirement::Mandatory,
            short_name,
            long_name,
            description.to_string(),
        )
    }

    /// Registers an option that may be omitted.
    ///
    /// A default is returned by [`ValuedOption::get`] when no value was
    /// supplied, and is appended to the description as `[default=...]`.
    ///
    /// # Errors
    ///
    /// Same as [`mandatory`](Parser::mandatory).
    pub fn optional<T: OptionValue>(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        description: &str,
        default: Option<T>,
    ) -> Result<OptionHandle<ValuedOption<T>>> {
        let (option, description) = match default {
            Some(default) => {
                let description = format!("{description} [default={}]", default.render());
                (ValuedOption::with_default(long_name, default), description)
            }
            None => (ValuedOption::new(long_name), description.to_string()),
        };

        self.register(
            option,
            Requirement::Optional,
            short_name,
            long_name,
            description,
        )
    }

    /// Registers an option without a value; only its occurrences are counted.
    ///
    /// # Errors
    ///
    /// Same as [`mandatory`](Parser::mandatory).
    pub fn flag(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        description: &str,
    ) -> Result<OptionHandle<FlagOption>> {
        self.register(
            FlagOption::default(),
            Requirement::Optional,
            short_name,
            long_name,
            description.to_string(),
        )
    }

    fn register<O: ArgumentOption>(
        &mut self,
        option: O,
        requirement: Requirement,
        short_name: Option<char>,
        long_name: &str,
        description: String,
    ) -> Result<OptionHandle<O>> {
        validate_long_name(long_name)?;
        if let Some(short) = short_name {
            validate_short_name(short)?;
            if self.short_names.contains_key(&short) {
                return Err(CommandLineError::DuplicateName(format!("-{short}")));
            }
        }
        if self.long_names.contains_key(long_name) {
            return Err(CommandLineError::DuplicateName(format!("--{long_name}")));
        }

        let index = self.options.len();
        self.options.push(Box::new(option));
        if let Some(short) = short_name {
            self.short_names.insert(short, index);
        }
        self.long_names.insert(long_name.to_string(), index);
        self.descriptors.push(OptionDescriptor {
            requirement,
            short_name,
            long_name: long_name.to_string(),
            description,
            index,
        });

        debug!(long = long_name, short = ?short_name, ?requirement, "Registered option");
        Ok(OptionHandle::new(self.id, index))
    }

    /// Parses `tokens` into the registered options.
    ///
    /// `tokens` should not include the program name. Empty tokens are
    /// skipped. The first offending token aborts the parse; values applied
    /// before it are kept.
    ///
    /// # Errors
    ///
    /// - [`Malformed`](CommandLineError::Malformed) for unknown names, a
    ///   value given to a flag in joined short form, a value that fails
    ///   conversion, or a bare token with no option waiting for it.
    /// - [`MissingRequired`](CommandLineError::MissingRequired) if a mandatory
    ///   option got no value by the end of input.
    pub fn run<I, S>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pending: Option<usize> = None;
        let mut required: BTreeSet<usize> = self
            .descriptors
            .iter()
            .filter(|d| d.requirement == Requirement::Mandatory)
            .map(|d| d.index)
            .collect();
        let mut processed = 0usize;

        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                continue;
            }
            pending = self.process(pending, token, &mut required)?;
            processed += 1;
        }

        if let Some(index) = pending {
            debug!(
                option = %self.descriptors[index].long_name,
                "Input ended while option was waiting for a value"
            );
        }

        if !required.is_empty() {
            let missing = required
                .iter()
                .map(|&index| self.descriptors[index].long_name.clone())
                .collect::<Vec<_>>();
            debug!(?missing, "Mandatory options not set");
            return Err(CommandLineError::MissingRequired(missing));
        }

        debug!(tokens = processed, "Parsed command line");
        Ok(())
    }

    /// Parses the arguments of the current process, skipping the program name.
    ///
    /// Arguments that are not valid Unicode are converted lossily.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Parser::run).
    pub fn run_env(&mut self) -> Result<()> {
        self.run(
            std::env::args_os()
                .skip(1)
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    fn process(
        &mut self,
        pending: Option<usize>,
        token: &str,
        required: &mut BTreeSet<usize>,
    ) -> Result<Option<usize>> {
        if let Some(body) = token.strip_prefix("--") {
            if let Some((name, value)) = body.split_once('=') {
                let index = self.find_long(name)?;
                self.options[index].recognize();
                self.apply(index, value, required)?;
                return Ok(None);
            }

            let index = self.find_long(body)?;
            return Ok(self.recognize(index));
        }

        if let Some(body) = token.strip_prefix('-') {
            let mut chars = body.chars();
            let Some(short) = chars.next() else {
                return Err(CommandLineError::Malformed(
                    "Option introducer, but no name given".to_string(),
                ));
            };
            let index = self.find_short(short)?;
            let pending = self.recognize(index);

            let joined = chars.as_str();
            if joined.is_empty() {
                return Ok(pending);
            }
            if pending.is_none() {
                return Err(CommandLineError::takes_no_value(&format!("-{short}")));
            }
            self.apply(index, joined, required)?;
            return Ok(None);
        }

        match pending {
            Some(index) => {
                self.apply(index, token, required)?;
                Ok(None)
            }
            None => Err(CommandLineError::unrecognized(token)),
        }
    }

    fn recognize(&mut self, index: usize) -> Option<usize> {
        let wants_value = self.options[index].recognize();
        trace!(option = %self.descriptors[index].long_name, wants_value, "Recognized option");
        wants_value.then_some(index)
    }

    fn apply(&mut self, index: usize, value: &str, required: &mut BTreeSet<usize>) -> Result<()> {
        let long_name = &self.descriptors[index].long_name;
        self.options[index].apply(value).map_err(|expected| {
            CommandLineError::Malformed(format!(
                "Value \"{value}\" for option \"--{long_name}\" is not a valid {expected}."
            ))
        })?;
        required.remove(&index);
        trace!(option = %long_name, value, "Applied value");
        Ok(())
    }

    fn find_short(&self, short_name: char) -> Result<usize> {
        self.short_names
            .get(&short_name)
            .copied()
            .ok_or_else(|| CommandLineError::unrecognized(&format!("-{short_name}")))
    }

    fn find_long(&self, long_name: &str) -> Result<usize> {
        self.long_names
            .get(long_name)
            .copied()
            .ok_or_else(|| CommandLineError::unrecognized(&format!("--{long_name}")))
    }

    /// Returns the option behind `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`ForeignHandle`](CommandLineError::ForeignHandle) if the handle
    /// was issued by another parser.
    pub fn option<O: ArgumentOption>(&self, handle: OptionHandle<O>) -> Result<&O> {
        if handle.parser != self.id {
            return Err(CommandLineError::ForeignHandle);
        }
        self.options
            .get(handle.index)
            .and_then(|option| option.as_any().downcast_ref::<O>())
            .ok_or(CommandLineError::ForeignHandle)
    }

    /// Returns the first value of a valued option, or its default.
    ///
    /// # Errors
    ///
    /// Returns [`OptionIndexOutOfBounds`](CommandLineError::OptionIndexOutOfBounds)
    /// if no value was supplied and there is no default, or
    /// [`ForeignHandle`](CommandLineError::ForeignHandle).
    pub fn value<T: OptionValue>(&self, handle: OptionHandle<ValuedOption<T>>) -> Result<&T> {
        self.option(handle)?.get(0)
    }
}

fn validate_long_name(long_name: &str) -> Result<()> {
    if long_name.is_empty()
        || long_name.starts_with('-')
        || long_name.contains('=')
        || long_name.chars().any(char::is_whitespace)
    {
        return Err(CommandLineError::InvalidName(format!("--{long_name}")));
    }
    Ok(())
}

fn validate_short_name(short_name: char) -> Result<()> {
    if short_name == '-' || short_name.is_whitespace() || short_name.is_control() {
        return Err(CommandLineError::InvalidName(format!("-{short_name}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_short_joined_value() {
        let mut parser = Parser::new();
        let output = parser.optional::<String>(Some('o'), "output", "", None).unwrap();

        parser.run(["-oresult.txt"]).unwrap();
        assert_eq!(parser.value(output).unwrap(), "result.txt");
    }

    #[test]
    fn test_value_clears_pending_option() {
        let mut parser = Parser::new();
        parser.optional::<String>(Some('o'), "output", "", None).unwrap();

        let err = parser.run(["-o", "first", "second"]).unwrap_err();
        assert_eq!(err, CommandLineError::unrecognized("second"));
    }

    #[test]
    fn test_lone_dash_is_malformed() {
        let mut parser = Parser::new();
        let err = parser.run(["-"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(err.to_string().contains("no name given"));
    }

    #[test]
    fn test_unknown_long_name_fails_at_lookup() {
        let mut parser = Parser::new();
        parser.flag(Some('v'), "verbose", "").unwrap();

        let err = parser.run(["--unknown"]).unwrap_err();
        assert_eq!(err, CommandLineError::unrecognized("--unknown"));
    }

    #[test]
    fn test_empty_tokens_are_skipped() {
        let mut parser = Parser::new();
        let name = parser.mandatory::<String>(Some('n'), "name", "").unwrap();

        parser.run(["", "-n", "", "value", ""]).unwrap();
        assert_eq!(parser.value(name).unwrap(), "value");
    }

    #[test]
    fn test_flag_rejects_joined_short_value() {
        let mut parser = Parser::new();
        parser.flag(Some('v'), "verbose", "").unwrap();

        let err = parser.run(["-vtrue"]).unwrap_err();
        assert_eq!(err, CommandLineError::takes_no_value("-v"));
    }

    #[test]
    fn test_flag_accepts_equals_form() {
        let mut parser = Parser::new();
        let verbose = parser.flag(Some('v'), "verbose", "").unwrap();

        parser.run(["--verbose=yes"]).unwrap();
        assert_eq!(parser.option(verbose).unwrap().count(), 1);
    }

    #[test]
    fn test_flag_does_not_consume_next_token() {
        let mut parser = Parser::new();
        parser.flag(Some('v'), "verbose", "").unwrap();

        let err = parser.run(["-v", "file.txt"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_equals_splits_at_first_sign() {
        let mut parser = Parser::new();
        let define = parser.optional::<String>(Some('D'), "define", "", None).unwrap();

        parser.run(["--define=key=value"]).unwrap();
        assert_eq!(parser.value(define).unwrap(), "key=value");
    }

    #[test]
    fn test_negative_number_needs_joined_form() {
        let mut parser = Parser::new();
        let offset = parser.optional::<i32>(Some('x'), "offset", "", None).unwrap();

        parser.run(["-x-5", "--offset=-6"]).unwrap();
        assert_eq!(parser.option(offset).unwrap().range(), [-5, -6]);

        let err = parser.run(["--offset", "-7"]).unwrap_err();
        assert_eq!(err, CommandLineError::unrecognized("-7"));
    }

    #[test]
    fn test_missing_required_in_registration_order() {
        let mut parser = Parser::new();
        parser.mandatory::<String>(Some('b'), "beta", "").unwrap();
        parser.mandatory::<String>(Some('a'), "alpha", "").unwrap();

        let err = parser.run(Vec::<String>::new()).unwrap_err();
        assert_eq!(
            err,
            CommandLineError::MissingRequired(vec!["beta".into(), "alpha".into()])
        );
    }

    #[test]
    fn test_pending_at_end_does_not_satisfy_requirement() {
        let mut parser = Parser::new();
        parser.mandatory::<String>(Some('n'), "name", "").unwrap();

        let err = parser.run(["--name"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequired);
    }

    #[test]
    fn test_conversion_failure_names_option() {
        let mut parser = Parser::new();
        parser.optional::<u8>(Some('l'), "level", "", None).unwrap();

        let err = parser.run(["-l300"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert!(err.to_string().contains("--level"));
        assert!(err.to_string().contains("unsigned integer"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut parser = Parser::new();
        parser.flag(Some('v'), "verbose", "").unwrap();

        let err = parser.flag(Some('v'), "version", "").unwrap_err();
        assert_eq!(err, CommandLineError::DuplicateName("-v".into()));

        let err = parser.flag(None, "verbose", "").unwrap_err();
        assert_eq!(err, CommandLineError::DuplicateName("--verbose".into()));

        // Rejected registrations leave no trace.
        assert_eq!(parser.descriptors().len(), 1);
        parser.flag(Some('V'), "version", "").unwrap();
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut parser = Parser::new();
        for long in ["", "-name", "a=b", "two words"] {
            let err = parser.flag(None, long, "").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidName);
        }
        let err = parser.flag(Some('-'), "dash", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
    }

    #[test]
    fn test_option_without_short_name() {
        let mut parser = Parser::new();
        let depth = parser.optional::<usize>(None, "depth", "", None).unwrap();

        parser.run(["--depth", "3"]).unwrap();
        assert_eq!(parser.value(depth).unwrap(), &3);
    }

    #[test]
    fn test_multibyte_short_name() {
        let mut parser = Parser::new();
        let angle = parser.optional::<f64>(Some('θ'), "angle", "", None).unwrap();

        parser.run(["-θ0.5"]).unwrap();
        assert_eq!(parser.value(angle).unwrap(), &0.5);
    }

    #[test]
    fn test_foreign_handle_rejected() {
        let mut first = Parser::new();
        let mut second = Parser::new();
        let handle = first.flag(Some('v'), "verbose", "").unwrap();
        second.flag(Some('v'), "verbose", "").unwrap();

        assert_eq!(second.option(handle).unwrap_err(), CommandLineError::ForeignHandle);
    }

    #[test]
    fn test_repeated_runs_accumulate() {
        let mut parser = Parser::new();
        let tag = parser.mandatory::<String>(Some('t'), "tag", "").unwrap();

        parser.run(["-t", "one"]).unwrap();
        parser.run(["-t", "two"]).unwrap();
        assert_eq!(parser.option(tag).unwrap().range(), ["one", "two"]);

        // Requirements are checked per run.
        let err = parser.run(Vec::<&str>::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequired);
    }
}
