//! Help text rendering.

use std::fmt::Write as _;
use std::io;

use crate::parser::{Parser, Requirement};

impl Parser {
    /// Renders one line per registered option.
    ///
    /// Long names are padded so descriptions line up. Mandatory options end
    /// with the configured required marker. If the configuration names the
    /// program, a `Usage:` line comes first.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_line_core::Parser;
    ///
    /// let mut parser = Parser::new();
    /// parser.mandatory::<String>(Some('i'), "input", "File to read").unwrap();
    /// parser.optional::<u32>(Some('j'), "jobs", "Worker count", Some(4)).unwrap();
    ///
    /// let help = parser.render_help();
    /// assert!(help.contains("-i, --input : File to read (REQUIRED)"));
    /// assert!(help.contains("-j, --jobs  : Worker count [default=4]"));
    /// ```
    pub fn render_help(&self) -> String {
        let mut out = String::new();

        if let Some(program) = &self.config.program {
            out.push_str("Usage: ");
            out.push_str(program);
            for descriptor in &self.descriptors {
                if descriptor.requirement == Requirement::Mandatory {
                    let type_name = self.options[descriptor.index].type_name();
                    let _ = write!(out, " --{} <{type_name}>", descriptor.long_name);
                }
            }
            if self
                .descriptors
                .iter()
                .any(|d| d.requirement == Requirement::Optional)
            {
                out.push_str(" [OPTIONS]");
            }
            out.push('\n');
        }

        let width = self
            .descriptors
            .iter()
            .map(|d| d.long_name.chars().count())
            .max()
            .unwrap_or(0);

        for descriptor in &self.descriptors {
            let short = match descriptor.short_name {
                Some(short) => format!("-{short},"),
                None => "   ".to_string(),
            };
            let _ = write!(
                out,
                "{short} --{:<width$}{}{}",
                descriptor.long_name, self.config.separator, descriptor.description
            );
            if descriptor.requirement == Requirement::Mandatory {
                out.push(' ');
                out.push_str(&self.config.required_marker);
            }
            out.push('\n');
        }

        out
    }

    /// Writes [`render_help`](Parser::render_help) to `out`.
    ///
    /// # Errors
    ///
    /// Returns any error reported by the writer.
    pub fn print_help<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(self.render_help().as_bytes())
    }
}
