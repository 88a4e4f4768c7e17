//! Image-resize style command line.
//!
//! Demonstrates mandatory, optional, and flag options parsed from the
//! process arguments, with help output on failure.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p command-line-demos --example resize -- --width=640 -h 480 -v
//! cargo run -p command-line-demos --example resize -- --help
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use command_line_core::{
    ErrorKind, FlagOption, OptionHandle, Parser, ParserConfig, Result, ValuedOption,
};

struct ResizeOptions {
    width: OptionHandle<ValuedOption<u32>>,
    height: OptionHandle<ValuedOption<u32>>,
    output: OptionHandle<ValuedOption<PathBuf>>,
    quality: OptionHandle<ValuedOption<f64>>,
    verbose: OptionHandle<FlagOption>,
    help: OptionHandle<FlagOption>,
}

impl ResizeOptions {
    fn register(parser: &mut Parser) -> Result<Self> {
        Ok(Self {
            width: parser.mandatory(Some('w'), "width", "Target width in pixels")?,
            height: parser.mandatory(Some('h'), "height", "Target height in pixels")?,
            output: parser.optional(
                Some('o'),
                "output",
                "Output file",
                Some(PathBuf::from("out.png")),
            )?,
            quality: parser.optional(Some('q'), "quality", "Encoder quality", Some(0.9))?,
            verbose: parser.flag(Some('v'), "verbose", "Print what is being done")?,
            help: parser.flag(None, "help", "Show this message")?,
        })
    }

    fn report(&self, parser: &Parser) -> Result<()> {
        println!(
            "Resizing to {}x{} -> {} (quality {:.2})",
            parser.value(self.width)?,
            parser.value(self.height)?,
            parser.value(self.output)?.display(),
            parser.value(self.quality)?,
        );

        let verbosity = parser.option(self.verbose)?.count();
        if verbosity > 0 {
            println!("Verbosity level: {verbosity}");
        }
        Ok(())
    }
}

fn main() -> ExitCode {
    let mut parser = Parser::with_config(ParserConfig::for_program("resize"));
    let options = match ResizeOptions::register(&mut parser) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = parser.run_env() {
        let asked_for_help = parser
            .option(options.help)
            .map(FlagOption::is_set)
            .unwrap_or(false);
        if asked_for_help && e.kind() == ErrorKind::MissingRequired {
            print!("{}", parser.render_help());
            return ExitCode::SUCCESS;
        }
        eprintln!("Error: {e}\n");
        eprint!("{}", parser.render_help());
        return ExitCode::FAILURE;
    }

    match options.report(&parser) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
