//! Option description export.
//!
//! Registers a few options and prints their descriptions as JSON, the way a
//! documentation generator might consume them.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p command-line-demos --example describe
//! ```

use command_line_core::{CommandLineError, Parser, Requirement};

fn build_parser() -> Result<Parser, CommandLineError> {
    let mut parser = Parser::new();
    parser.mandatory::<String>(Some('i'), "input", "File to read")?;
    parser.optional::<u16>(Some('p'), "port", "Port to listen on", Some(8080))?;
    parser.optional::<bool>(None, "some_boolean", "A switch", Some(false))?;
    parser.flag(Some('v'), "verbose", "Chatty output")?;
    Ok(parser)
}

fn main() {
    let parser = match build_parser() {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    println!("Help:\n{}", parser.render_help());

    let mandatory = parser
        .describe()
        .iter()
        .filter(|info| info.requirement == Requirement::Mandatory)
        .count();
    println!("Mandatory options: {mandatory}\n");

    match parser.describe_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Failed to serialize options: {e}");
            std::process::exit(1);
        }
    }

    // Round-trip through serde_json::Value to show the export is plain data.
    if let Ok(json) = parser.describe_json() {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(&json) {
            let names: Vec<_> = value
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|entry| entry["long_name"].as_str())
                .collect();
            println!("\nLong names: {}", names.join(", "));
        }
    }
}
