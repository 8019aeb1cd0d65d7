//! # cssevents
//!
//! This binary drives the css-events grammar engine over a single
//! stylesheet and prints the event stream it produces.
extern crate css_events;

mod cli;

use cli::*;

use std::io::Read;
use std::{error::Error, fs};

use log::{error, info};

use css_events::{Event, EventSink, Parser, ParserOptions};

struct Printer {
    json: bool,
}

impl EventSink for Printer {
    fn on_event(&mut self, event: Event) {
        if self.json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(err) => error!("failed to serialize event: {err}"),
            }
        } else {
            println!("{event:?}");
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::init();

    simple_logger::init_with_level((&args.verbosity).into()).unwrap();

    let input = match &args.file {
        Some(path) => {
            info!("reading {}", path.display());
            fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let options = ParserOptions::new()
        .with_star_hack(args.star_hack)
        .with_underscore_hack(args.underscore_hack)
        .with_ie_filters(args.ie_filters)
        .with_strict(args.strict);

    let parser = Parser::new(options);
    let mut sink = Printer { json: args.json };

    if let Err(err) = parser.parse_stylesheet(&input, &mut sink) {
        error!("{}", err.render(&input));
        std::process::exit(1);
    }

    Ok(())
}
