//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for
//! cssevents.

use clap::{Parser as ClapParser, ValueEnum};

/// Struct containing the CLI configuration for cssevents.
#[derive(ClapParser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the stylesheet to parse. Reads from stdin if omitted.
    #[arg(index = 1)]
    pub file: Option<std::path::PathBuf>,

    /// Emit each event as a line of JSON instead of a human-readable form.
    #[arg(long)]
    pub json: bool,

    /// Recognize the IE star hack (`*property: value`).
    #[arg(long)]
    pub star_hack: bool,

    /// Recognize the IE underscore hack (`_property: value`).
    #[arg(long)]
    pub underscore_hack: bool,

    /// Recognize IE `progid:...(...)` filter functions as term values.
    #[arg(long)]
    pub ie_filters: bool,

    /// Propagate the first syntax error instead of recovering at the
    /// nearest ruleset/declaration boundary.
    #[arg(long)]
    pub strict: bool,

    /// Specify the log level of the parser.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of cssevents.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also log recovered syntax errors.
    #[value(alias("1"))]
    Warn,

    /// Also log information about the general state of the parse.
    #[value(alias("2"))]
    Info,

    /// Log every token produced, including hidden ones.
    #[value(alias("3"))]
    Debug,

    /// Log extra internal detail. Note: this output can be quite clunky.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
