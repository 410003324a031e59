// Author: KeiraOMG0
// License: GPL-3.0-or-later

//! The `ker` command line: formatting and JSON conversion over files or stdio.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use thiserror::Error;

use ker::{FormatOptions, KerError};

/// Static facts about the program, handed to [`run`] by `main`.
#[derive(Debug, Clone, Copy)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub author: &'static str,
    pub goal: &'static str,
}

#[derive(Debug, Parser)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print the version and exit
    #[arg(long)]
    version: bool,

    /// Print the author and exit
    #[arg(long)]
    author: bool,

    /// Print version, author and project goal
    #[arg(long)]
    info: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Format a .ker file to canonical .ker
    Fmt {
        /// .ker file to format (use - for stdin)
        input: String,
        /// Output file (default stdout)
        #[arg(default_value = "-")]
        output: String,
        /// Spaces per nesting level
        #[arg(short, long, default_value_t = 4)]
        indent: usize,
    },

    /// Convert .ker to JSON
    ToJson {
        /// .ker file to convert (use - for stdin)
        input: String,
        /// Output JSON file (default stdout)
        #[arg(default_value = "-")]
        output: String,
        /// JSON indent
        #[arg(short, long, default_value_t = 2)]
        indent: usize,
    },

    /// Convert JSON to .ker
    FromJson {
        /// JSON file to convert (use - for stdin)
        input: String,
        /// Output .ker file (default stdout)
        #[arg(default_value = "-")]
        output: String,
        /// Spaces per nesting level
        #[arg(short, long, default_value_t = 4)]
        indent: usize,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("{path}: {source}")]
    Io { path: String, source: io::Error },
    #[error(transparent)]
    Ker(#[from] KerError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound(_) => 2,
            CliError::Io { .. } | CliError::Ker(_) => 1,
        }
    }
}

/// Run the CLI over `args` (program name first) and return the exit code.
pub fn run<I>(app: &AppInfo, args: I) -> i32
where
    I: IntoIterator<Item = OsString>,
{
    let args: Vec<OsString> = args.into_iter().collect();
    if args.len() <= 1 {
        println!("{} {} by {}", app.name, app.version, app.author);
        println!("Run '{} -h' for help", app.name);
        return 0;
    }

    let mut command = Cli::command()
        .name(app.name)
        .bin_name(app.name)
        .about(format!("`.ker` CLI: {}", app.goal));
    let cli = match command
        .try_get_matches_from_mut(args)
        .and_then(|matches| Cli::from_arg_matches(&matches))
    {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return e.exit_code();
        }
    };

    if cli.version {
        println!("{}", app.version);
        return 0;
    }
    if cli.author {
        println!("{}", app.author);
        return 0;
    }
    if cli.info {
        println!("{} {}", app.name, app.version);
        println!("Author: {}", app.author);
        println!("Goal: {}", app.goal);
        return 0;
    }

    let Some(subcommand) = cli.command else {
        let _ = command.print_help();
        return 1;
    };

    match execute(subcommand) {
        Ok(()) => 0,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn execute(command: Command) -> Result<(), CliError> {
    tracing::debug!(?command, "running");
    match command {
        Command::Fmt {
            input,
            output,
            indent,
        } => {
            let doc = ker::parse_document(&read_input(&input)?)?;
            let text = ker::format_document_with(&doc, &FormatOptions::with_indent(indent));
            write_output(&output, &text)
        }
        Command::ToJson {
            input,
            output,
            indent,
        } => {
            let doc = ker::parse_document(&read_input(&input)?)?;
            let mut text = ker::to_json_string(&doc, indent);
            text.push('\n');
            write_output(&output, &text)
        }
        Command::FromJson {
            input,
            output,
            indent,
        } => {
            let doc = ker::from_json_str(&read_input(&input)?)?;
            let text = ker::format_document_with(&doc, &FormatOptions::with_indent(indent));
            write_output(&output, &text)
        }
    }
}

fn read_input(path: &str) -> Result<String, CliError> {
    let mut text = String::new();
    let result = if path == "-" {
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };

    result.map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => CliError::NotFound(path.to_string()),
        _ => CliError::Io {
            path: path.to_string(),
            source,
        },
    })
}

fn write_output(path: &str, text: &str) -> Result<(), CliError> {
    let result = if path == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush())
    } else {
        fs::write(path, text)
    };

    result.map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })
}
