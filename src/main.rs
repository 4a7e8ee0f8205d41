//! Pretzel Compiler
//!
//! Scans Pretzel source and prints the resulting token stream.

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use pretzel::{scan, Token, TokenKind};

/// Pretzel Compiler
#[derive(Parser, Debug)]
#[command(name = "pretzel")]
#[command(author = "apachejuice")]
#[command(version = "0.1.0")]
#[command(about = "Pretzel compiler front-end - prints the token stream of a source")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Source text to scan
    #[arg(value_name = "SOURCE")]
    source: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a source file and print its tokens
    Scan {
        /// Input source file
        input: PathBuf,

        /// Print tokens as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Print every token kind with its spelling
    Kinds,
    /// Print version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Scan { input, json }) => scan_file(input, *json),
        Some(Commands::Kinds) => {
            print_kinds();
            Ok(())
        }
        Some(Commands::Version) => {
            println!("pretzel 0.1.0");
            println!("Pretzel Compiler");
            Ok(())
        }
        None => match &cli.source {
            Some(source) => {
                for token in scan_source(source)? {
                    println!("{}", token);
                }
                Ok(())
            }
            None => Err(anyhow!(
                "Error: No input specified\nUsage: pretzel <SOURCE> or pretzel scan <FILE>"
            )),
        },
    }
}

/// Scan a source file (.pz)
fn scan_file(input: &Path, json: bool) -> anyhow::Result<()> {
    info!("scanning {}", input.display());

    let source = fs::read_to_string(input)
        .with_context(|| format!("Error reading file: {}", input.display()))?;
    debug!("read {} bytes", source.len());

    let tokens = scan_source(&source)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }
    Ok(())
}

fn scan_source(source: &str) -> anyhow::Result<Vec<Token>> {
    scan(source).map_err(|e| anyhow!(e.report()))
}

fn print_kinds() {
    for kind in TokenKind::ALL {
        println!("{}", kind.table_entry());
    }
}
