//! VSharp front end - CLI

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vsharp_parser::dump::dump;
use vsharp_parser::{parse, tokenize};

/// Parse a VSharp source file and report the first error
#[derive(Parser, Debug)]
#[command(name = "vsharp")]
#[command(version, about, long_about = None)]
struct Args {
  /// Source file to parse
  #[arg(value_name = "FILE")]
  file: PathBuf,

  /// Print the parsed tree
  #[arg(long)]
  emit_ast: bool,

  /// Print the token stream
  #[arg(long)]
  tokens: bool,

  /// Trace parser activity to stderr
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<()> {
  let args = Args::parse();

  if args.verbose || std::env::var_os("RUST_LOG").is_some() {
    let filter = if args.verbose {
      EnvFilter::new("trace")
    } else {
      EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .init();
  }

  let src = std::fs::read_to_string(&args.file)
    .with_context(|| format!("Failed to read: {}", args.file.display()))?;
  let file = args.file.display().to_string();

  if args.tokens {
    for token in tokenize(&src, &file) {
      println!("{}:{} {:?} {:?}", token.line, token.col, token.kind, token.lexeme);
    }
  }

  match parse(&src, &file) {
    Ok(ast) => {
      if args.emit_ast {
        print!("{}", dump(&ast));
      }
      Ok(())
    }
    Err(err) => {
      eprint!("{}", err.render(&src));
      std::process::exit(1);
    }
  }
}
