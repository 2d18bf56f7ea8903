//! pairscan - find the bracket matching the one at a caret

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use pairscan::syntax::GrammarSet;
use pairscan::{Config, Engine, Error, Result, Selection, TextDocument, Termination};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(found) => process::exit(if found { 0 } else { 2 }),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Parsed command line
struct Args {
    config: Option<PathBuf>,
    language: Option<String>,
    file: PathBuf,
    line: usize,
    character: usize,
}

fn parse_position(arg: &str) -> Result<(usize, usize)> {
    let invalid = || Error::Message(format!("Invalid position {:?}, expected LINE:COL", arg));
    let (line, col) = arg.split_once(':').ok_or_else(invalid)?;
    let line = line.parse().map_err(|_| invalid())?;
    let col = col.parse().map_err(|_| invalid())?;
    Ok((line, col))
}

/// Returns None when help or version was printed
fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let mut config = None;
    let mut language = None;
    let mut positional = Vec::new();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                print_version();
                return Ok(None);
            }
            "--config" | "-c" => {
                let path = iter
                    .next()
                    .ok_or_else(|| Error::Message(format!("{} requires a path", arg)))?;
                config = Some(PathBuf::from(path));
            }
            "--language" | "-l" => {
                let id = iter
                    .next()
                    .ok_or_else(|| Error::Message(format!("{} requires a language id", arg)))?;
                language = Some(id.clone());
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(Error::Message(format!("Unknown option {}", other)));
            }
            _ => positional.push(arg.clone()),
        }
    }

    let [file, position] = positional.as_slice() else {
        return Err(Error::Message("Usage: pairscan [OPTIONS] FILE LINE:COL".to_string()));
    };
    let (line, character) = parse_position(position)?;
    Ok(Some(Args {
        config,
        language,
        file: PathBuf::from(file),
        line,
        character,
    }))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_default(),
    }
}

/// Returns whether a complement was found
fn run() -> Result<bool> {
    let args: Vec<String> = env::args().collect();
    let Some(args) = parse_args(&args)? else {
        return Ok(true);
    };

    let config = load_config(args.config.as_deref())?;
    let grammars = GrammarSet::builtin();
    let language = match args.language {
        Some(id) => id,
        None => grammars
            .detect_language(&args.file)
            .unwrap_or("plaintext")
            .to_string(),
    };
    let doc = TextDocument::from_file(&args.file, language)?;

    let mut engine = Engine::with_grammars(config, grammars);

    let selection = Selection::caret(args.line, args.character);
    match engine.resolve_at(&doc, selection) {
        Some(pair) => match (&pair.end, pair.termination) {
            (Some(end), _) => {
                println!(
                    "{}:{} {:?} -> {}:{} {:?}",
                    pair.start.line, pair.start.index, pair.start.token, end.line, end.index, end.token
                );
                Ok(true)
            }
            (None, Termination::TimedOut) => {
                println!("no match (timed out)");
                Ok(false)
            }
            (None, _) => {
                println!("no match");
                Ok(false)
            }
        },
        None => {
            println!("no bracket at {}:{}", args.line, args.character);
            Ok(false)
        }
    }
}

fn print_usage() {
    println!("pairscan {} - bracket pair resolution", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: pairscan [OPTIONS] FILE LINE:COL");
    println!();
    println!("LINE and COL are zero-based; COL counts characters.");
    println!();
    println!("Options:");
    println!("  -c, --config PATH    Read settings from PATH instead of ~/.pairscan.toml");
    println!("  -l, --language ID    Language identifier (default: from file extension)");
    println!("  -h, --help           Show this help message");
    println!("  -V, --version        Show version information");
    println!();
    println!("Set RUST_LOG=debug to trace resolutions.");
}

fn print_version() {
    println!("pairscan {}", env!("CARGO_PKG_VERSION"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("pairscan")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(&args(&["-l", "rust", "main.rs", "3:14"])).unwrap().unwrap();
        assert_eq!(parsed.language.as_deref(), Some("rust"));
        assert_eq!(parsed.file, PathBuf::from("main.rs"));
        assert_eq!((parsed.line, parsed.character), (3, 14));
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(&args(&["main.rs"])).is_err());
        assert!(parse_args(&args(&["main.rs", "3"])).is_err());
        assert!(parse_args(&args(&["main.rs", "a:1"])).is_err());
        assert!(parse_args(&args(&["--bogus", "main.rs", "0:0"])).is_err());
        assert!(parse_args(&args(&["main.rs", "0:0", "-c"])).is_err());
    }
}
