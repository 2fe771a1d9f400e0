//! `tagpath`: read and edit a tag-tree document from the command line.
//!
//! Usage:
//!   tagpath get <path>
//!   tagpath set <path> <value> [kind]
//!   tagpath remove <path>
//!   tagpath rename <path> <name>
//!   tagpath json [path]
//!   tagpath from-json
//!
//! The document is read from stdin in literal text (JSON for `from-json`).

use std::io::{self, Read, Write};
use tagpath::cli::{from_json, lookup_path, remove_path, rename_path, set_path, to_json, CliError};

const USAGE: &str = "Usage: tagpath <get|set|remove|rename|json|from-json> [args...]";

fn arg<'a>(args: &'a [String], index: usize, what: &str) -> &'a str {
    match args.get(index) {
        Some(a) => a,
        None => {
            eprintln!("Missing {what}.\n{USAGE}");
            std::process::exit(1);
        }
    }
}

fn run(args: &[String], doc: &str) -> Result<String, CliError> {
    match arg(args, 1, "command") {
        "get" => lookup_path(doc, arg(args, 2, "path")),
        "set" => set_path(
            doc,
            arg(args, 2, "path"),
            arg(args, 3, "value"),
            args.get(4).map(String::as_str),
        ),
        "remove" => remove_path(doc, arg(args, 2, "path")),
        "rename" => rename_path(doc, arg(args, 2, "path"), arg(args, 3, "name")),
        "json" => to_json(doc, args.get(2).map_or("", String::as_str)),
        "from-json" => from_json(doc),
        other => {
            eprintln!("Unknown command: {other}\n{USAGE}");
            std::process::exit(1);
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(&args, buf.trim()) {
        Ok(result) => {
            io::stdout().write_all(result.as_bytes()).unwrap();
            io::stdout().write_all(b"\n").unwrap();
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
