use std::fs;
use std::process::ExitCode;

use owo_colors::OwoColorize;

use mino_lexer::Lexer;
use mino_parser::Parser;
use mino_syntax::ParseResult;

fn usage() {
    eprintln!("Usage: mino <file.m0>");
}

fn report(path: &str, result: &ParseResult) {
    if result.ok {
        println!("{}: {}", path, "syntax OK".green().bold());
        return;
    }
    for diag in &result.errors {
        eprintln!("{}", diag.to_string().red());
    }
    let count = result.errors.len();
    let noun = if count == 1 { "error" } else { "errors" };
    eprintln!("{}", format!("{} syntax {} found", count, noun).red().bold());
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let path = match args.get(1) {
        Some(p) if !p.starts_with('-') => p.as_str(),
        _ => {
            usage();
            return ExitCode::FAILURE;
        }
    };

    let src = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to read {}: {}", path, e).red()
            );
            return ExitCode::FAILURE;
        }
    };

    let tokens = Lexer::new(&src).tokenize();
    let result = Parser::new(tokens).run();
    report(path, &result);

    if result.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
