use clap::{Arg, ArgAction, Command};
use rlox::{repl, runner};
use std::fs;
use std::path::Path;
use std::process;

fn main() {
    let matches = Command::new("rlox")
        .about("A tree-walking interpreter for the Lox expression language")
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("pretty")
                .short('p')
                .long("pretty")
                .help("Render diagnostics as annotated source reports")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let pretty = matches.get_flag("pretty");

    if let Some(file_path) = matches.get_one::<String>("file") {
        run_file(file_path, pretty);
    } else {
        repl::start(pretty);
    }
}

fn run_file(path: &str, pretty: bool) {
    let path = Path::new(path);

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error reading file '{}': {}", path.display(), error);
            process::exit(64);
        }
    };

    let outcome = runner::run(&source, path.to_str(), pretty);
    if outcome.had_error {
        process::exit(65);
    }
    if outcome.had_runtime_error {
        process::exit(70);
    }
}
