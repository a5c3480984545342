//! CLI entry point for biringan
//!
//! Plays a story document in the terminal or validates one.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use biringan::cli::play::PlayOptions;
use biringan::config::{self, GameConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    match command.as_str() {
        "play" => {
            let Some(file) = args.get(2).filter(|a| !a.starts_with("--")) else {
                eprintln!("Error: Missing story file path");
                eprintln!();
                print_usage();
                process::exit(1);
            };
            let flags = match PlayFlags::parse(&args[3..]) {
                Ok(flags) => flags,
                Err(message) => {
                    eprintln!("Error: {}", message);
                    eprintln!();
                    print_usage();
                    process::exit(1);
                }
            };
            init_logging(flags.debug);
            run_play(PathBuf::from(file), flags);
        }
        "check" => {
            let Some(file) = args.get(2) else {
                eprintln!("Error: Missing story file path");
                eprintln!();
                print_usage();
                process::exit(1);
            };
            init_logging(false);
            run_check(Path::new(file));
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("biringan - Escape from Biringan terminal player");
    println!();
    println!("USAGE:");
    println!("    biringan play <story.md> [--debug] [--config <file>]");
    println!("    biringan check <story.md>");
    println!();
    println!("COMMANDS:");
    println!("    play <file>     Play a story in the terminal");
    println!("    check <file>    Validate a story and print a summary");
    println!("    --help, -h      Show this help message");
    println!();
    println!("OPTIONS:");
    println!("    --debug            Debug logging and effect traces");
    println!("    --config <file>    JSON configuration file");
    println!();
    println!("ENVIRONMENT:");
    println!("    {}      Save file path", config::ENV_SAVE);
    println!("    {}     Text speed (1x, 2x, 3x)", config::ENV_SPEED);
    println!("    {}    Asset directory", config::ENV_ASSETS);
    println!("    {}     Enable debug logging", config::ENV_DEBUG);
    println!();
    println!("EXAMPLES:");
    println!("    biringan play stories/biringan.md");
    println!("    biringan check stories/biringan.md");
}

struct PlayFlags {
    debug: bool,
    config: Option<PathBuf>,
}

impl PlayFlags {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut flags = PlayFlags {
            debug: false,
            config: None,
        };
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--debug" => flags.debug = true,
                "--config" => {
                    let path = iter.next().ok_or("--config needs a file path")?;
                    flags.config = Some(PathBuf::from(path));
                }
                other => return Err(format!("Unknown option '{}'", other)),
            }
        }
        Ok(flags)
    }
}

fn init_logging(debug: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            let level = if debug || config::debug_requested() {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            };
            builder.filter_level(level);
        }
    }
    if builder.try_init().is_err() {
        eprintln!("Warning: logger already initialised");
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    let config = match path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

fn read_story(file_path: &Path) -> String {
    match fs::read_to_string(file_path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error: Failed to read file '{}'", file_path.display());
            eprintln!("Reason: {}", err);
            process::exit(1);
        }
    }
}

fn run_play(file_path: PathBuf, flags: PlayFlags) {
    let markdown = read_story(&file_path);

    let config = match load_config(flags.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: Invalid configuration");
            eprintln!("Reason: {}", err);
            process::exit(1);
        }
    };
    let debug = flags.debug || config::debug_requested();

    if let Err(err) = biringan::cli::play::run_play(&markdown, PlayOptions { debug, config }) {
        eprintln!("Error: Player mode failed");
        eprintln!("Reason: {}", err);
        process::exit(1);
    }
}

fn run_check(file_path: &Path) {
    let markdown = read_story(file_path);

    if let Err(err) = biringan::cli::check::run_check(&markdown) {
        eprintln!("Error: '{}' is not a valid story", file_path.display());
        eprintln!("Reason: {}", err);
        process::exit(1);
    }
}
