//! Command-line interface entry point for `MatricPulse`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use matric_pulse::config::Config;
use matric_pulse::info;
use matric_pulse::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty())
        .then(|| std::path::PathBuf::from(&config.logging.file));

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &config, &defaults);
        }
        Command::Score {
            subjects,
            file,
            format,
            output,
            save,
            match_prompt,
        } => {
            let options = commands::score::ScoreOptions {
                subject_args: subjects,
                file,
                format: format.into(),
                output,
                save,
                match_prompt,
            };
            if let Err(e) = commands::score::run(&options, &config) {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Command::Catalog { languages } => commands::catalog::run(languages),
    }
}
