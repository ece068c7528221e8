//! Command-line interface entry point for `pulsedash`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use pulse_dashboard::config::Config;
use pulse_dashboard::info;
use pulse_dashboard::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // Overrides apply to this run only; `config` subcommands reload the stored file
    let mut config = Config::load();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
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
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &Config::get_config_file_path())
        }
        Command::Render {
            source,
            output,
            format,
            sort,
            width,
            height,
            tab,
        } => {
            let request = commands::render::RenderRequest {
                source,
                output,
                format,
                sort,
                width,
                height,
                tab: tab.into(),
            };
            commands::render::run(&request, &config)
        }
        Command::Detail {
            source,
            school,
            theme,
        } => commands::detail::run(source.as_deref(), &school, theme.as_deref(), &config),
    };

    match result {
        Ok(text) => println!("{}", text.trim_end()),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
