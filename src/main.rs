//! modeterm - modal editing over a terminal session

mod check;
mod config;
mod error;
#[cfg(feature = "tui")]
mod playground;

use anyhow::Context;
use modeterm_core::SyncPolicy;
use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "MODETERM_LOG";

fn print_usage() {
    eprintln!("Usage: modeterm [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>           Load the integration config from a TOML file");
    eprintln!("  --no-user-config          Ignore the config in the user's config dir");
    eprintln!("  --policy <name>           hooks-only (default) or sync-before-delegate");
    eprintln!("  --log <path>              Write logs to a file ({} sets the filter)", LOG_ENV);
    eprintln!("  --check                   Print the terminal overlay and exit (non-interactive)");
    eprintln!("  --plain                   Playground surface without a terminal session");
    eprintln!("  -h, --help                Print help");
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// The playground owns the terminal, so logs only ever go to a file.
fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install logger: {}", err))?;
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut config_file: Option<PathBuf> = None;
    let mut use_user_config = true;
    let mut policy: Option<SyncPolicy> = None;
    let mut log_file: Option<PathBuf> = None;
    let mut check_only = false;
    let mut terminal_backed = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
                config_file = Some(PathBuf::from(&args[i]));
            }
            "--no-user-config" => use_user_config = false,
            "--policy" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --policy requires a value");
                    std::process::exit(1);
                }
                match SyncPolicy::from_name(&args[i]) {
                    Some(p) => policy = Some(p),
                    None => {
                        eprintln!("Error: Unknown policy: {}", args[i]);
                        print_usage();
                        std::process::exit(1);
                    }
                }
            }
            "--log" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --log requires a file path");
                    std::process::exit(1);
                }
                log_file = Some(PathBuf::from(&args[i]));
            }
            "--check" => check_only = true,
            "--plain" => terminal_backed = false,
            arg => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(e) = init_logging(log_file.as_ref()) {
        eprintln!("Warning: {:#}", e);
    }

    let (mut config, warnings) = config::load_config(config_file.as_ref(), use_user_config);
    for warning in warnings {
        tracing::warn!("{}", warning);
        eprintln!("Warning: {}", warning);
    }
    if let Some(policy) = policy {
        config.policy = policy;
    }

    if check_only {
        match check::render_overlay(&config) {
            Ok(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    #[cfg(feature = "tui")]
    {
        if let Err(e) = playground::run(config, terminal_backed) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "tui"))]
    {
        let _ = (config, terminal_backed);
        eprintln!("Error: built without the tui feature; only --check is available");
        std::process::exit(1);
    }
}
