use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use facdash::{config::Config, logging, ui};
use std::process;

pub fn run(mut cli: Cli) {
    if let Some(command) = cli.command.take() {
        let result = match command {
            Commands::Sections { json } => handle_sections(json),
            Commands::Render { tab, width, height } => {
                load_config(&cli).and_then(|config| handle_render(&config, &tab, width, height))
            }
            Commands::InitConfig => {
                handle_init_config();
                Ok(())
            }
        };
        if let Err(e) = result {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
        return;
    }

    if let Err(e) = launch(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn launch(cli: &Cli) -> Result<()> {
    let mut config = load_config(cli)?;

    let log_path = config.log_path();
    if let Err(e) = logging::init(&config.logging, &log_path, cli.verbose) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    // CLI flag > config
    if let Some(tab) = &cli.tab {
        config.startup.default_tab = tab.clone();
    }

    let registry = ui::NavigationRegistry::faculty();
    if let Err(e) = config.validate(&registry) {
        tracing::warn!(error = %e, "configuration problem, continuing with fallbacks");
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        tab = %config.startup.default_tab,
        "starting facdash"
    );

    ui::run_ui(&config).context("Error running UI")
}

fn handle_sections(json: bool) -> Result<()> {
    let registry = ui::NavigationRegistry::faculty();
    if json {
        let entries: Vec<_> = registry.iter().collect();
        let out = serde_json::to_string_pretty(&entries).context("Failed to serialize sections")?;
        println!("{}", out);
    } else {
        print!("{}", registry.listing());
    }
    Ok(())
}

fn handle_render(config: &Config, tab: &str, width: u16, height: u16) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let frame = ui::headless::render_frame(config, tab, width, height, today)?;
    print!("{}", frame);
    Ok(())
}

fn handle_init_config() {
    match Config::config_path() {
        Ok(path) if path.exists() => match Config::load_from(&path) {
            Ok(cfg) => {
                println!("Config loaded successfully from {}", path.display());
                println!("{:#?}", cfg);
            }
            Err(e) => {
                println!("Config at {} is invalid: {:#}", path.display(), e);
                process::exit(1);
            }
        },
        Ok(path) => {
            println!("Creating default config...");
            if let Err(err) = Config::default().save_to(&path) {
                eprintln!("Failed to save default config: {:#}", err);
                process::exit(1);
            }
            println!("Default config saved to {}", path.display());
        }
        Err(e) => {
            eprintln!("Config directory unknown: {:#}", e);
            process::exit(1);
        }
    }
}
