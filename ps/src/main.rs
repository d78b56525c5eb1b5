use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;

use promptstore::binding::TemplateValues;
use promptstore::cli::{Cli, Command};
use promptstore::config::Config;
use promptstore::manager::Manager;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let prompt_dir = cli.dir.unwrap_or(config.prompt_dir);

    info!("promptstore starting");

    match cli.command {
        Command::List => {
            let manager = Manager::from_dir(&prompt_dir)?;
            if manager.is_empty() {
                println!("No prompt files found");
            } else {
                for name in manager.names() {
                    println!("{}", name);
                }
            }
        }
        Command::Show { name } => {
            let manager = Manager::from_dir(&prompt_dir)?;
            let prompt_file = manager.get(&name).ok_or_else(|| eyre!("prompt not found: {}", name))?;
            print!("{}", prompt_file.serialize()?);
        }
        Command::Render {
            name,
            values,
            system,
            user,
        } => {
            let manager = Manager::from_dir(&prompt_dir)?;
            let prompt_file = manager.get(&name).ok_or_else(|| eyre!("prompt not found: {}", name))?;

            let values: TemplateValues = match values {
                Some(raw) => serde_json::from_str(&raw).context("Failed to parse --values")?,
                None => TemplateValues::new(),
            };

            if !user {
                let rendered = prompt_file.system_prompt(&values)?;
                if !rendered.is_empty() {
                    println!("{}", "system:".cyan());
                    println!("{}", rendered);
                }
            }
            if !system {
                let rendered = prompt_file.user_prompt(&values)?;
                println!("{}", "user:".cyan());
                println!("{}", rendered);
            }
        }
        Command::Check => {
            let manager = Manager::from_dir(&prompt_dir)?;
            println!("{} {} prompt files loaded", "✓".green(), manager.len());
        }
    }

    Ok(())
}
