//! Configuration command.

use crate::config;

/// Print the config path and the effective configuration
pub fn cmd_config(init: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if init {
        match &path {
            Some(path) if path.exists() => {
                println!("Config already exists: {}", path.display());
            }
            _ => {
                let written = config::save(&config::Config::default())?;
                println!("Wrote default config to {}", written.display());
            }
        }
        println!();
    }

    match &path {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config directory available, using defaults)"),
    }
    print!("{}", toml::to_string_pretty(&config::load())?);
    Ok(())
}
