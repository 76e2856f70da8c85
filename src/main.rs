mod action;
mod app;
mod cli;
mod components;
mod config;
mod error;
mod logging;
mod pages;

use color_eyre::eyre::Result;
use cli::Cli;
use config::ConfigManager;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse_args();

    let config_manager = ConfigManager::load(cli.config_dir.clone())?;
    if cli.write_default_config {
        config_manager.write_default_configs()?;
    }

    let general = &config_manager.app_config().general;
    let log_level = cli.log_level.clone().unwrap_or_else(|| general.log_level.clone());
    let log_file = cli.log_file.clone().or_else(|| general.log_file.clone());
    let _log_guard = logging::init(&log_level, log_file.as_deref())?;

    let pages = match cli.pages {
        Some(ref path) => pages::load_pages(path)?,
        None => pages::demo_pages(),
    };

    let mut app = app::App::new(cli, config_manager, pages)?;
    app.run()?;

    Ok(())
}
