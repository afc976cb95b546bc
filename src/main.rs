//! prodtui - terminal client for a product catalog service.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, Command};
use std::path::PathBuf;
use std::sync::Arc;

fn cli() -> Command {
    Command::new("prodtui")
        .version(prodtui::VERSION)
        .about("Browse and edit a product catalog from the terminal")
        .long_about(
            "prodtui talks to a REST service exposing /products. Settings are read from \
             the config file and can be overridden on the command line.",
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .value_name("URL")
                .help("Root URL of the product service (default http://localhost:3000)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Config file to read instead of the default location"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Per-request timeout in seconds, 0 disables it"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("NAME")
                .help("Color theme: default, monochrome or high-contrast"),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent unless RUST_LOG is set
    env_logger::init();

    let matches = cli().get_matches();
    let overrides = prodtui::ConfigOverrides {
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        base_url: matches.get_one::<String>("base-url").cloned(),
        request_timeout_secs: matches.get_one::<u64>("timeout").copied(),
        theme: matches.get_one::<String>("theme").cloned(),
    };
    let config = prodtui::AppConfig::load(&overrides).context("loading configuration")?;
    log::info!("using product service at {}", config.base_url);

    use prodtui::render::ui::TerminalUI;
    use prodtui::{Application, HttpProductApi};

    let api = HttpProductApi::new(&config.base_url, config.request_timeout())?;
    let ui_renderer = Box::new(TerminalUI::with_theme(config.color_theme())?);
    let mut app = Application::new(Arc::new(api), ui_renderer, config.base_url.clone());

    app.run().await?;

    Ok(())
}
