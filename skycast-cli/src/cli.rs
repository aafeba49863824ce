use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use skycast_core::{CityBook, Config, DisplayController, WeatherFetcher, client_from_config};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather widget for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the provider access token and endpoint.
    Configure,

    /// Fetch and render one city, then exit.
    Show {
        /// City name from the enumerated set, e.g. "上海".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Show { city }) => show_once(&city).await,
            None => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let token = Password::new("Provider access token:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Token prompt aborted")?;

    let base_url = Text::new("Provider base URL:")
        .with_default(&config.base_url)
        .prompt()
        .context("Base URL prompt aborted")?;

    config.token = Some(token);
    config.base_url = base_url.trim_end_matches('/').to_string();
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show_once(city: &str) -> anyhow::Result<()> {
    let config = Config::load()?;
    let book = CityBook::from_config(&config);

    let code = book
        .code_for(city)
        .ok_or_else(|| {
            anyhow!("Unknown city '{city}'. Known cities: {}", book.names().join("、"))
        })?
        .to_owned();

    let client = client_from_config(&config)?;
    let mut controller = DisplayController::new();

    let generation = controller.begin_fetch();
    println!("{}", render::loading());

    controller.apply(generation, client.fetch(&code).await);
    println!("{}", render::state(city, controller.state()));

    Ok(())
}

/// The widget loop: select a city, fetch, render, re-prompt. Esc exits.
async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let book = CityBook::from_config(&config);
    let client = client_from_config(&config)?;
    let mut controller = DisplayController::new();

    loop {
        let names: Vec<String> = book.names().iter().map(|n| (*n).to_string()).collect();

        let Some(city) = Select::new("选择城市", names)
            .prompt_skippable()
            .context("City prompt failed")?
        else {
            break;
        };

        // The menu is populated from the book, so the lookup always succeeds.
        let Some(code) = book.code_for(&city).map(str::to_owned) else {
            continue;
        };

        let generation = controller.begin_fetch();
        println!("{}", render::loading());

        controller.apply(generation, client.fetch(&code).await);
        println!("{}", render::state(&city, controller.state()));
    }

    Ok(())
}
