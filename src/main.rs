#![warn(clippy::pedantic)]

mod app;
mod backend;
mod catalog;
mod command;
mod config;
mod request;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::App;
use crate::backend::Backend;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    config::init().context("Failed to read configuration")?;
    let config = config::get();

    let backend = Backend::new(&config.backend_host)?;
    let mut app = App::new(
        backend,
        config.default_engine.clone(),
        PathBuf::from(&config.download_dir),
    );

    println!("console-tts, backend {}", config.backend_host);
    app.reload_catalog().await;
    println!("Type text to convert it to speech, /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;

        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => line.context("Failed to read input")?,
        };

        let Some(line) = line else {
            break;
        };

        let Some(command) = command::parse(&line) else {
            continue;
        };

        if !app.handle(command).await {
            break;
        }
    }

    println!("Bye.");

    Ok(())
}

fn prompt() -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;

    Ok(())
}
