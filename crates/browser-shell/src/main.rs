use anyhow::{Context, Result};
use browser_config::AppConfig;
use browser_engine::HeadlessEngine;
use browser_state::{
    BrowserState, EngineMiddleware, LastAccessMiddleware, LogTelemetrySink, LoggingMiddleware,
    Middleware, Store, TabListAction, TelemetryMiddleware,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::runtime::Handle;

mod commands;
mod logger;
mod shell;

use commands::Command;
use shell::{Outcome, Shell};

/// Middleware in the order every action passes through them
fn middleware(config: &AppConfig) -> Vec<Box<dyn Middleware>> {
    let mut middleware: Vec<Box<dyn Middleware>> = Vec::new();
    if config.log_actions {
        middleware.push(Box::new(LoggingMiddleware::new()));
    }
    middleware.push(Box::new(EngineMiddleware::new(
        Arc::new(HeadlessEngine::new()),
        Handle::current(),
    )));
    middleware.push(Box::new(LastAccessMiddleware::new()));
    if config.telemetry {
        middleware.push(Box::new(TelemetryMiddleware::new(Arc::new(LogTelemetrySink))));
    }
    middleware
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_file = logger::init()?;

    log::info!("Starting browser-shell, logging to {}", log_file.display());

    let config = AppConfig::load();
    let store = Store::new(BrowserState::default(), middleware(&config))
        .context("Failed to start browser store")?;
    store.dispatch(TabListAction::RestoreComplete);

    let result = run(Shell::new(store, config)).await;

    log::info!("Exiting browser-shell");
    result
}

async fn run(mut shell: Shell) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"browser-shell - type help for a list of commands\n")
        .await?;
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let output = match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => match shell.execute(command).await {
                Ok(Outcome::Continue(output)) => output,
                Ok(Outcome::Quit) => break,
                Err(e) => {
                    log::warn!("Command failed: {:#}", e);
                    format!("error: {:#}", e)
                }
            },
            Err(e) => format!("error: {:#}", e),
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    Ok(())
}
