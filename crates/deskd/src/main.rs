//! deskd - interactive support desk assistant.
//!
//! Hosts the intent router behind a terminal chat loop: read a message,
//! hand it to the controller, print the response.

use anyhow::{Context, Result};
use desk_common::{DeskConfig, HttpOpenAiBackend, TracingEventLog};
use deskd::{Controller, TicketStore};
use std::io::{self, BufRead, Write};
use tracing::{info, Level};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("deskd v{} starting", env!("CARGO_PKG_VERSION"));

    let config = DeskConfig::load();

    let backend =
        HttpOpenAiBackend::new(&config.llm).context("failed to construct the model backend")?;

    let db_path = config.resolved_db_path();
    let store = TicketStore::open(&db_path)
        .with_context(|| format!("failed to open ticket store at {}", db_path.display()))?;

    let controller = Controller::new(Box::new(backend), store, Box::new(TracingEventLog));

    info!(
        "support desk ready (model: {}, database: {})",
        config.llm.model,
        db_path.display()
    );
    println!("Support desk ready. Type a message, or 'quit' to exit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("quit") || message.eq_ignore_ascii_case("exit") {
            break;
        }

        let response = controller.handle_user_input(message, &config.customer_name);
        println!("{response}");
    }

    info!("shutting down");
    Ok(())
}
