//! Terminal chat client.
//!
//! Runs the questionnaire against a live server: reads answers line by line,
//! paces the bot's messages with their scheduled reveal delays, and prints
//! the recommendation when the submission comes back.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use evento::adapters::gateway::HttpSubmissionGateway;
use evento::application::dialogue::DialogueEngine;
use evento::config::ClientConfig;
use evento::domain::catalog::QuestionCatalog;
use evento::domain::dialogue::{DialoguePhase, DialogueSession, Speaker};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = ClientConfig::load()?;
    config.validate()?;

    let catalog = match &config.catalog_path {
        Some(path) => Arc::new(QuestionCatalog::from_yaml_file(path)?),
        None => Arc::new(QuestionCatalog::default_catalog().clone()),
    };

    let name = std::env::args().nth(1);
    let session = DialogueSession::with_catalog(catalog, None, name);
    let gateway = HttpSubmissionGateway::new(&config.server_url);
    let mut engine = DialogueEngine::new(session, gateway);

    engine.start();
    let mut printed = render(&engine, 0);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        let next_due = engine.next_due();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                engine.handle_input(&line).await;
                printed = render(&engine, printed);
            }
            _ = sleep_until_due(next_due), if next_due.is_some() => {
                engine.fire_due(tokio::time::Instant::now());
                printed = render(&engine, printed);
            }
        }
    }

    Ok(())
}

async fn sleep_until_due(due: Option<tokio::time::Instant>) {
    match due {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Prints transcript entries past the watermark and returns the new one.
fn render<G>(engine: &DialogueEngine<G>, watermark: usize) -> usize {
    let entries = engine.session().transcript().entries();
    for entry in &entries[watermark..] {
        match entry.speaker {
            Speaker::Bot => println!("🤖 {}", entry.text),
            Speaker::User => println!("   > {}", entry.text),
        }
    }
    if engine.session().phase() == DialoguePhase::Confirming && engine.next_due().is_none() {
        print!("(sí/no) ");
        let _ = std::io::stdout().flush();
    }
    entries.len()
}
