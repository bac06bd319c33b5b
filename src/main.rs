//! formstate - interactive runner for the user registration form
//!
//! Reads one command per line from stdin and drives the form engine with
//! it, the way a rendering surface would on user actions.

use anyhow::Result;
use formstate::app::App;
use formstate::config::FormConfig;
use std::io;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formstate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = FormConfig::load()?;
    let mut app = App::new(&config)?;

    let result = run_app(&mut app).await;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(app: &mut App) -> Result<()> {
    println!("{} (type `help` for commands)", app.mode.title());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match app.handle_line(&line).await {
            Ok(output) if output.is_empty() => {}
            Ok(output) => println!("{output}"),
            Err(err) => println!("Error: {err}"),
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
