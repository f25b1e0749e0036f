//! fauxchat — fabricate a fake messenger conversation in the terminal and
//! export it as a screenshot-like text capture.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use fauxchat_models::{ClockTime, Contact, PhoneStatus};

mod app;
mod export;
mod tui;
mod view;

use app::{AppController, ComposerApp};
use tui::EventHandler;

/// Fake-chat screenshot composer.
#[derive(Parser, Debug)]
#[command(name = "fauxchat", about = "Fake-chat screenshot composer")]
struct Args {
    /// Contact name shown in the conversation header.
    #[arg(long, default_value = "Contato")]
    contact: String,

    /// Presence line under the contact name.
    #[arg(long, default_value = "online")]
    status: String,

    /// Status-bar time, HH:MM; also seeds the organizer clock.
    #[arg(long, default_value = "14:58")]
    time: String,

    /// Battery percentage shown in the status bar.
    #[arg(long, default_value_t = 87)]
    battery: u16,

    /// Script file to preload into the paste box.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log file (stdout belongs to the TUI).
    #[arg(long, default_value = "fauxchat.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Structured logging (controlled via RUST_LOG), routed to a file.
    let log = std::fs::File::create(&args.log_file)
        .with_context(|| format!("failed to create log file {}", args.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log))
        .with_ansi(false)
        .init();

    let clock: ClockTime = args.time.parse()?;
    let phone = PhoneStatus::new(clock, args.battery)?;
    let contact = Contact::new(args.contact, args.status);

    let script_draft = match args.script {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read script file {}", path.display()))?,
        None => String::new(),
    };

    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(200);
    let mut app = ComposerApp::new(phone, contact, script_draft, events.sender());

    let result = run(&mut terminal, &mut events, &mut app).await;
    tui::restore()?;
    result
}

async fn run(
    terminal: &mut tui::Tui,
    events: &mut EventHandler,
    app: &mut ComposerApp,
) -> anyhow::Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| app.render(f))?;
        match events.next().await {
            Some(action) => app.update(action),
            None => break,
        }
    }
    Ok(())
}
