use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use page_core::{
    config::parse_intake_url, load_settings, PageController, PageSession, PageView, Settings,
    ValidationPolicy,
};
use shared::domain::{FormField, SubmissionStatus};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{parse_line, Input, HELP};

#[derive(Parser, Debug)]
#[command(about = "Hoori Media landing page, driven from the terminal")]
struct Cli {
    /// Overrides the intake endpoint from site.toml / environment.
    #[arg(long)]
    intake_url: Option<String>,
    /// Refuse to submit while any contact field is blank.
    #[arg(long)]
    strict: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive page session (default).
    Browse,
    /// Fill the contact form and submit it once.
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;
    info!(
        intake_url = %settings.intake_url,
        validation = ?settings.validation,
        "site settings loaded"
    );

    let controller =
        PageController::from_settings(&settings).context("failed to set up intake transport")?;

    match cli.command.unwrap_or(Command::Browse) {
        Command::Browse => browse(controller).await,
        Command::Send {
            name,
            email,
            message,
        } => send_once(controller, name, email, message).await,
    }
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = load_settings().context("failed to load site settings")?;
    if let Some(raw) = &cli.intake_url {
        settings.intake_url = parse_intake_url(raw)?;
    }
    if cli.strict {
        settings.validation = ValidationPolicy::RequireNonEmpty;
    }
    Ok(settings)
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

async fn send_once(
    mut controller: PageController,
    name: String,
    email: String,
    message: String,
) -> Result<()> {
    controller.set_field(FormField::Name, name);
    controller.set_field(FormField::Email, email);
    controller.set_field(FormField::Message, message);
    controller.submit().await;

    let view = PageView::project(controller.state(), current_year());
    if let Some(line) = &view.status_line {
        println!("{line}");
    }
    match &controller.state().status {
        SubmissionStatus::Success => Ok(()),
        other => bail!("contact form was not delivered: {other:?}"),
    }
}

async fn browse(controller: PageController) -> Result<()> {
    let year = current_year();
    let session = PageSession::spawn(controller);
    let mut updates = session.subscribe();

    let painter = tokio::spawn(async move {
        loop {
            let view = PageView::project(&updates.borrow_and_update(), year);
            println!("{}\n", render::render(&view));
            if updates.changed().await.is_err() {
                break;
            }
        }
    });

    println!("{HELP}\n");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Input::Event(event))) => session.send(event).await?,
            Ok(Some(Input::Show)) => {
                println!("{}\n", render::render(&PageView::project(&session.state(), year)));
            }
            Ok(Some(Input::Help)) => println!("{HELP}\n"),
            Ok(Some(Input::Quit)) => break,
            Err(message) => eprintln!("{message}"),
        }
    }

    // Waits for a submission already on the wire before returning.
    let last = session.shutdown().await;
    painter.abort();
    info!(status = ?last.status, "page session closed");
    Ok(())
}
