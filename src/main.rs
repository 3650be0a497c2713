//! Library forms CLI
//!
//! Runs the duplicate checks of one form against a live server and reports
//! whether the form could be saved.
//!
//! ```bash
//! library-forms --form book isbn=9780441013593 title=Dune
//! library-forms --form member --current-id 42 email=sokha@example.org
//! ```

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_forms::{
    config::{AppConfig, LoggingConfig},
    models::{available_copies_for, FieldKey, FieldStatus, FormKind, Verification},
    view::MemoryView,
    AppError, Services,
};

#[derive(Parser)]
#[command(name = "library-forms")]
#[command(version)]
#[command(about = "Check form values against the library duplicate endpoints")]
struct Cli {
    /// Form to validate: book or member
    #[arg(long, short)]
    form: FormKind,

    /// Id of the record being edited (omit for a new record)
    #[arg(long)]
    current_id: Option<String>,

    /// Book form: total copies, to report the defaulted available copies
    #[arg(long)]
    total_copies: Option<String>,

    /// Book form: current available copies
    #[arg(long, default_value = "")]
    available_copies: String,

    /// Values to check, as FIELD=VALUE
    #[arg(required = true, value_parser = parse_pair)]
    values: Vec<(FieldKey, String)>,
}

fn parse_pair(s: &str) -> Result<(FieldKey, String), AppError> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| AppError::BadRequest(format!("expected FIELD=VALUE, got {}", s)))?;
    Ok((field.trim().parse()?, value.to_string()))
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_forms={}", logging.level).into());
    let json = logging.format == "json";

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    init_tracing(&config.logging);
    tracing::info!("library-forms v{}", env!("CARGO_PKG_VERSION"));

    // Reject fields the chosen form does not have
    if let Some((field, _)) = cli.values.iter().find(|(f, _)| !cli.form.contains(*f)) {
        anyhow::bail!("{} is not a field of the {} form", field, cli.form);
    }

    // Create services and form
    let services = Services::new(&config)?;
    let view = Arc::new(MemoryView::new(services.alerts.clone()));
    let form = services.form(cli.form, cli.current_id, Arc::clone(&view));

    // Run the duplicate checks
    for (field, value) in &cli.values {
        form.validate_now(*field, value).await?;
    }

    // Report verdicts
    for (field, entry) in form.snapshot().iter() {
        let verdict = match entry.status {
            FieldStatus::Unvalidated => "not checked",
            FieldStatus::Pending => "pending",
            FieldStatus::Valid(Verification::Confirmed) => "ok",
            FieldStatus::Valid(Verification::FailedOpen) => "unverified (check failed)",
            FieldStatus::Duplicate => "duplicate",
        };
        match view.field(field).message {
            Some(message) => println!("{:<12} {:<28} {}", field.as_str(), verdict, message.text),
            None => println!("{:<12} {}", field.as_str(), verdict),
        }
    }

    if let (FormKind::Book, Some(total)) = (cli.form, cli.total_copies.as_deref()) {
        let available = available_copies_for(total, &cli.available_copies)
            .unwrap_or_else(|| cli.available_copies.clone());
        println!("{:<12} {}", "available", available);
    }

    // Submission guard decides the exit code
    match form.guard_submission() {
        Ok(()) => {
            println!("save enabled");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            for shown in view.alerts() {
                eprintln!(
                    "{} {} {}",
                    shown.alert.kind.icon(),
                    shown.alert.kind.title(),
                    shown.alert.message
                );
            }
            tracing::debug!("{}", e);
            Ok(ExitCode::from(2))
        }
    }
}
