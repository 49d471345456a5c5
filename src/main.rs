//! VeraCore Order Upload - command-line entry point.
//!
//! Loads an order CSV, consolidates it, submits every order to VeraCore and
//! mails the failures.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use veracore_order_upload::csv_processor::summarize;
use veracore_order_upload::{
    AppConfig, ConsolidatedOrder, Credentials, CsvProcessor, EmailTemplate, ErrorLog,
    ErrorReport, GraphMailApi, SubmissionOutcome, SubmissionSummary, UploadError, VeraCoreApi,
};

const EXIT_FAILURE: u8 = 1;
const EXIT_INPUT_ERROR: u8 = 2;
const EXIT_CREDENTIALS_REJECTED: u8 = 3;

/// Consolidates an order CSV and submits it to VeraCore
#[derive(Parser, Debug)]
#[command(name = "veracore_order_upload")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the order CSV file
    #[arg(long)]
    csv: PathBuf,

    /// VeraCore web user
    #[arg(short, long, env = "VERACORE_USER", default_value = "")]
    user: String,

    /// VeraCore web user password
    #[arg(short, long, env = "VERACORE_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Build and log the requests without calling any API
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Do not mail the error report
    #[arg(long, default_value_t = false)]
    no_email: bool,

    /// Local error log (overrides ERROR_LOG_PATH)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_environment(None);

    let args = Args::parse();
    log::info!("Starting veracore_order_upload...");

    let credentials = Credentials::new(args.user.trim(), args.password.as_str());
    if !credentials.is_complete() {
        eprintln!("Please input the credentials needed as a web user");
        return ExitCode::from(EXIT_INPUT_ERROR);
    }

    let mut config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            return ExitCode::from(EXIT_INPUT_ERROR);
        }
    };
    if let Some(path) = args.log_file.clone() {
        config.error_log_path = path;
    }
    log::debug!("Configuration: {config:?}");

    let orders = match load_orders(&args).await {
        Ok(orders) => orders,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            return ExitCode::from(exit_code_for(&e));
        }
    };

    let api = VeraCoreApi::new(&config.veracore, credentials);
    let entry_date = chrono::Local::now().naive_local();

    let (summary, report) = if args.dry_run {
        api.simulate_orders(&orders, entry_date)
    } else {
        api.submit_orders(&orders, entry_date).await
    };

    print_results(&summary);

    if !report.is_empty() {
        deliver_report(&args, &config, &report).await;
    }

    if summary.credentials_rejected {
        ExitCode::from(EXIT_CREDENTIALS_REJECTED)
    } else {
        ExitCode::SUCCESS
    }
}

/// Loads `.env` (the given file, or the usual lookup), then initializes
/// logging so a `RUST_LOG` from the file takes effect. Returns the active
/// level filter.
fn init_environment(env_file: Option<&Path>) -> log::LevelFilter {
    let dotenv = match env_file {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };

    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();
    let filter = logger.filter();
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(filter);
    }

    if let Err(e) = dotenv {
        log::debug!("No .env file loaded: {e}");
    }
    filter
}

/// Loads and consolidates the CSV, logging the upload summary.
async fn load_orders(args: &Args) -> Result<Vec<ConsolidatedOrder>, UploadError> {
    let processor = CsvProcessor::new();
    let lines = processor.load_lines_from_csv(&args.csv).await?;

    for row in summarize(&lines) {
        log::info!(
            "Order {} | Offer {} | Version {} | Qty {}",
            row.order_id,
            row.offer_id,
            row.version,
            row.quantity
        );
    }

    let orders = processor.consolidate(&lines)?;
    log::info!(
        "{} lines consolidated into {} orders",
        lines.len(),
        orders.len()
    );
    Ok(orders)
}

fn exit_code_for(error: &UploadError) -> u8 {
    match error {
        UploadError::MissingHeaders(_)
        | UploadError::InconsistentVersions(_)
        | UploadError::InvalidQuantity { .. }
        | UploadError::Config(_) => EXIT_INPUT_ERROR,
        UploadError::Csv(_) | UploadError::Io(_) => EXIT_FAILURE,
    }
}

fn print_results(summary: &SubmissionSummary) {
    for result in &summary.results {
        match &result.outcome {
            SubmissionOutcome::Created => {
                println!("Order {} ({}): created", result.order_id, result.company_name)
            }
            SubmissionOutcome::UpdatedExisting => println!(
                "Order {} ({}): already existed, updated",
                result.order_id, result.company_name
            ),
            SubmissionOutcome::Simulated => println!(
                "Order {} ({}): simulated",
                result.order_id, result.company_name
            ),
            SubmissionOutcome::Failed { kind, message } => println!(
                "Order {} ({}): FAILED [{}] {}",
                result.order_id,
                result.company_name,
                kind.as_str(),
                message
            ),
        }
    }
    println!(
        "{} successful, {} failed",
        summary.success_count(),
        summary.failure_count()
    );
    if summary.credentials_rejected {
        println!("VeraCore rejected the credentials. Please check user and password.");
    }
}

async fn deliver_report(args: &Args, config: &AppConfig, report: &ErrorReport) {
    for (order_id, text) in report.errors() {
        log::warn!("Order {order_id}: {text}");
    }

    if args.no_email || args.dry_run {
        log::info!("Error report not mailed");
        return;
    }

    let Some(mail) = &config.mail else {
        log::warn!("Mail is not configured, error report not mailed");
        return;
    };

    let error_log = ErrorLog::new(config.error_log_path.clone());
    let mailer = GraphMailApi::new(mail, error_log);
    let template = EmailTemplate::new(mail.recipients.clone());
    let status = mailer.send_error_report(report, &template).await;

    if status.sent {
        log::info!("Error report mailed to {}", template.recipients.join(", "));
    } else {
        log::warn!(
            "Error report not delivered, see {}",
            config.error_log_path.display()
        );
    }
}
