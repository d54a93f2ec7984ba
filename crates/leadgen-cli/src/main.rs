//! Lead machine command line front-end
//!
//! Collects a lead from flags, generates outreach drafts and optionally
//! forwards them to an automation webhook.

use anyhow::Context;
use clap::{Arg, ArgMatches, Command};
use leadgen_core::{
    paths,
    services::validate_lead,
    CreditLedger, EmailGenerator, FileCreditStore, GeminiClient, Lead, LeadField, LeadGenConfig,
    LeadOrchestrator, Notice, WebhookClient,
};
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_DATA_DIR: &str = ".leadgen";

/// Flag name for each lead field, in form order
const LEAD_ARGS: [(LeadField, &str); 5] = [
    (LeadField::CompanyName, "company"),
    (LeadField::ContactName, "contact"),
    (LeadField::ContactEmail, "email"),
    (LeadField::Website, "website"),
    (LeadField::Niche, "niche"),
];

fn cli() -> Command {
    Command::new("leadgen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate personalized outreach emails in seconds with Gemini AI")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .global(true)
                .help("Configuration file path (defaults to <data-dir>/config.json when present)")
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_name("DIR")
                .global(true)
                .help("Directory for local state such as the credit balance")
                .default_value(DEFAULT_DATA_DIR)
        )
        .subcommand(Command::new("credits").about("Show the remaining credits"))
        .subcommand(Command::new("subscribe").about("Replenish credits"))
        .subcommand(
            Command::new("generate")
                .about("Generate outreach emails for a lead")
                .arg(Arg::new("company").long("company").value_name("NAME").required(true).help("Company name, e.g. Acme Inc."))
                .arg(Arg::new("contact").long("contact").value_name("NAME").required(true).help("Contact name, e.g. John Doe"))
                .arg(Arg::new("email").long("email").value_name("EMAIL").required(true).help("Contact email"))
                .arg(Arg::new("website").long("website").value_name("URL").required(true).help("Company website"))
                .arg(Arg::new("niche").long("niche").value_name("TEXT").required(true).help("Industry or niche"))
                .arg(
                    Arg::new("webhook")
                        .long("webhook")
                        .value_name("URL")
                        .env("LEADGEN_WEBHOOK_URL")
                        .help("Make.com (or compatible) webhook URL")
                )
                .arg(
                    Arg::new("send")
                        .long("send")
                        .help("Forward the lead and drafts to the webhook")
                        .action(clap::ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("select")
                        .long("select")
                        .value_name("N")
                        .value_parser(clap::builder::RangedU64ValueParser::<usize>::new().range(1..))
                        .help("Draft to use for --mailto (1-based)")
                )
                .arg(
                    Arg::new("mailto")
                        .long("mailto")
                        .help("Print a mailto: link for the selected draft")
                        .action(clap::ArgAction::SetTrue)
                )
        )
}

fn lead_from_matches(matches: &ArgMatches) -> Lead {
    let mut lead = Lead::default();
    for (field, arg) in LEAD_ARGS {
        if let Some(value) = matches.get_one::<String>(arg) {
            lead.set(field, value.as_str());
        }
    }
    lead
}

fn report(notice: Option<&Notice>) {
    match notice {
        Some(Notice::Error(msg)) => eprintln!("Error: {}", msg),
        Some(Notice::Success(msg)) => println!("Success: {}", msg),
        None => {}
    }
}

/// Skipped at zero credits, where generation is blocked before any call
fn validate_for_generation(config: &LeadGenConfig, credits: u32) -> leadgen_core::Result<()> {
    if credits == 0 {
        return Ok(());
    }
    config.validate()
}

fn config_path(matches: &ArgMatches) -> Option<PathBuf> {
    match matches.get_one::<String>("config") {
        Some(path) => Some(PathBuf::from(path)),
        None => {
            let default = paths::default_config_file();
            default.exists().then_some(default)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with INFO as default if RUST_LOG not set
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();

    let matches = cli().get_matches();

    let data_dir = matches
        .get_one::<String>("data-dir")
        .cloned()
        .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
    if let Err(e) = paths::init_data_root(data_dir.clone()) {
        log::warn!("Data root initialization warning: {}", e);
    }
    log::debug!("Using data directory: {}", data_dir);

    let config_path = config_path(&matches);
    let config = LeadGenConfig::load_unchecked(config_path.as_deref())?;
    if let Some(path) = &config_path {
        log::info!("Loaded configuration from {}", path.display());
    }

    let credits_file = config.credits.state_file();
    let ledger = CreditLedger::open(FileCreditStore::new(&credits_file))
        .with_context(|| format!("Failed to open credit state at {}", credits_file.display()))?;

    let gemini = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let generator = Arc::new(EmailGenerator::new(gemini));
    let forwarder = Arc::new(WebhookClient::new()?);
    let mut app = LeadOrchestrator::new(ledger, generator, forwarder);

    match matches.subcommand() {
        Some(("credits", _)) => {
            println!("Credits: {}", app.credits());
        }
        Some(("subscribe", _)) => {
            let result = app.on_subscribe();
            report(app.notice());
            result?;
        }
        Some(("generate", sub)) => {
            let lead = lead_from_matches(sub);
            if let Err(e) = validate_lead(&lead) {
                eprintln!("Error: {}", e);
                std::process::exit(2);
            }
            validate_for_generation(&config, app.credits())?;

            app.set_lead(lead);
            if let Some(url) = sub.get_one::<String>("webhook") {
                app.set_webhook_url(url.as_str());
            }

            println!("Credits: {}", app.credits());
            if app.on_generate().await.is_err() {
                report(app.notice());
                std::process::exit(1);
            }

            for (i, draft) in app.emails().iter().enumerate() {
                println!("\n=== Email {} ===", i + 1);
                println!("Subject: {}", draft.subject);
                println!("\n{}", draft.body);
            }
            println!("\nCredits remaining: {}", app.credits());

            if let Some(n) = sub.get_one::<usize>("select") {
                app.select_draft(n - 1)?;
            }
            if sub.get_flag("mailto") {
                match app.mailto_for_active() {
                    Some(uri) => println!("\n{}", uri),
                    None => log::warn!("No draft available for a mailto link"),
                }
            }

            if sub.get_flag("send") {
                let sent = app.on_send_to_make().await;
                report(app.notice());
                if sent.is_err() {
                    std::process::exit(1);
                }
            }
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}
