use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::{info, warn};

use transfer_review::config::AppConfig;
use transfer_review::error::AppError;
use transfer_review::review::{DepartmentRouter, RuleDescriber, RuleKey, TransferRule};
use transfer_review::snapshot::{self, Snapshot};
use transfer_review::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "transfer-review",
    about = "Describe transfer rules and route them to the departments that should review them",
    version
)]
struct Cli {
    /// Directory of catalog snapshot CSV exports (defaults to REVIEW_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the natural-language description of one rule
    Describe(RuleArgs),
    /// Print the reviewing department for one rule
    Route(RuleArgs),
    /// Describe and route every rule in the snapshot
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct RuleArgs {
    /// Rule key in source:destination:subject_area:group_number form
    #[arg(long)]
    rule: String,
    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Write the report here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Also export rule descriptions as CSV
    #[arg(long)]
    descriptions: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or(config.data_dir);
    let snapshot = snapshot::load_dir(&data_dir)?;
    info!(
        rules = snapshot.rules.len(),
        institutions = snapshot.institutions.len(),
        "snapshot loaded"
    );

    match cli.command {
        Command::Describe(args) => describe_one(&snapshot, &args),
        Command::Route(args) => route_one(&snapshot, &args),
        Command::Report(args) => report(&snapshot, &args),
    }
}

fn lookup<'a>(snapshot: &'a Snapshot, key: &str) -> Result<&'a TransferRule, AppError> {
    let key = RuleKey::parse(key)?;
    snapshot
        .rule(&key)
        .ok_or_else(|| AppError::UnknownRule(key.to_string()))
}

fn describe_one(snapshot: &Snapshot, args: &RuleArgs) -> Result<(), AppError> {
    let rule = lookup(snapshot, &args.rule)?;
    let describer = RuleDescriber::new(snapshot.institutions.clone());
    let description = describer.describe(rule)?;

    if args.json {
        println!(
            "{}",
            json!({ "rule_key": rule.key.to_string(), "description": description })
        );
    } else {
        println!("{}: {}", rule.key, description);
    }
    Ok(())
}

fn route_one(snapshot: &Snapshot, args: &RuleArgs) -> Result<(), AppError> {
    let rule = lookup(snapshot, &args.rule)?;
    let router = DepartmentRouter::new(snapshot.context.clone());
    let result = router.route(rule)?;

    if args.json {
        println!(
            "{}",
            json!({
                "rule_key": result.rule_key.to_string(),
                "department": result.routing.department(),
                "details": result.routing.detail(),
            })
        );
    } else {
        println!(
            "{:<20} {:<10} {}",
            result.rule_key.to_string(),
            result.routing.department(),
            result.routing.detail()
        );
    }
    Ok(())
}

fn report(snapshot: &Snapshot, args: &ReportArgs) -> Result<(), AppError> {
    let describer = RuleDescriber::new(snapshot.institutions.clone());
    let router = DepartmentRouter::new(snapshot.context.clone());

    let mut assignments = Vec::new();
    let mut descriptions = Vec::new();
    let mut skipped = 0usize;

    for rule in &snapshot.rules {
        match router.route(rule) {
            Ok(result) => assignments.push(format!(
                "{:<20} {:<10} {}",
                result.rule_key.to_string(),
                result.routing.department(),
                result.routing.detail()
            )),
            Err(err) => {
                warn!(rule = %rule.key, error = %err, "routing skipped");
                skipped += 1;
                continue;
            }
        }
        match describer.describe(rule) {
            Ok(description) => descriptions.push((rule.key.to_string(), description)),
            Err(err) => {
                warn!(rule = %rule.key, error = %err, "description skipped");
                skipped += 1;
            }
        }
    }

    let mut body = String::new();
    body.push_str(&format!(
        "Transfer Rule Review {}\n",
        Local::now().format("%Y-%m-%d")
    ));
    body.push_str(&format!(
        "{} rules, {} skipped\n\n",
        snapshot.rules.len(),
        skipped
    ));
    body.push_str("Department Review Assignments\n");
    for line in &assignments {
        body.push_str(line);
        body.push('\n');
    }
    body.push_str("\nRule Descriptions\n");
    for (key, description) in &descriptions {
        body.push_str(&format!("{}: {}\n", key, description));
    }

    match &args.out {
        Some(path) => std::fs::write(path, &body)?,
        None => io::stdout().write_all(body.as_bytes())?,
    }

    if let Some(path) = &args.descriptions {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["rule_key", "description"])?;
        for (key, description) in &descriptions {
            writer.write_record([key.as_str(), description.as_str()])?;
        }
        writer.flush()?;
    }

    info!(
        assignments = assignments.len(),
        descriptions = descriptions.len(),
        "report complete"
    );
    Ok(())
}
