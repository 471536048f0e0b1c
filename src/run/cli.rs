use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::chat::ChatEngine;
use crate::db::Database;
use crate::import::{confirm_unknown, detect_bank, validate_upload, UploadDecision};
use crate::models::Bank;
use crate::service;
use crate::ui::commands::shellexpand;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn as_cli(args: &[String], db: &mut Database, engine: &ChatEngine) -> Result<()> {
    match args[1].as_str() {
        "detect" => cli_detect(&args[2..]),
        "upload" | "u" => cli_upload(&args[2..], db),
        "demo" => cli_demo(db),
        "dashboard" | "d" => cli_dashboard(&args[2..], db),
        "analytics" | "a" => cli_analytics(&args[2..], db),
        "chat" | "ask" => cli_chat(&args[2..], db, engine),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("rupeelens {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("RupeeLens: bank statement analytics and finance chat");
    println!();
    println!("Usage: rupeelens [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  detect <file.csv>             Guess which bank a statement came from");
    println!("  upload <file.csv>             Import a statement, replacing the current one");
    println!("    --bank <sbi|kotak|axis>     Bank the statement belongs to (required)");
    println!("    --yes                       Continue when the format is not recognised");
    println!("  demo                          Load the bundled sample Kotak statement");
    println!("  dashboard [--json]            Print the spending dashboard");
    println!("  analytics [--json]            Print the advanced analytics");
    println!("  chat <question> [--json]      Ask a question about the statement");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Environment: GEMINI_API_KEY, GEMINI_API_BASE, ANSWER_MODE (hybrid|ai-only),");
    println!("             CSV_CONTEXT_MAX_CHARS, RUPEELENS_DB, RUPEELENS_LOG. A .env file is read too.");
}

fn wants_json(args: &[String]) -> bool {
    args.iter().any(|a| a == "--json")
}

fn cli_detect(args: &[String]) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: rupeelens detect <file.csv>");
    };
    let bytes =
        std::fs::read(shellexpand(file_path)).with_context(|| format!("Failed to read {file_path}"))?;
    let detection = detect_bank(&String::from_utf8_lossy(&bytes));
    match detection.bank {
        Some(bank) => println!("Detected: {} ({})", bank.display_name(), bank.as_str()),
        None => println!("Could not detect the bank from header: {}", detection.header_line),
    }
    Ok(())
}

fn cli_upload(args: &[String], db: &mut Database) -> Result<()> {
    let Some(file_path) = args.first().filter(|a| !a.starts_with('-')) else {
        anyhow::bail!("Usage: rupeelens upload <file.csv> --bank <sbi|kotak|axis> [--yes]");
    };
    let path = shellexpand(file_path);
    let path = Path::new(&path);

    let bank = match args.windows(2).find(|w| w[0] == "--bank").map(|w| w[1].as_str()) {
        Some(name) => Some(
            Bank::parse(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown bank: {name}. Use sbi, kotak or axis"))?,
        ),
        None => None,
    };
    let assume_yes = args.iter().any(|a| a == "--yes" || a == "-y");

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {file_path}"))?;
    let detected = detect_bank(&String::from_utf8_lossy(&bytes)).bank;
    if let Some(bank) = detected {
        println!("Detected format: {}", bank.display_name());
    }

    let decision = validate_upload(true, detected, bank);
    if decision.is_blocking() {
        anyhow::bail!(decision.message());
    }
    let accepted = match decision {
        UploadDecision::ConfirmUnknown { .. } => assume_yes || prompt_yes_no(&decision.message())?,
        _ => true,
    };
    let Some(bank) = confirm_unknown(&decision, accepted) else {
        println!("Upload cancelled");
        return Ok(());
    };

    let resp = service::upload(db, Some(path), Some(bank))?;
    println!("{}", resp.message);
    Ok(())
}

fn prompt_yes_no(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn cli_demo(db: &mut Database) -> Result<()> {
    let resp = service::load_demo(db)?;
    println!("{}", resp.message);
    Ok(())
}

fn cli_dashboard(args: &[String], db: &mut Database) -> Result<()> {
    let summary = service::dashboard(db)?;
    if wants_json(args) {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if let Some(stmt) = db.current_statement()? {
        println!("RupeeLens: {} ({})", stmt.file_name, stmt.bank.display_name());
    }
    println!("{}", "─".repeat(40));
    println!("  Total Spending:  {}", format_amount(summary.total_spending));
    println!("  Transactions:    {}", summary.total_transactions);
    println!("  Categories:      {}", summary.total_categories);
    println!("  Avg Transaction: {}", format_amount(summary.avg_transaction));

    if !summary.categories.is_empty() {
        println!();
        println!("Spending by Category:");
        for c in &summary.categories {
            println!("  {:<24} {}", c.category, format_amount(c.total));
        }
    }
    if !summary.monthly.is_empty() {
        println!();
        println!("Monthly:");
        for m in &summary.monthly {
            println!("  {:<24} {}", m.month, format_amount(m.total));
        }
    }
    if !summary.top_merchants.is_empty() {
        println!();
        println!("Top Merchants:");
        for m in &summary.top_merchants {
            println!("  {:<24} {}", m.merchant, format_amount(m.total));
        }
    }
    Ok(())
}

fn cli_analytics(args: &[String], db: &mut Database) -> Result<()> {
    let analytics = service::advanced_analytics(db)?;
    if wants_json(args) {
        println!("{}", serde_json::to_string_pretty(&analytics)?);
        return Ok(());
    }

    let s = &analytics.statistics;
    println!("Statistics ({} transactions)", s.count);
    println!("{}", "─".repeat(40));
    println!("  Mean:    {}", format_amount(s.mean));
    println!("  Median:  {}", format_amount(s.median));
    println!("  Std Dev: {}", format_amount(s.std));
    println!("  Min:     {}", format_amount(s.min));
    println!("  Max:     {}", format_amount(s.max));
    println!("  Q25/Q75: {} / {}", format_amount(s.q25), format_amount(s.q75));

    let q = &analytics.data_quality;
    println!();
    println!(
        "Data Quality: {:.2}% complete, {} missing, {} duplicates",
        q.completeness, q.missing, q.duplicates
    );

    if !analytics.outliers.is_empty() {
        println!();
        println!("Unusual Transactions:");
        for o in &analytics.outliers {
            println!(
                "  {:<12} {:<32} {}",
                o.date,
                truncate(&o.description, 32),
                format_amount(o.amount)
            );
        }
    }

    if !analytics.insights.is_empty() {
        println!();
        println!("Insights:");
        for i in &analytics.insights {
            println!("  {} {}: {}", i.icon, i.title, i.text);
        }
    }
    Ok(())
}

fn cli_chat(args: &[String], db: &mut Database, engine: &ChatEngine) -> Result<()> {
    let question = args
        .iter()
        .filter(|a| *a != "--json")
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    if question.trim().is_empty() {
        anyhow::bail!("Usage: rupeelens chat <question> [--json]");
    }

    let reply = service::chat(db, engine, &question)?;
    if wants_json(args) {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", reply.response);
    }
    Ok(())
}
