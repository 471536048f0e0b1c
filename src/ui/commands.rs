use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::models::Bank;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit RupeeLens", cmd_quit, r);
    register_command!("quit", "Quit RupeeLens", cmd_quit, r);
    register_command!("f", "Go to Upload", cmd_files, r);
    register_command!("files", "Go to Upload", cmd_files, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("a", "Go to Analytics", cmd_analytics, r);
    register_command!("analytics", "Go to Analytics", cmd_analytics, r);
    register_command!("c", "Go to Chat", cmd_chat, r);
    register_command!("chat", "Go to Chat", cmd_chat, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "bank",
        "Select bank (e.g. :bank kotak)",
        cmd_bank,
        r
    );
    register_command!(
        "cd",
        "Browse a folder (e.g. :cd ~/Downloads)",
        cmd_cd,
        r
    );
    register_command!("upload", "Upload the picked statement", cmd_upload, r);
    register_command!(
        "demo",
        "Load the sample Kotak statement",
        cmd_demo,
        r
    );
    register_command!(
        "insights",
        "Ask for quick insights on the Dashboard",
        cmd_insights,
        r
    );
    register_command!(
        "ask",
        "Ask a question (e.g. :ask total)",
        cmd_ask,
        r
    );
    register_command!("reset-chat", "Start a new conversation", cmd_reset_chat, r);
    register_command!(
        "clear",
        "Remove the loaded statement",
        cmd_clear,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_files(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.go_to(Screen::Upload);
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.go_to(Screen::Dashboard);
    Ok(())
}

fn cmd_analytics(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.go_to(Screen::Analytics);
    Ok(())
}

fn cmd_chat(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.go_to(Screen::Chat);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_bank(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.upload.cycle_bank();
    } else if let Some(bank) = Bank::parse(args) {
        app.upload.set_bank(bank);
    } else {
        app.set_status(format!("Unknown bank: {args}. Use sbi, kotak or axis"));
        return Ok(());
    }
    if let Some(bank) = app.upload.bank {
        app.set_status(format!("Bank: {}", bank.display_name()));
    }
    Ok(())
}

fn cmd_cd(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = PathBuf::from(shellexpand(args));
    if !path.is_dir() {
        app.set_status(format!("Not a folder: {args}"));
        return Ok(());
    }
    app.upload.browser_path = path;
    app.go_to(Screen::Upload);
    Ok(())
}

fn cmd_upload(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.submit_upload(db)
}

fn cmd_demo(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.load_demo(db)
}

fn cmd_insights(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.go_to(Screen::Dashboard);
    if app.screen == Screen::Dashboard {
        app.load_insights(db)?;
        app.set_status("Insights updated");
    }
    Ok(())
}

fn cmd_ask(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :ask <question>");
        return Ok(());
    }
    app.go_to(Screen::Chat);
    app.begin_ask(args);
    Ok(())
}

fn cmd_reset_chat(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.reset_chat();
    app.set_status("Started a new conversation");
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.statement.is_none() {
        app.set_status("No statement loaded");
        return Ok(());
    }
    app.confirm_message = "Remove the loaded statement and all its transactions?".into();
    app.pending_action = Some(PendingAction::ClearStatement);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
