use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::analytics::{AdvancedAnalytics, DashboardSummary};
use crate::chat::{ChatEngine, GREETING, INSIGHTS_QUERY};
use crate::db::Database;
use crate::import::{confirm_unknown, detect_bank, validate_upload, DetectionResult, UploadDecision};
use crate::models::{Bank, Statement};
use crate::service;

/// Placeholder reply shown while an answer is being worked out.
pub(crate) const THINKING: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Upload,
    Dashboard,
    Analytics,
    Chat,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Upload, Self::Dashboard, Self::Analytics, Self::Chat]
    }

    /// Screens that need a loaded statement.
    pub(crate) fn needs_data(&self) -> bool {
        matches!(self, Self::Dashboard | Self::Analytics)
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upload => write!(f, "Upload"),
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Analytics => write!(f, "Analytics"),
            Self::Chat => write!(f, "Chat"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "ASK"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    UploadUnknownFormat(UploadDecision),
    ClearStatement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub(crate) struct ChatMessage {
    pub(crate) speaker: Speaker,
    pub(crate) text: String,
    pub(crate) failed: bool,
}

impl ChatMessage {
    fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            failed: false,
        }
    }

    fn assistant(text: impl Into<String>, failed: bool) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            failed,
        }
    }
}

/// State of the Upload screen. Reset file-wise: picking a new file replaces
/// the previous detection outright.
pub(crate) struct UploadState {
    pub(crate) browser_path: PathBuf,
    pub(crate) entries: Vec<PathBuf>,
    pub(crate) index: usize,
    pub(crate) scroll: usize,
    pub(crate) file: Option<PathBuf>,
    pub(crate) detection: Option<DetectionResult>,
    pub(crate) bank: Option<Bank>,
    /// Set once the user picks a bank themselves; detection never overrides it.
    pub(crate) bank_explicit: bool,
}

impl UploadState {
    pub(crate) fn new(browser_path: PathBuf) -> Self {
        Self {
            browser_path,
            entries: Vec::new(),
            index: 0,
            scroll: 0,
            file: None,
            detection: None,
            bank: None,
            bank_explicit: false,
        }
    }

    /// Record a chosen file and the detection run on its content.
    pub(crate) fn pick_file(&mut self, path: PathBuf, content: &str) {
        let detection = detect_bank(content);
        tracing::info!(
            file = %path.display(),
            detected = detection.bank.map(|b| b.as_str()).unwrap_or("unknown"),
            "bank format detection"
        );
        if !self.bank_explicit {
            if let Some(bank) = detection.bank {
                self.bank = Some(bank);
            }
        }
        self.detection = Some(detection);
        self.file = Some(path);
    }

    pub(crate) fn cycle_bank(&mut self) {
        self.set_bank(Bank::cycle(self.bank));
    }

    pub(crate) fn set_bank(&mut self, bank: Bank) {
        self.bank = Some(bank);
        self.bank_explicit = true;
    }

    pub(crate) fn detected_bank(&self) -> Option<Bank> {
        self.detection.as_ref().and_then(|d| d.bank)
    }

    pub(crate) fn decision(&self) -> UploadDecision {
        validate_upload(self.file.is_some(), self.detected_bank(), self.bank)
    }

    pub(crate) fn refresh_entries(&mut self) {
        let mut entries: Vec<PathBuf> = Vec::new();

        if let Some(parent) = self.browser_path.parent() {
            entries.push(parent.to_path_buf());
        }

        if let Ok(read_dir) = std::fs::read_dir(&self.browser_path) {
            let is_hidden = |p: &PathBuf| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with('.'))
            };

            let all: Vec<PathBuf> = read_dir
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| !is_hidden(p) && (p.is_dir() || is_csv(p)))
                .collect();

            // Dirs first, then files, each sorted alphabetically
            let mut dirs: Vec<PathBuf> = all.iter().filter(|p| p.is_dir()).cloned().collect();
            let mut files: Vec<PathBuf> = all.iter().filter(|p| !p.is_dir()).cloned().collect();
            dirs.sort();
            files.sort();
            entries.extend(dirs);
            entries.extend(files);
        }

        self.entries = entries;
        self.index = 0;
        self.scroll = 0;
    }

    pub(crate) fn is_parent_entry(&self, path: &Path) -> bool {
        Some(path) == self.browser_path.parent()
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) engine: ChatEngine,

    // Current statement
    pub(crate) statement: Option<Statement>,
    pub(crate) transaction_count: i64,
    pub(crate) dashboard: Option<DashboardSummary>,
    pub(crate) insights: Option<String>,
    pub(crate) analytics: Option<AdvancedAnalytics>,

    pub(crate) upload: UploadState,

    // Chat
    pub(crate) chat_history: Vec<ChatMessage>,
    pub(crate) chat_input: String,
    /// Lines scrolled up from the newest message.
    pub(crate) chat_scroll: usize,
    /// Question whose answer is still shown as a placeholder.
    pub(crate) pending_question: Option<String>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(engine: ChatEngine, browser_path: PathBuf) -> Self {
        Self {
            running: true,
            screen: Screen::Upload,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            engine,

            statement: None,
            transaction_count: 0,
            dashboard: None,
            insights: None,
            analytics: None,

            upload: UploadState::new(browser_path),

            chat_history: vec![ChatMessage::assistant(GREETING, false)],
            chat_input: String::new(),
            chat_scroll: 0,
            pending_question: None,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn has_data(&self) -> bool {
        self.statement.is_some() && self.transaction_count > 0
    }

    /// Reload the current statement and everything derived from it.
    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.statement = db.current_statement()?;
        self.transaction_count = db.get_transaction_count()?;
        if self.has_data() {
            self.dashboard = Some(service::dashboard(db)?);
            self.analytics = Some(service::advanced_analytics(db)?);
        } else {
            self.dashboard = None;
            self.analytics = None;
        }
        self.insights = None;
        Ok(())
    }

    /// Switch screens, sending the user to Upload when a data screen has nothing to show.
    pub(crate) fn go_to(&mut self, screen: Screen) {
        if screen.needs_data() && !self.has_data() {
            self.screen = Screen::Upload;
            self.upload.refresh_entries();
            self.set_status(service::NO_DATA);
            return;
        }
        if screen == Screen::Upload {
            self.upload.refresh_entries();
        }
        self.screen = screen;
    }

    // ── Upload ────────────────────────────────────────────────

    pub(crate) fn pick_upload_file(&mut self, path: PathBuf) {
        match std::fs::read(&path) {
            Ok(bytes) => {
                self.upload.pick_file(path, &String::from_utf8_lossy(&bytes));
                let banner = match self.upload.detected_bank() {
                    Some(bank) => format!("Detected: {}", bank.display_name()),
                    None => "Could not detect the bank from this file".into(),
                };
                self.set_status(banner);
            }
            Err(e) => {
                self.upload.file = None;
                self.upload.detection = None;
                self.set_status(format!("Error loading file: {e}"));
            }
        }
    }

    /// Run the validation gate and upload, or ask for confirmation first.
    pub(crate) fn submit_upload(&mut self, db: &mut Database) -> Result<()> {
        let decision = self.upload.decision();
        tracing::info!(decision = ?decision, "upload validation");
        match decision {
            UploadDecision::ConfirmUnknown { .. } => {
                self.confirm_message = decision.message();
                self.pending_action = Some(PendingAction::UploadUnknownFormat(decision));
                self.input_mode = InputMode::Confirm;
            }
            UploadDecision::Proceed { bank } => self.run_upload(db, bank)?,
            blocked => self.set_status(blocked.message()),
        }
        Ok(())
    }

    /// Resolve an unknown-format confirmation.
    pub(crate) fn finish_unknown_upload(
        &mut self,
        db: &mut Database,
        decision: &UploadDecision,
        accepted: bool,
    ) -> Result<()> {
        match confirm_unknown(decision, accepted) {
            Some(bank) => self.run_upload(db, bank),
            None => {
                self.set_status("Upload cancelled");
                Ok(())
            }
        }
    }

    fn run_upload(&mut self, db: &mut Database, bank: Bank) -> Result<()> {
        match service::upload(db, self.upload.file.as_deref(), Some(bank)) {
            Ok(resp) => {
                self.refresh_all(db)?;
                self.reset_chat();
                self.go_to(Screen::Dashboard);
                self.set_status(resp.message);
            }
            Err(e) => {
                tracing::warn!(error = %e, "upload failed");
                self.set_status(e.to_string());
            }
        }
        Ok(())
    }

    pub(crate) fn load_demo(&mut self, db: &mut Database) -> Result<()> {
        match service::load_demo(db) {
            Ok(resp) => {
                self.refresh_all(db)?;
                self.reset_chat();
                self.go_to(Screen::Dashboard);
                self.set_status(resp.message);
            }
            Err(e) => self.set_status(e.to_string()),
        }
        Ok(())
    }

    pub(crate) fn clear_statement(&mut self, db: &mut Database) -> Result<()> {
        db.clear()?;
        self.refresh_all(db)?;
        self.reset_chat();
        self.go_to(Screen::Upload);
        self.set_status("Statement removed");
        Ok(())
    }

    // ── Chat ──────────────────────────────────────────────────

    pub(crate) fn reset_chat(&mut self) {
        self.chat_history = vec![ChatMessage::assistant(GREETING, false)];
        self.chat_input.clear();
        self.chat_scroll = 0;
        self.pending_question = None;
    }

    pub(crate) fn ask(&mut self, db: &Database, question: &str) {
        self.begin_ask(question);
        self.finish_ask(db);
    }

    /// Show the question with a placeholder reply. The answer is filled in by
    /// `finish_ask`, so the placeholder can be drawn before a slow model call.
    pub(crate) fn begin_ask(&mut self, question: &str) {
        let question = question.trim();
        if question.is_empty() || self.pending_question.is_some() {
            return;
        }
        self.chat_history.push(ChatMessage::user(question));
        self.chat_history.push(ChatMessage::assistant(THINKING, false));
        self.pending_question = Some(question.to_string());
        self.chat_scroll = 0;
    }

    pub(crate) fn finish_ask(&mut self, db: &Database) {
        let Some(question) = self.pending_question.take() else {
            return;
        };
        let message = match service::chat(db, &self.engine, &question) {
            Ok(reply) => {
                let failed = reply.is_error() || reply.needs_key;
                ChatMessage::assistant(reply.response, failed)
            }
            Err(e) => {
                tracing::error!(error = %e, "chat failed");
                ChatMessage::assistant(format!("Sorry, something went wrong: {e}"), true)
            }
        };
        match self.chat_history.last_mut() {
            Some(last) if last.speaker == Speaker::Assistant && last.text == THINKING => {
                *last = message;
            }
            _ => self.chat_history.push(message),
        }
        self.chat_scroll = 0;
    }

    /// Fill the dashboard's insights panel.
    pub(crate) fn load_insights(&mut self, db: &Database) -> Result<()> {
        if !self.has_data() {
            self.set_status(service::NO_DATA);
            return Ok(());
        }
        let reply = service::chat(db, &self.engine, INSIGHTS_QUERY)?;
        self.insights = Some(reply.response);
        Ok(())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
