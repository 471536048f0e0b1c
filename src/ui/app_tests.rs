#![allow(clippy::unwrap_used)]

use super::*;
use crate::config::AnswerMode;
use std::io::Write;

const KOTAK: &str = "Date,Particulars,Debit,Credit,Balance
01/09/2025,UPI/Swiggy/409876543/Food order,450.00,,9550.00
05/09/2025,NEFT INWARD ACME SALARY,,60000.00,68350.00
";

const UNKNOWN: &str = "When,What,Amount
01/09/2025,Coffee,-120
";

fn app() -> App {
    let engine = ChatEngine::new(AnswerMode::Hybrid, None, 1000);
    App::new(engine, std::env::temp_dir())
}

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ── UploadState ───────────────────────────────────────────────

#[test]
fn test_detection_preselects_bank() {
    let mut state = UploadState::new(PathBuf::from("/"));
    state.pick_file(PathBuf::from("a.csv"), KOTAK);
    assert_eq!(state.bank, Some(Bank::Kotak));
    assert!(!state.bank_explicit);
    assert_eq!(state.decision(), UploadDecision::Proceed { bank: Bank::Kotak });
}

#[test]
fn test_detection_never_overrides_explicit_choice() {
    let mut state = UploadState::new(PathBuf::from("/"));
    state.set_bank(Bank::Sbi);
    state.pick_file(PathBuf::from("a.csv"), KOTAK);
    assert_eq!(state.bank, Some(Bank::Sbi));
    assert_eq!(
        state.decision(),
        UploadDecision::Mismatch {
            detected: Bank::Kotak,
            selected: Bank::Sbi
        }
    );
}

#[test]
fn test_new_file_replaces_detection() {
    let mut state = UploadState::new(PathBuf::from("/"));
    state.pick_file(PathBuf::from("a.csv"), KOTAK);
    state.pick_file(PathBuf::from("b.csv"), UNKNOWN);
    assert_eq!(state.detected_bank(), None);
    assert_eq!(state.file, Some(PathBuf::from("b.csv")));
    // Earlier suggestion stays selected; the user must confirm the unknown layout
    assert_eq!(state.decision(), UploadDecision::ConfirmUnknown { selected: Bank::Kotak });
}

#[test]
fn test_cycle_bank_is_explicit() {
    let mut state = UploadState::new(PathBuf::from("/"));
    state.cycle_bank();
    assert_eq!(state.bank, Some(Bank::Sbi));
    assert!(state.bank_explicit);
    state.cycle_bank();
    assert_eq!(state.bank, Some(Bank::Kotak));
}

#[test]
fn test_browser_lists_only_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("b.csv"), "x").unwrap();
    std::fs::write(dir.path().join("a.CSV"), "x").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
    std::fs::write(dir.path().join(".hidden.csv"), "x").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    let mut state = UploadState::new(dir.path().to_path_buf());
    state.refresh_entries();
    let names: Vec<String> = state
        .entries
        .iter()
        .filter(|p| !state.is_parent_entry(p))
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["sub", "a.CSV", "b.csv"]);
}

// ── App flows ─────────────────────────────────────────────────

#[test]
fn test_data_screens_redirect_without_statement() {
    let db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.refresh_all(&db).unwrap();
    app.go_to(Screen::Analytics);
    assert_eq!(app.screen, Screen::Upload);
    assert_eq!(app.status_message, service::NO_DATA);

    app.go_to(Screen::Chat);
    assert_eq!(app.screen, Screen::Chat);
}

#[test]
fn test_upload_requires_selection() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.submit_upload(&mut db).unwrap();
    assert_eq!(app.status_message, "Please select both a bank and a CSV file.");
}

#[test]
fn test_detected_upload_goes_to_dashboard() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    let file = csv_file(KOTAK);
    app.pick_upload_file(file.path().to_path_buf());
    assert_eq!(app.status_message, "Detected: Kotak Mahindra Bank");

    app.submit_upload(&mut db).unwrap();
    assert_eq!(app.screen, Screen::Dashboard);
    assert_eq!(
        app.status_message,
        "CSV uploaded successfully! Processed 2 KOTAK transactions"
    );
    assert_eq!(app.dashboard.as_ref().unwrap().total_transactions, 2);
    assert!(app.analytics.is_some());
}

#[test]
fn test_mismatch_blocks_upload() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.upload.set_bank(Bank::Axis);
    let file = csv_file(KOTAK);
    app.pick_upload_file(file.path().to_path_buf());
    app.submit_upload(&mut db).unwrap();
    assert!(app.status_message.starts_with("Bank mismatch"));
    assert!(db.current_statement().unwrap().is_none());
}

#[test]
fn test_unknown_format_asks_then_cancels() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.upload.set_bank(Bank::Kotak);
    let file = csv_file(UNKNOWN);
    app.pick_upload_file(file.path().to_path_buf());
    app.submit_upload(&mut db).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);

    let Some(PendingAction::UploadUnknownFormat(decision)) = app.pending_action.take() else {
        panic!("expected a pending unknown-format upload");
    };
    app.finish_unknown_upload(&mut db, &decision, false).unwrap();
    assert_eq!(app.status_message, "Upload cancelled");
    assert!(db.current_statement().unwrap().is_none());
}

#[test]
fn test_unknown_format_confirmed_reports_parse_error() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.upload.set_bank(Bank::Kotak);
    let file = csv_file(UNKNOWN);
    app.pick_upload_file(file.path().to_path_buf());
    let decision = app.upload.decision();
    app.finish_unknown_upload(&mut db, &decision, true).unwrap();
    assert_eq!(
        app.status_message,
        "Error processing CSV: No date column found for Kotak Mahindra Bank format"
    );
    assert_eq!(app.screen, Screen::Upload);
}

#[test]
fn test_non_utf8_file_replaces_previous_pick() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    let kotak = csv_file(KOTAK);
    app.pick_upload_file(kotak.path().to_path_buf());
    assert_eq!(app.upload.detected_bank(), Some(Bank::Kotak));

    let mut latin1 = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    latin1.write_all(b"When,Caf\xe9 \xa3,Amount\n01/09/2025,x,1\n").unwrap();
    app.pick_upload_file(latin1.path().to_path_buf());
    assert_eq!(app.upload.file.as_deref(), Some(latin1.path()));
    assert_eq!(app.upload.detected_bank(), None);
    assert_eq!(app.status_message, "Could not detect the bank from this file");

    app.submit_upload(&mut db).unwrap();
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(db.current_statement().unwrap().is_none());
}

#[test]
fn test_unreadable_file_clears_previous_pick() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    let kotak = csv_file(KOTAK);
    app.pick_upload_file(kotak.path().to_path_buf());

    let dir = tempfile::tempdir().unwrap();
    app.pick_upload_file(dir.path().join("gone.csv"));
    assert!(app.status_message.starts_with("Error loading file"));
    assert!(app.upload.file.is_none());
    assert!(app.upload.detection.is_none());

    app.submit_upload(&mut db).unwrap();
    assert_eq!(app.status_message, "Please select both a bank and a CSV file.");
    assert!(db.current_statement().unwrap().is_none());
}

#[test]
fn test_ask_appends_exchange() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    let file = csv_file(KOTAK);
    app.pick_upload_file(file.path().to_path_buf());
    app.submit_upload(&mut db).unwrap();

    app.ask(&db, "What is my total spending?");
    assert_eq!(app.chat_history.len(), 3);
    assert_eq!(app.chat_history[1].speaker, Speaker::User);
    assert_eq!(app.chat_history[2].text, "Your total spending is ₹59550.00.");
    assert!(!app.chat_history[2].failed);

    // No model configured: shown as a failed bot message
    app.ask(&db, "Which merchants cost me the most?");
    assert!(app.chat_history.last().unwrap().failed);
}

#[test]
fn test_pending_reply_shown_until_answered() {
    let mut db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.load_demo(&mut db).unwrap();

    app.begin_ask("What is my total spending?");
    assert_eq!(app.chat_history.len(), 3);
    assert_eq!(app.chat_history[2].text, THINKING);
    assert_eq!(app.pending_question.as_deref(), Some("What is my total spending?"));

    // A second question waits for the first answer
    app.begin_ask("Show my highest transaction");
    assert_eq!(app.chat_history.len(), 3);

    app.finish_ask(&db);
    assert!(app.pending_question.is_none());
    assert_eq!(app.chat_history.len(), 3);
    assert!(app.chat_history[2].text.starts_with("Your total spending is"));

    app.finish_ask(&db);
    assert_eq!(app.chat_history.len(), 3);
}

#[test]
fn test_ask_ignores_blank_question() {
    let db = Database::open_in_memory().unwrap();
    let mut app = app();
    app.ask(&db, "   ");
    assert_eq!(app.chat_history.len(), 1);
}
