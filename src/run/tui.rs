use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

use crate::chat::{ChatEngine, QUICK_QUESTIONS};
use crate::db::Database;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database, engine: ChatEngine) -> Result<()> {
    let start_dir = std::env::current_dir()
        .ok()
        .or_else(|| directories::UserDirs::new().map(|d| d.home_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut app = App::new(engine, start_dir);
    app.refresh_all(db)?;
    app.upload.refresh_entries();
    if app.has_data() {
        app.screen = Screen::Dashboard;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Rows left for the file browser: bars, selection panel and borders
            let content_height = f.area().height.saturating_sub(12) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        // The placeholder is on screen now; answer before waiting for keys
        if app.pending_question.is_some() {
            app.finish_ask(db);
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != event::KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Editing => handle_editing_input(key, app)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char(c @ '1'..='5') if app.screen == Screen::Chat => {
            let idx = c as usize - '1' as usize;
            if let Some(question) = QUICK_QUESTIONS.get(idx) {
                app.chat_input = (*question).to_string();
                app.input_mode = InputMode::Editing;
            }
        }
        KeyCode::Char('1') => app.go_to(Screen::Upload),
        KeyCode::Char('2') => app.go_to(Screen::Dashboard),
        KeyCode::Char('3') => app.go_to(Screen::Analytics),
        KeyCode::Char('4') => app.go_to(Screen::Chat),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            app.go_to(screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            app.go_to(screens[prev]);
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => match app.screen {
            Screen::Upload => handle_upload_keys(key, app, db)?,
            Screen::Chat => handle_chat_keys(key, app),
            Screen::Dashboard | Screen::Analytics => {}
        },
    }
    Ok(())
}

fn handle_upload_keys(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    let page = app.visible_rows;
    let state = &mut app.upload;
    let len = state.entries.len();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(&mut state.index, &mut state.scroll, len, page);
        }
        KeyCode::Char('k') | KeyCode::Up => scroll_up(&mut state.index, &mut state.scroll),
        KeyCode::Char('g') | KeyCode::Home => scroll_to_top(&mut state.index, &mut state.scroll),
        KeyCode::Char('G') | KeyCode::End => {
            scroll_to_bottom(&mut state.index, &mut state.scroll, len, page);
        }
        KeyCode::Enter => {
            if let Some(path) = state.entries.get(state.index).cloned() {
                if path.is_dir() {
                    state.browser_path = path;
                    state.refresh_entries();
                } else {
                    app.pick_upload_file(path);
                }
            }
        }
        KeyCode::Backspace | KeyCode::Char('h') => {
            if let Some(parent) = state.browser_path.parent() {
                state.browser_path = parent.to_path_buf();
                state.refresh_entries();
            }
        }
        KeyCode::Char('b') => {
            state.cycle_bank();
            let selected = state.bank;
            if let Some(bank) = selected {
                app.set_status(format!("Bank: {}", bank.display_name()));
            }
        }
        KeyCode::Char('u') => app.submit_upload(db)?,
        _ => {}
    }
    Ok(())
}

fn handle_chat_keys(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => app.input_mode = InputMode::Editing,
        KeyCode::Char('k') | KeyCode::Up => app.chat_scroll = app.chat_scroll.saturating_add(1),
        KeyCode::Char('j') | KeyCode::Down => app.chat_scroll = app.chat_scroll.saturating_sub(1),
        KeyCode::PageUp => app.chat_scroll = app.chat_scroll.saturating_add(app.visible_rows),
        KeyCode::PageDown => app.chat_scroll = app.chat_scroll.saturating_sub(app.visible_rows),
        KeyCode::Char('G') | KeyCode::End => app.chat_scroll = 0,
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let question = std::mem::take(&mut app.chat_input);
            app.input_mode = InputMode::Normal;
            app.begin_ask(&question);
        }
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            app.chat_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.chat_input.clear();
        }
        KeyCode::Char(c) => app.chat_input.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    let Some(action) = app.pending_action.take() else {
        return Ok(());
    };

    let accepted = matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y'));
    match action {
        PendingAction::UploadUnknownFormat(decision) => {
            app.finish_unknown_upload(db, &decision, accepted)?;
        }
        PendingAction::ClearStatement if accepted => app.clear_statement(db)?,
        PendingAction::ClearStatement => app.set_status("Cancelled"),
    }
    Ok(())
}
