mod analytics;
mod categorize;
mod chat;
mod config;
mod db;
mod import;
mod logging;
mod models;
mod run;
mod service;
mod ui;

use anyhow::{Context, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env();
    let data_dir = get_data_dir()?;

    if let Err(e) = logging::init(&data_dir, config.log_filter.as_deref()) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let db_path = config
        .db_path
        .clone()
        .unwrap_or_else(|| data_dir.join("rupeelens.db"));
    let mut db = db::Database::open(&db_path)?;
    let engine = chat::ChatEngine::from_config(&config);
    tracing::info!(
        db = %db_path.display(),
        mode = %config.answer_mode,
        ai = engine.has_model(),
        "starting rupeelens"
    );

    match args.len() {
        1 => run::as_tui(&mut db, engine),
        2.. => run::as_cli(&args, &mut db, &engine),
        _ => {
            eprintln!("Usage: rupeelens [command]");
            Ok(())
        }
    }
}

fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "rupeelens", "RupeeLens")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
