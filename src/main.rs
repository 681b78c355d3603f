mod db;
mod engine;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let db_path = get_db_path()?;
    let mut db = db::Database::open(&db_path)?;

    match args.len() {
        1 => run::as_tui(&mut db),
        2.. => run::as_cli(&args, &mut db),
        _ => {
            eprintln!("Usage: findash [command]");
            Ok(())
        }
    }
}

fn get_db_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "findash", "FinDash")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("findash.db"))
}
