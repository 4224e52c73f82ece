use colored::Colorize;

use crate::error::Result;
use crate::ledger::LedgerStore;
use crate::settings::{get_data_dir, load_settings, save_settings};

pub fn use_workspace(name: &str) -> Result<()> {
    let mut settings = load_settings();
    settings.workspace = name.to_string();
    save_settings(&settings)?;

    let dir = get_data_dir().join(name);
    std::fs::create_dir_all(&dir)?;
    let store = LedgerStore::open(&dir);
    let ledger = store.load()?;
    store.save(&ledger)?;

    println!("Switched to workspace '{name}'");
    Ok(())
}

pub fn list() -> Result<()> {
    let settings = load_settings();
    let data_dir = get_data_dir();
    if !data_dir.exists() {
        println!("No data directory yet. Run `khata init` first.");
        return Ok(());
    }
    for entry in std::fs::read_dir(&data_dir)? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name == "exports" {
            continue;
        }
        if name == settings.workspace {
            println!("* {}", name.green());
        } else {
            println!("  {name}");
        }
    }
    Ok(())
}
