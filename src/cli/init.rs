use std::path::PathBuf;

use crate::error::Result;
use crate::ledger::LedgerStore;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    let workspace = resolved.join(&settings.workspace);
    std::fs::create_dir_all(&workspace)?;
    std::fs::create_dir_all(resolved.join("exports"))?;

    let store = LedgerStore::open(&workspace);
    let ledger = store.load()?;
    store.save(&ledger)?;

    println!(
        "Initialized khata at {} (workspace '{}')",
        resolved.display(),
        settings.workspace
    );
    Ok(())
}
