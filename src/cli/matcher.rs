use std::path::Path;

use crate::error::Result;
use crate::importer::{compute_checksum, load_import_log, read_statement_file, save_import_log};
use crate::ledger::LedgerStore;
use crate::settings::workspace_dir;
use crate::statement::match_statement;

pub fn run(file: &str, force: bool) -> Result<()> {
    let path = Path::new(file);
    let dir = workspace_dir();

    let checksum = compute_checksum(path)?;
    let mut log = load_import_log(&dir);
    if log.contains(&checksum) && !force {
        println!("This statement has already been matched (use --force to re-run).");
        return Ok(());
    }

    let entries = read_statement_file(path)?;
    if entries.is_empty() {
        println!("No usable rows found in {file}");
        return Ok(());
    }

    let store = LedgerStore::open(&dir);
    let mut ledger = store.load()?;
    let updated = match_statement(&entries, &mut ledger.transactions);
    store.save(&ledger)?;

    log.record(
        &path.file_name().and_then(|n| n.to_str()).unwrap_or("").to_string(),
        &checksum,
        updated,
    );
    save_import_log(&dir, &log)?;

    println!("{} statement rows, {updated} transactions updated", entries.len());
    Ok(())
}
