use clap::Parser;

mod cli;
mod cut;
mod error;
mod extract;
mod fmt;
mod importer;
mod ledger;
mod models;
mod numwords;
mod settings;
mod statement;

use cli::{
    AddCommands, Cli, Commands, EmployeesCommands, ExportCommands, ImportCommands, ReportCommands,
    TxnsCommands, WorkspaceCommands,
};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Workspace { command } => match command {
            WorkspaceCommands::Use { name } => cli::workspace::use_workspace(&name),
            WorkspaceCommands::List => cli::workspace::list(),
        },
        Commands::Employees { command } => match command {
            EmployeesCommands::Add { name, cut_type, cut_value } => {
                cli::employees::add(&name, &cut_type, cut_value)
            }
            EmployeesCommands::List => cli::employees::list(),
            EmployeesCommands::Remove { name } => cli::employees::remove(&name),
        },
        Commands::Add { command } => match command {
            AddCommands::Outgoing {
                employee,
                amount,
                date,
                time,
                mode,
                reference,
                note,
                cut,
            } => cli::add::outgoing(&employee, amount, date, time, mode, reference, note, cut),
            AddCommands::Return {
                amount,
                date,
                time,
                mode,
                reference,
                source,
                note,
            } => cli::add::ret(amount, date, time, mode, reference, source, note),
        },
        Commands::Txns { command } => match command {
            TxnsCommands::List { txn_type } => cli::txns::list(txn_type),
            TxnsCommands::Edit { id, note, mode, reference, source, cut } => {
                cli::txns::edit(&id, note, mode, reference, source, cut)
            }
            TxnsCommands::Delete { id } => cli::txns::delete(&id),
        },
        Commands::Parse { files, save } => cli::parse::run(&files, save),
        Commands::Import { command } => match command {
            ImportCommands::Employees { file } => cli::import::employees(&file),
            ImportCommands::Outgoing { file } => cli::import::outgoing(&file),
            ImportCommands::Incoming { file } => cli::import::incoming(&file),
            ImportCommands::Json { file } => cli::import::json(&file),
        },
        Commands::Export { command } => match command {
            ExportCommands::Json { output } => cli::export::json(&output),
            ExportCommands::Employees { output } => cli::export::employees(&output),
            ExportCommands::Outgoing { output } => cli::export::outgoing(&output),
            ExportCommands::Incoming { output } => cli::export::incoming(&output),
        },
        Commands::Match { file, force } => cli::matcher::run(&file, force),
        Commands::Report { command } => match command {
            ReportCommands::Summary => cli::report::summary(),
            ReportCommands::Employee { name } => cli::report::employee(&name),
            ReportCommands::Pending => cli::report::pending(),
        },
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
