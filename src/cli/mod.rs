pub mod add;
pub mod employees;
pub mod export;
pub mod import;
pub mod init;
pub mod matcher;
pub mod parse;
pub mod report;
pub mod status;
pub mod txns;
pub mod workspace;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "khata",
    about = "Disbursement-and-return ledger CLI for UPI payment slips."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up khata: choose a data directory and create the default workspace.
    Init {
        /// Path for khata data (default: ~/Documents/khata)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Switch between or list named ledger workspaces.
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },
    /// Manage employees and their cut rules.
    Employees {
        #[command(subcommand)]
        command: EmployeesCommands,
    },
    /// Record a transaction manually.
    Add {
        #[command(subcommand)]
        command: AddCommands,
    },
    /// List, edit or delete ledger transactions.
    Txns {
        #[command(subcommand)]
        command: TxnsCommands,
    },
    /// Extract transaction candidates from OCR text dumps of payment slips.
    Parse {
        /// One or more text files (raw OCR output, one slip per file)
        files: Vec<String>,
        /// Commit extracted candidates to the ledger
        #[arg(long)]
        save: bool,
    },
    /// Import employees/outgoing/incoming CSV or a full ledger JSON.
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
    /// Export the ledger as JSON or per-kind CSV.
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Reconcile a bank/CA statement file against pending returns.
    Match {
        /// Statement file: CSV, XLSX or plain text
        file: String,
        /// Re-run even if this exact file was matched before
        #[arg(long)]
        force: bool,
    },
    /// Generate summary reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Show the active workspace and ledger statistics.
    Status,
}

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// Switch to a workspace, creating it if needed.
    Use {
        /// Workspace name, e.g. 'site-a'
        name: String,
    },
    /// List all workspaces under the data directory.
    List,
}

#[derive(Subcommand)]
pub enum EmployeesCommands {
    /// Add an employee.
    Add {
        /// Employee name
        name: String,
        /// Cut rule: percent or flat
        #[arg(long = "cut-type", default_value = "percent")]
        cut_type: String,
        /// Cut value (percent of amount, or flat rupees)
        #[arg(long = "cut-value", default_value = "0")]
        cut_value: f64,
    },
    /// List all employees.
    List,
    /// Remove an employee (their transactions stay, orphaned).
    Remove {
        /// Employee name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum AddCommands {
    /// Money disbursed to an employee, expected to be partly returned.
    Outgoing {
        /// Employee name (created with a zero cut if unknown)
        #[arg(long)]
        employee: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long = "ref")]
        reference: Option<String>,
        #[arg(long)]
        note: Option<String>,
        /// Per-transaction cut override (rupees)
        #[arg(long)]
        cut: Option<f64>,
    },
    /// Money received back from a CA/bank.
    Return {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long = "ref")]
        reference: Option<String>,
        /// Origin of the returned funds, e.g. 'CA Sharma'
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TxnsCommands {
    /// List transactions.
    List {
        /// Filter: outgoing or return
        #[arg(long = "type")]
        txn_type: Option<String>,
    },
    /// Edit fields on a transaction.
    Edit {
        /// Transaction ID (shown in `khata txns list`)
        id: String,
        #[arg(long)]
        note: Option<String>,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long = "ref")]
        reference: Option<String>,
        #[arg(long)]
        source: Option<String>,
        /// Cut override (rupees); outgoing only
        #[arg(long)]
        cut: Option<f64>,
    },
    /// Delete a transaction.
    Delete {
        /// Transaction ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ImportCommands {
    /// Employees CSV: employee|name, cut_type, cut_value.
    Employees { file: String },
    /// Outgoing CSV: date, time, employee|name, amount, mode, ref|reference, note, cut.
    Outgoing { file: String },
    /// Incoming CSV: date, time, amount, mode, ref|reference, source, note.
    Incoming { file: String },
    /// Full ledger JSON; replaces the active workspace's ledger.
    Json { file: String },
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Whole ledger as JSON.
    Json {
        /// Output file path
        output: String,
    },
    /// Employees CSV.
    Employees { output: String },
    /// Outgoing transactions CSV.
    Outgoing { output: String },
    /// Incoming (return) transactions CSV.
    Incoming { output: String },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Per-employee totals plus overall balance.
    Summary,
    /// One employee's outgoing transactions with cut and expected return.
    Employee {
        /// Employee name
        name: String,
    },
    /// Return transactions not yet reconciled against a statement.
    Pending,
}
