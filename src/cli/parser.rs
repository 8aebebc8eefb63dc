use crate::export::ExportFormat;
use crate::models::Status;
use clap::{Parser, Subcommand};

/// Command-line interface definition for stutra
/// CLI application to track classroom attendance with SQLite
#[derive(Parser)]
#[command(
    name = "stutra",
    version = env!("CARGO_PKG_VERSION"),
    about = "A classroom attendance CLI: mark students, keep notes and export reports using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (config file neither read nor written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the roster
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },

    /// Record a status change for one or more students
    Mark {
        /// Student ids
        #[arg(required = true)]
        ids: Vec<i64>,

        #[arg(long, short = 's', value_enum)]
        status: Status,

        /// Attendance date (YYYY-MM-DD), default today
        #[arg(long, short = 'd')]
        date: Option<String>,
    },

    /// Add a note to a student, or list the student's notes
    Note {
        id: i64,

        /// Note text (words are joined with spaces)
        text: Vec<String>,

        #[arg(long, short = 'l', conflicts_with = "text")]
        list: bool,
    },

    /// Default every student to absent for today
    Reset {
        #[arg(long, short = 'f', help = "Reset even students already reset today")]
        force: bool,
    },

    /// Show the attendance log of one student
    History {
        id: i64,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range"
        )]
        range: Option<String>,
    },

    /// Export an attendance report
    Export {
        #[arg(long, help = "Section label, or 'all'")]
        section: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "YYYY, YYYY-MM, YYYY-MM-DD or start:end (default: today)"
        )]
        range: Option<String>,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(
            long,
            value_name = "FILE",
            help = "Absolute output path (default: conventional name in export_dir)"
        )]
        file: Option<String>,

        #[arg(
            long = "from-backup",
            value_name = "FILE",
            help = "Read students and log from a JSON snapshot instead of the database"
        )]
        from_backup: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Per-section attendance summary for one day
    Summary {
        /// Date (YYYY-MM-DD), default today
        #[arg(long, short = 'd')]
        date: Option<String>,

        #[arg(long, help = "Section label, or 'all'")]
        section: Option<String>,

        #[arg(long, value_name = "FILE", help = "Also write the summary as CSV")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Import a roster CSV or a JSON snapshot
    Import {
        #[arg(
            long,
            value_name = "FILE",
            conflicts_with = "backup",
            required_unless_present = "backup"
        )]
        csv: Option<String>,

        #[arg(long, requires = "csv", help = "Section for rows without one")]
        section: Option<String>,

        #[arg(long, value_name = "FILE", help = "JSON snapshot of students and attendance logs")]
        backup: Option<String>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, help = "Write a JSON snapshot instead of copying the database")]
        json: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum StudentAction {
    /// Add a student
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        admission: String,

        /// Section label (repeat for several sections; the first is primary)
        #[arg(long = "section", required = true)]
        sections: Vec<String>,

        #[arg(long, help = "Explicit id (default: numeric admission number or next free id)")]
        id: Option<i64>,
    },

    /// List students of a section with their status
    List {
        #[arg(long)]
        section: Option<String>,

        /// Show the status reconciled for this date instead of the current one
        #[arg(long, short = 'd')]
        date: Option<String>,
    },

    /// List sections with their strength
    Sections,

    /// Change name, admission number or sections of a student
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        admission: Option<String>,

        /// Replaces the section list (repeat for several sections)
        #[arg(long = "section")]
        sections: Vec<String>,
    },

    /// Write the roster of a section to a CSV file
    Export {
        #[arg(long)]
        file: String,

        #[arg(long)]
        section: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
