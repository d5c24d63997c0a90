use clap::{ArgAction, Args, Parser, Subcommand};

/// Command-line interface definition for rWorktime
/// CLI application to track work intervals and breaks with SQLite
#[derive(Parser)]
#[command(
    name = "rworktime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track work intervals and breaks; daily, monthly and yearly accounting with rest-period warnings",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act on behalf of this user id (default: `user_id` from the config)
    #[arg(global = true, long = "user")]
    pub user: Option<i64>,

    /// Print results as JSON instead of tables
    #[arg(global = true, long = "json")]
    pub json: bool,

    /// Increase diagnostic output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,
    },

    /// Database maintenance
    Db {
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

    /// Start, stop or inspect the running work interval
    Timer {
        #[command(subcommand)]
        action: TimerCmd,
    },

    /// Manage work intervals
    Work {
        #[command(subcommand)]
        action: WorkCmd,
    },

    /// Manage breaks
    Break {
        #[command(subcommand)]
        action: BreakCmd,
    },

    /// Manage legacy flat time entries
    Entry {
        #[command(subcommand)]
        action: EntryCmd,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectCmd,
    },

    /// Manage tasks
    Task {
        #[command(subcommand)]
        action: TaskCmd,
    },

    /// Daily summary (default: today)
    Day {
        /// Date (YYYY-MM-DD)
        date: Option<String>,
    },

    /// Month overview
    Month {
        year: i32,
        month: u32,

        #[arg(long = "projects", help = "Show minutes per project and task instead of days")]
        projects: bool,
    },

    /// Year summary
    Year { year: i32 },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsCmd,
    },
}

/// Project/task/notes attached to a work interval or entry.
#[derive(Args, Debug, Clone, Default)]
pub struct Attribution {
    #[arg(long = "project")]
    pub project: Option<i64>,

    #[arg(long = "task")]
    pub task: Option<i64>,

    #[arg(long = "notes")]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum TimerCmd {
    /// Open a work interval now (or at --at)
    Start {
        #[arg(long = "date", help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "at", help = "Start time (HH:mm), default now")]
        at: Option<String>,

        #[command(flatten)]
        attribution: Attribution,
    },

    /// Close the running work interval now (or at --at)
    Stop {
        #[arg(long = "date", help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "at", help = "End time (HH:mm), default now")]
        at: Option<String>,
    },

    /// Show whether a work interval is running
    Status {
        #[arg(long = "date", help = "Date (YYYY-MM-DD), default today")]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum WorkCmd {
    /// Add a closed work interval
    Add {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Start time (HH:mm)
        start: String,
        /// End time (HH:mm)
        end: String,

        #[command(flatten)]
        attribution: Attribution,
    },

    /// Change fields of a work interval
    Edit {
        id: i64,

        #[arg(long = "date")]
        date: Option<String>,

        #[arg(long = "start")]
        start: Option<String>,

        #[arg(long = "end")]
        end: Option<String>,

        #[command(flatten)]
        attribution: Attribution,

        #[arg(long = "clear-project", help = "Remove project and task", conflicts_with_all = ["project", "task"])]
        clear_project: bool,

        #[arg(long = "clear-notes", conflicts_with = "notes")]
        clear_notes: bool,
    },

    /// Delete a work interval
    Del { id: i64 },

    /// List work intervals of a date (default: latest 200)
    List {
        #[arg(long = "date")]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum BreakCmd {
    /// Add a break: --start/--end, or --duration alone
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long = "start")]
        start: Option<String>,

        #[arg(long = "end")]
        end: Option<String>,

        #[arg(long = "duration", help = "Minutes; takes precedence over start/end")]
        duration: Option<i64>,

        #[arg(long = "notes")]
        notes: Option<String>,
    },

    /// Change fields of a break
    Edit {
        id: i64,

        #[arg(long = "date")]
        date: Option<String>,

        #[arg(long = "start")]
        start: Option<String>,

        #[arg(long = "end")]
        end: Option<String>,

        #[arg(long = "duration")]
        duration: Option<i64>,

        #[arg(long = "notes")]
        notes: Option<String>,

        #[arg(long = "clear-times", help = "Make the break duration-only", conflicts_with_all = ["start", "end"])]
        clear_times: bool,
    },

    /// Delete a break
    Del { id: i64 },

    /// List breaks of a date (default: latest 200)
    List {
        #[arg(long = "date")]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum EntryCmd {
    /// Add a flat time entry
    Add {
        /// Date (YYYY-MM-DD)
        date: String,

        #[arg(long = "start")]
        start: Option<String>,

        #[arg(long = "end")]
        end: Option<String>,

        #[arg(long = "duration")]
        duration: Option<i64>,

        #[arg(long = "billable")]
        billable: bool,

        #[command(flatten)]
        attribution: Attribution,
    },

    /// Delete an entry
    Del { id: i64 },

    /// List entries of a date (default: latest 100)
    List {
        #[arg(long = "date")]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProjectCmd {
    Add {
        name: String,

        #[arg(long = "code")]
        code: Option<String>,
    },
    List,
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum TaskCmd {
    Add {
        /// Project id
        project: i64,
        name: String,
    },
    List {
        #[arg(long = "project")]
        project: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum SettingsCmd {
    Show,
    Set {
        #[arg(long = "target-hours")]
        target_hours: Option<i64>,

        #[arg(long = "max-hours-day")]
        max_hours_day: Option<i64>,

        #[arg(long = "max-hours-week")]
        max_hours_week: Option<i64>,

        #[arg(long = "window-start")]
        window_start: Option<String>,

        #[arg(long = "window-end")]
        window_end: Option<String>,

        #[arg(long = "reminder")]
        reminder: Option<String>,
    },
}
