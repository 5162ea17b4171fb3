use crate::export::{ExportFormat, ExportSubject};
use crate::models::account::AccountStatus;
use crate::models::project::ProjectKind;
use crate::models::task::RepeatRule;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for tgfarm
#[derive(Parser)]
#[command(
    name = "tgfarm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Manage bulk Telegram account farming: batched launches, status tracking, reminders and notes",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Only print warnings, errors and requested data
    #[arg(global = true, long, short = 'q')]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use (vim, nano, or custom path)")]
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

    /// Manage projects (mini apps opened on launch)
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage accounts, notes and hashtags
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Manage daily tasks and their reminders
    Task {
        #[command(subcommand)]
        action: TaskAction,
    },

    /// Print the activity log (last 24 hours)
    Logs {
        #[arg(long, short = 'n', help = "Show at most N entries")]
        limit: Option<usize>,

        #[arg(long, help = "Do not truncate messages")]
        full: bool,
    },

    /// Show or change application settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Attach links to hashtags
    Hashtag {
        #[command(subcommand)]
        action: HashtagAction,
    },

    /// Local user identity
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Batched launch of account profiles
    Launch {
        #[command(subcommand)]
        action: LaunchAction,
    },

    /// List running client processes
    Processes {
        #[arg(long)]
        json: bool,
    },

    /// Account statistics
    Stats {
        #[arg(long, help = "Reconcile with running processes first")]
        live: bool,

        #[arg(long)]
        json: bool,
    },

    /// Keep polling process status and firing due reminders
    Watch {
        #[arg(long, help = "Run a single round and exit")]
        once: bool,

        #[arg(long = "no-status", help = "Skip process status polling")]
        no_status: bool,

        #[arg(long = "no-reminders", help = "Skip reminder checks")]
        no_reminders: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export accounts or logs
    Export {
        #[arg(long, value_enum, default_value = "accounts")]
        subject: ExportSubject,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Args, Clone, Default)]
pub struct ProjectFields {
    #[arg(long = "type", value_enum)]
    pub kind: Option<ProjectKind>,

    #[arg(long = "app-name", help = "Bot / mini app name (defaults to the project name)")]
    pub app_name: Option<String>,

    #[arg(long = "app-type", help = "Mini app short name")]
    pub app_type: Option<String>,

    #[arg(long = "ref", help = "Referral parameter or full link")]
    pub ref_link: Option<String>,

    #[arg(long)]
    pub mixed: Option<String>,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Add a project
    Add {
        name: String,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// List projects
    List {
        #[arg(long)]
        json: bool,
    },
    /// Edit a project
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ProjectFields,
    },
    /// Delete a project
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum AccountAction {
    /// Add an account by hand
    Add {
        name: String,
        #[arg(long, value_enum)]
        status: Option<AccountStatus>,
    },
    /// List accounts
    List {
        #[arg(long, value_enum)]
        status: Option<AccountStatus>,
        #[arg(long, help = "Only accounts carrying this hashtag")]
        tag: Option<String>,
        #[arg(long, help = "Match against running processes")]
        live: bool,
        #[arg(long)]
        json: bool,
    },
    /// Set the stored status
    Status {
        id: i64,
        #[arg(value_enum)]
        status: AccountStatus,
    },
    /// Replace the notes
    Notes {
        id: i64,
        text: String,
        #[arg(long, help = "Folder scope to mirror the change into")]
        scope: Option<String>,
    },
    /// Set the display name
    Rename {
        id: i64,
        display_name: String,
        #[arg(long)]
        scope: Option<String>,
    },
    /// Replace the hashtags (no tags clears them)
    Tags {
        id: i64,
        tags: Vec<String>,
        #[arg(long)]
        scope: Option<String>,
    },
    /// Delete an account
    Del { id: i64 },
    /// Create/refresh accounts from the profile folders
    Scan {
        #[arg(long, help = "Folder to scan (defaults to telegramFolderPath)")]
        folder: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a daily task
    Add {
        title: String,
        #[arg(long, help = "Reminder time: 'YYYY-MM-DD HH:MM' or 'HH:MM' (today)")]
        at: Option<String>,
    },
    /// List today's tasks
    List {
        #[arg(long)]
        json: bool,
    },
    /// Mark a task as done
    Done { id: i64 },
    /// Mark a task as not done
    Undo { id: i64 },
    /// Change the title
    Rename { id: i64, title: String },
    /// Add a reminder
    Remind {
        id: i64,
        #[arg(long)]
        at: String,
        #[arg(long, value_enum, default_value = "never")]
        repeat: RepeatRule,
    },
    /// Move a reminder or change its repeat rule (re-arms it)
    Reschedule {
        id: i64,
        reminder_id: String,
        #[arg(long)]
        at: Option<String>,
        #[arg(long, value_enum)]
        repeat: Option<RepeatRule>,
    },
    /// Remove a reminder
    Unremind { id: i64, reminder_id: String },
    /// Delete a task
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print all settings
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change one setting
    Set { key: String, value: String },
}

#[derive(Subcommand)]
pub enum HashtagAction {
    /// Attach a link to a hashtag (empty link removes it)
    Link { tag: String, link: String },
    /// List hashtags in use and their links
    List,
}

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the local user
    Login {
        id: String,
        name: String,
        #[arg(long)]
        username: Option<String>,
    },
    /// Forget the local user
    Logout,
    /// Show the local user
    Whoami,
    /// Mark the first-run hint as seen (or reset it)
    Onboarding {
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Args, Clone, Default)]
pub struct LaunchSelection {
    #[arg(long, help = "Project whose link is opened", requires_all = ["from", "to"])]
    pub project: Option<String>,

    #[arg(long, help = "First profile number")]
    pub from: Option<String>,

    #[arg(long, help = "Last profile number")]
    pub to: Option<String>,

    #[arg(long, value_delimiter = ',', conflicts_with = "project", help = "Explicit profile numbers")]
    pub ids: Vec<u32>,

    #[arg(long, value_enum, conflicts_with_all = ["project", "ids"], help = "Accounts with this status")]
    pub status: Option<AccountStatus>,

    #[arg(long, conflicts_with_all = ["project", "ids"], help = "Accounts with this hashtag")]
    pub tag: Option<String>,

    #[arg(long, help = "Shuffle the launch order")]
    pub mix: bool,
}

#[derive(Subcommand)]
pub enum LaunchAction {
    /// Start a launch and open the first batch
    Start {
        #[command(flatten)]
        selection: LaunchSelection,
    },
    /// Close the open batch and open the next one
    Next,
    /// Close the open batch and end the launch
    Finish,
    /// Show progress of the current launch
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Start (or resume) and step through batches interactively
    Run {
        #[command(flatten)]
        selection: LaunchSelection,
    },
}
