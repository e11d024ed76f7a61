use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "lending-admin")]
#[command(about = "Admin console for the book lending service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the lending API (overrides the config file)
    #[arg(long, global = true, env = "LENDING_ADMIN_API_URL")]
    pub api_url: Option<String>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and keep the session for later commands
    Login {
        /// Account email (prompted when omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,
    },
    /// Sign out and forget the saved session
    Logout,
    /// Show the signed-in operator
    Whoami,
    /// Show catalogue, audit and security event counts
    Dashboard,
    /// Manage user accounts
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Moderate book requests
    Requests {
        #[command(subcommand)]
        command: RequestsCommand,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List users
    List {
        /// Free-text search on email or username
        #[arg(long)]
        q: Option<String>,

        /// Filter by role
        #[arg(long)]
        role: Option<String>,

        /// Filter by active flag: true or false
        #[arg(long)]
        active: Option<String>,

        /// Filter by blocked flag: true or false
        #[arg(long)]
        blocked: Option<String>,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Block or unblock a user (the inverse of its current state)
    ToggleBlock {
        /// User ID
        id: i64,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Subcommand)]
pub enum RequestsCommand {
    /// List book requests
    List {
        /// Filter by status: pending, accepted, rejected, cancelled
        #[arg(long, short = 's')]
        status: Option<String>,

        /// Filter by book ID
        #[arg(long)]
        book_id: Option<i64>,

        /// Filter by requester ID
        #[arg(long)]
        requester_id: Option<i64>,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Accept a pending request
    Accept {
        /// Request ID
        id: i64,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },
    /// Reject a pending request
    Reject {
        /// Request ID
        id: i64,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },
}

#[derive(Args, Clone, Copy)]
pub struct ViewArgs {
    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Interactive mode (pick a row, then an action)
    #[arg(long, short = 'I')]
    pub interactive: bool,
}

#[derive(Args, Clone, Copy)]
pub struct ConfirmArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Html,
    Json,
}
