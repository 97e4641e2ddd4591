//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod context;
pub mod login;
pub mod member;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

use crate::session::Role;

/// memberctl - command-line client for the member registry
#[derive(Parser, Debug)]
#[command(name = "memberctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json) [default: pretty]
    #[arg(
        long,
        global = true,
        env = "MEMBERCTL_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "MEMBERCTL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Backend base URL (default http://localhost:8080/api)
    #[arg(long, global = true, env = "MEMBERCTL_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "MEMBERCTL_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with email and password
    #[command(after_help = "EXAMPLES:\n  \
            memberctl login                           # Prompt for email and password\n  \
            memberctl login -e ada@example.com        # Prompt for password only\n  \
            MEMBERCTL_PASSWORD=... memberctl login -e ada@example.com")]
    Login {
        /// Account email
        #[arg(long, short = 'e')]
        email: Option<String>,
    },

    /// Create an account and log in
    Register {
        /// Full name
        #[arg(long)]
        name: Option<String>,

        /// Account email
        #[arg(long, short = 'e')]
        email: Option<String>,

        /// Phone number (digits only)
        #[arg(long)]
        phone: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show session and configuration status
    Status,

    /// Display version information
    Version,

    /// View and manage members
    #[command(subcommand)]
    Member(MemberCommands),

    /// Generate shell completions
    #[command(after_help = "\
  bash:   memberctl completion bash > /etc/bash_completion.d/memberctl
  zsh:    memberctl completion zsh > \"${fpath[1]}/_memberctl\"
  fish:   memberctl completion fish > ~/.config/fish/completions/memberctl.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Member subcommands
#[derive(Subcommand, Debug)]
pub enum MemberCommands {
    /// Show your own member record
    Me,

    /// Update your own name or phone number
    UpdateMe {
        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// Preview without saving
        #[arg(long, short = 'n')]
        dry_run: bool,
    },

    /// List all members (admin)
    #[command(visible_alias = "ls")]
    List {
        /// Maximum results to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a member (admin)
    #[command(visible_alias = "g")]
    Get {
        /// Member ID
        id: String,
    },

    /// Create a member (admin)
    #[command(after_help = "EXAMPLES:\n  \
            memberctl member create --name \"Ada Lovelace\" --email ada@example.com --phone 5551234567\n  \
            memberctl member create --name Ada --email ada@example.com --phone 5551234567 --dry-run")]
    Create {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Phone number (digits only)
        #[arg(long)]
        phone: String,

        /// Preview without saving
        #[arg(long, short = 'n')]
        dry_run: bool,
    },

    /// Update a member's name or phone number (admin)
    Update {
        /// Member ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New phone number
        #[arg(long)]
        phone: Option<String>,

        /// Preview without saving
        #[arg(long, short = 'n')]
        dry_run: bool,
    },

    /// Change a member's role (admin)
    SetRole {
        /// Member ID
        id: String,

        /// New role
        #[arg(value_enum)]
        role: Role,

        /// Preview without saving
        #[arg(long, short = 'n')]
        dry_run: bool,
    },

    /// Delete a member (admin)
    #[command(after_help = "EXAMPLES:\n  \
            memberctl member delete m42          # With confirmation\n  \
            memberctl member delete m42 --yes    # Skip confirmation\n  \
            memberctl member delete m42 --dry-run")]
    Delete {
        /// Member ID
        id: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,

        /// Preview without deleting
        #[arg(long, short = 'n')]
        dry_run: bool,
    },
}
