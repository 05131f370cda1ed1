//! Clap derive structures for the `cohortal` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// cohortal -- CLI for the Cohortal clinical-research data platform
#[derive(Debug, Parser)]
#[command(
    name = "cohortal",
    version,
    about = "Query and administer a Cohortal clinical-research platform",
    long_about = "A command-line client for Cohortal deployments: dashboard \
        content, AQL queries (list, validate, execute), research projects, \
        and user administration.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Deployment profile to use
    #[arg(long, short = 'p', env = "COHORTAL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend base URL (overrides profile)
    #[arg(long, env = "COHORTAL_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Identity-provider realm URL (overrides profile)
    #[arg(long, env = "COHORTAL_ISSUER_URL", global = true)]
    pub issuer_url: Option<String>,

    /// Username for password-grant login
    #[arg(long, short = 'u', env = "COHORTAL_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for password-grant login
    #[arg(long, env = "COHORTAL_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "COHORTAL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "COHORTAL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "COHORTAL_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Sort direction ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show dashboard content: metrics, cards, latest projects
    #[command(alias = "dash")]
    Dashboard,

    /// Manage AQL queries
    #[command(alias = "a")]
    Aql(AqlArgs),

    /// Manage research projects
    #[command(alias = "proj")]
    Projects(ProjectsArgs),

    /// Administer platform users
    #[command(alias = "u")]
    Users(UsersArgs),

    /// Show the authenticated user's profile and roles
    Whoami,

    /// Inspect CLI configuration
    Config(ConfigArgs),
}

// ── AQL ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AqlArgs {
    #[command(subcommand)]
    pub command: AqlCommand,
}

#[derive(Debug, Subcommand)]
pub enum AqlCommand {
    /// List stored AQL queries
    List(AqlListArgs),

    /// Validate a query against the backend validator
    Validate {
        /// The query text; reads stdin when omitted
        query: Option<String>,
    },

    /// Execute a stored query and print its result set
    Execute {
        /// Stored query id
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct AqlListArgs {
    /// Case-insensitive substring filter on the query name
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Show only public queries
    #[arg(long)]
    pub public: bool,

    /// Sort column
    #[arg(long, default_value = "name")]
    pub sort: AqlSortColumn,

    /// Sort direction
    #[arg(long, default_value = "asc")]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AqlSortColumn {
    Name,
    Author,
    Created,
}

// ── Projects ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List research projects
    List(ProjectsListArgs),
}

#[derive(Debug, Args)]
pub struct ProjectsListArgs {
    /// Sort column
    #[arg(long, default_value = "name")]
    pub sort: ProjectSortColumn,

    /// Sort direction
    #[arg(long, default_value = "asc")]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProjectSortColumn {
    Name,
    Status,
    Created,
}

// ── Users ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List platform users
    List(UsersListArgs),

    /// Approve a pending user
    Approve {
        /// User id (identity-provider subject)
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct UsersListArgs {
    /// Show users awaiting approval instead of approved users
    #[arg(long)]
    pub pending: bool,

    /// Sort column
    #[arg(long, default_value = "name")]
    pub sort: UserSortColumn,

    /// Sort direction
    #[arg(long, default_value = "asc")]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UserSortColumn {
    Name,
    Organization,
    Created,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the resolved configuration (passwords redacted)
    Show,

    /// Print the config file path
    Path,
}
