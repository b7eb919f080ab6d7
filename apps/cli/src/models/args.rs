//! # CLI Argument Definitions
//!
//! Every command prints JSON on `stdout`; logs go to `stderr`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "toggle")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Administer feature toggles and query their state")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON). Defaults to `toggle.*` in the working directory.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List group names
    Groups,
    /// Create a group if it does not exist
    AddGroup { name: String },
    /// List the features of a group
    Features { group: String },
    /// Show one feature
    Get { group: String, name: String },
    /// Create or overwrite a feature
    Add {
        group: String,
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Switch the feature on
        #[arg(long)]
        enabled: bool,
        #[command(flatten)]
        gating: Gating,
    },
    /// Upsert every feature of a JSON array of specs in one transaction
    Import { file: PathBuf },
    /// Change selected attributes of a feature
    Update {
        group: String,
        name: String,
        /// New feature name
        #[arg(long)]
        rename: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        enabled: Option<bool>,
        #[command(flatten)]
        gating: Gating,
        /// Remove user-group gating
        #[arg(long, conflicts_with_all = ["user_groups", "pattern"])]
        clear_user_groups: bool,
    },
    /// Delete a feature; the group is kept
    Remove { group: String, name: String },
    /// Decide whether a feature is on for a requester
    Active {
        group: String,
        name: String,
        /// Requester group (repeatable)
        #[arg(long = "as", value_name = "GROUP")]
        requester: Vec<String>,
        /// Print the reason instead of a bare boolean
        #[arg(long)]
        explain: bool,
    },
    /// Resolve every feature, or every feature of one group
    States {
        group: Option<String>,
        /// Requester group (repeatable)
        #[arg(long = "as", value_name = "GROUP")]
        requester: Vec<String>,
    },
}

/// User-group gating flags shared by `add` and `update`.
#[derive(Debug, Args)]
pub struct Gating {
    /// Allowed requester group (repeatable)
    #[arg(short = 'u', long = "user-group", value_name = "GROUP")]
    pub user_groups: Vec<String>,
    /// Regular expression matched against requester groups
    #[arg(short, long)]
    pub pattern: Option<String>,
}

impl Gating {
    pub const fn is_set(&self) -> bool {
        !self.user_groups.is_empty() || self.pattern.is_some()
    }
}
