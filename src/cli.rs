//! CLI argument definitions.

use std::str::FromStr;

use chrono::{Days, NaiveDate};
use clap::{Args, Parser, Subcommand};

use crate::ports::Clock;
use crate::task::FieldAssignment;

/// Top-level CLI parser for `asana-task`.
#[derive(Debug, Parser)]
#[command(name = "asana-task", version, about = "Create Asana tasks from the command line")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a task.
    Create(CreateArgs),
    /// List the workspaces the token can see.
    Workspaces,
    /// List unarchived projects in a workspace.
    Projects {
        /// Workspace gid (defaults to ASANA_WORKSPACE).
        #[arg(long)]
        workspace: Option<String>,
    },
    /// List users in a workspace.
    Users {
        /// Workspace gid (defaults to ASANA_WORKSPACE).
        #[arg(long)]
        workspace: Option<String>,
    },
    /// Show the user that owns the access token.
    Me,
    /// List the custom fields of a project.
    Fields {
        /// Project gid.
        #[arg(long)]
        project: String,
    },
}

/// Arguments of `asana-task create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Task name.
    #[arg(long)]
    pub name: String,

    /// Workspace gid (defaults to ASANA_WORKSPACE).
    #[arg(long)]
    pub workspace: Option<String>,

    /// Project gid; repeat to add the task to several projects.
    #[arg(long = "project", value_name = "GID")]
    pub projects: Vec<String>,

    /// Task description.
    #[arg(long)]
    pub description: Option<String>,

    /// Assignee gid, or `me`.
    #[arg(long)]
    pub assignee: Option<String>,

    /// Due date: YYYY-MM-DD, today, tomorrow or +Nd.
    #[arg(long)]
    pub due: Option<DueArg>,

    /// Custom field value as GID[:text|number|enum]=VALUE; repeatable.
    #[arg(long = "field", value_name = "ASSIGNMENT")]
    pub fields: Vec<FieldAssignment>,

    /// Append the signature to the notes.
    #[arg(long, conflicts_with = "no_signature")]
    pub signature: bool,

    /// Do not append the signature, even if ASANA_APPEND_SIGNATURE is set.
    #[arg(long)]
    pub no_signature: bool,
}

impl CreateArgs {
    /// Resolves the signature flags against the configured default.
    #[must_use]
    pub fn append_signature(&self, default: bool) -> bool {
        if self.signature {
            true
        } else if self.no_signature {
            false
        } else {
            default
        }
    }
}

/// A due date as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueArg {
    /// An explicit calendar date.
    On(NaiveDate),
    /// Some number of days from today (0 = today).
    InDays(u64),
}

impl DueArg {
    /// Resolves to a calendar date using `clock` for relative forms.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset overflows the calendar.
    pub fn resolve(self, clock: &dyn Clock) -> Result<NaiveDate, String> {
        match self {
            Self::On(date) => Ok(date),
            Self::InDays(days) => clock
                .today()
                .checked_add_days(Days::new(days))
                .ok_or_else(|| format!("due date {days} days from today is out of range")),
        }
    }
}

impl FromStr for DueArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "today" => return Ok(Self::InDays(0)),
            "tomorrow" => return Ok(Self::InDays(1)),
            _ => {}
        }

        if let Some(days) = s.strip_prefix('+').and_then(|rest| rest.strip_suffix('d')) {
            return days
                .parse()
                .map(Self::InDays)
                .map_err(|_| format!("invalid relative due date {s:?}, expected +Nd"));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self::On)
            .map_err(|_| format!("invalid due date {s:?}, expected YYYY-MM-DD, today, tomorrow or +Nd"))
    }
}
