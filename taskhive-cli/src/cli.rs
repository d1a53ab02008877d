//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};

use taskhive_core::{Priority, SortKey, Urgency};

#[derive(Parser)]
#[command(name = "taskhive")]
#[command(about = "A task manager with categories, priorities and due dates")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Priority argument, mapped onto the core enum
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(p: PriorityArg) -> Self {
        match p {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

/// Urgency argument, mapped onto the core enum
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum UrgencyArg {
    Urgent,
    Normal,
    Low,
}

impl From<UrgencyArg> for Urgency {
    fn from(u: UrgencyArg) -> Self {
        match u {
            UrgencyArg::Urgent => Urgency::Urgent,
            UrgencyArg::Normal => Urgency::Normal,
            UrgencyArg::Low => Urgency::Low,
        }
    }
}

/// Sort argument, mapped onto the core sort key
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SortArg {
    Created,
    Priority,
    Due,
    Alphabetical,
    Today,
    Overdue,
}

impl From<SortArg> for SortKey {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Created => SortKey::Created,
            SortArg::Priority => SortKey::Priority,
            SortArg::Due => SortKey::Due,
            SortArg::Alphabetical => SortKey::Alphabetical,
            SortArg::Today => SortKey::Today,
            SortArg::Overdue => SortKey::Overdue,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lists tasks with filtering and sorting
    List {
        /// Route scope: all, overdue, today, upcoming, completed,
        /// high/medium/low, or category:<id>
        #[arg(default_value = "all")]
        route: String,
        /// Search title and description (case-insensitive)
        #[arg(long, short = 's', value_name = "QUERY")]
        search: Option<String>,
        /// Show only tasks with this priority
        #[arg(long, short = 'p', value_enum)]
        priority: Option<PriorityArg>,
        /// Hide completed tasks
        #[arg(long)]
        hide_completed: bool,
        /// Sort order
        #[arg(long, value_enum, default_value = "created")]
        sort: SortArg,
    },

    /// Adds a task
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
        /// Due date (YYYY-MM-DD, "today" or "tomorrow")
        #[arg(long, short = 'd', value_name = "DATE")]
        due: Option<String>,
        /// Description
        #[arg(long, value_name = "TEXT")]
        desc: Option<String>,
        #[arg(long, short = 'p', value_enum)]
        priority: Option<PriorityArg>,
        #[arg(long, short = 'u', value_enum)]
        urgency: Option<UrgencyArg>,
        /// Category id
        #[arg(long, short = 'C', value_name = "ID")]
        category: Option<u32>,
    },

    /// Toggles a task's completion status
    Done {
        id: u32,
    },

    /// Edits a task's fields
    Edit {
        id: u32,
        #[arg(long, value_name = "TEXT")]
        title: Option<String>,
        #[arg(long, value_name = "TEXT")]
        desc: Option<String>,
        /// Due date (YYYY-MM-DD, "today" or "tomorrow"); an empty string
        /// clears it
        #[arg(long, short = 'd', value_name = "DATE")]
        due: Option<String>,
        #[arg(long, short = 'p', value_enum)]
        priority: Option<PriorityArg>,
        #[arg(long, short = 'u', value_enum)]
        urgency: Option<UrgencyArg>,
        /// Category id; 0 moves the task to uncategorized
        #[arg(long, short = 'C', value_name = "ID")]
        category: Option<u32>,
    },

    /// Removes a task
    Rm {
        id: u32,
    },

    /// Lists categories with task counts
    Categories,
}
