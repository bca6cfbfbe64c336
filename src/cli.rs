use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "cmdref")]
#[command(about = "Browse CLI command references and step-by-step scenarios", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Case-insensitive text matched against titles, commands and descriptions
    pub term: Option<String>,
    /// Exact category name ("All" for no constraint)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Only records from one collection, e.g. docker
    #[arg(long)]
    pub collection: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List commands matching the filters
    Commands {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List scenarios matching the filters
    Scenarios {
        #[command(flatten)]
        filter: FilterArgs,
        /// Beginner, Intermediate or Advanced ("All" for no constraint)
        #[arg(short, long)]
        difficulty: Option<String>,
    },
    /// List the categories available for filtering
    Categories {
        /// Scenario categories instead of command categories
        #[arg(long)]
        scenarios: bool,
        #[arg(long)]
        collection: Option<String>,
    },
    /// List the scenario difficulties available for filtering
    Difficulties {
        #[arg(long)]
        collection: Option<String>,
    },
    /// List loaded collections
    Collections,
    /// Show one command or scenario in full
    Show { id: String },
    /// Write a command verbatim to stdout or a file
    Copy {
        id: String,
        /// Step number, for scenarios
        #[arg(long)]
        step: Option<u32>,
        /// Write to this file instead of stdout
        #[arg(long)]
        to: Option<String>,
    },
    /// Interactive search and detail view
    Browse {
        /// Browse scenarios instead of commands
        #[arg(long)]
        scenarios: bool,
        #[arg(long)]
        collection: Option<String>,
    },
    /// Load the configured catalog and report what was found
    Validate,
    /// Print configuration values
    PrintConfig,
}
