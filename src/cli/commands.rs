use agentsim::ModeFlags;
use clap::{Args, Parser, Subcommand};

/// `agentsim` - a chat assistant that fakes agentic replies from keyword heuristics.
#[derive(Parser, Debug)]
#[command(name = "agentsim")]
#[command(version)]
#[command(about = "A simulated agentic chat assistant.", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub modes: ModeOverrides,

    /// Log at debug level regardless of config
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive chat (default)
    Chat,

    /// Send a single message, print the reply and exit
    Ask {
        /// Message text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// List the active heuristic rules
    Rules,
}

/// Startup switches that turn reply segments off for this run only.
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct ModeOverrides {
    /// Leave out the Analysis segment
    #[arg(long, global = true)]
    pub no_analysis: bool,

    /// Leave out the Plan segment
    #[arg(long, global = true)]
    pub no_planning: bool,

    /// Leave out the Next move segment
    #[arg(long, global = true)]
    pub no_summary: bool,
}

impl ModeOverrides {
    pub fn apply(self, mut flags: ModeFlags) -> ModeFlags {
        if self.no_analysis {
            flags.analysis = false;
        }
        if self.no_planning {
            flags.planning = false;
        }
        if self.no_summary {
            flags.summary = false;
        }
        flags
    }
}
