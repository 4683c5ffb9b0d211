pub mod controller;
pub mod conversation;
pub mod formatter;
pub mod heuristics;
pub mod modes;

pub use controller::{
    ControllerOptions, ControllerState, ConversationController, IgnoreReason, ReplyDelay,
    SubmitOutcome,
};
pub use conversation::{Author, Conversation, Message};
pub use formatter::{FormatOptions, Formatter, format_agent_message, summarize_primary_task};
pub use heuristics::{HeuristicRule, HeuristicTable};
pub use modes::{ModeFlags, ModeKind};
