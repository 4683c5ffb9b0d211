use super::conversation::{Conversation, Message};
use super::heuristics::HeuristicRule;
use super::modes::ModeFlags;
use crate::utils::text::collapse_whitespace;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

pub const DEFAULT_PRIMARY_TASK_MAX_CHARS: usize = 120;
pub const DEFAULT_RECENT_SIGNALS: usize = 2;
pub const PRIMARY_TASK_FALLBACK: &str = "clarifying the core objective";

const SEGMENT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Inputs at or above this many characters are summarised by the first
    /// plan step instead of being echoed back.
    pub primary_task_max_chars: usize,
    /// How many earlier user messages to quote under "Recent signals".
    pub recent_signals: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            primary_task_max_chars: DEFAULT_PRIMARY_TASK_MAX_CHARS,
            recent_signals: DEFAULT_RECENT_SIGNALS,
        }
    }
}

/// Renders a matched rule into the agent's reply text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> FormatOptions {
        self.options
    }

    /// Build the reply: Analysis, Plan and Next move segments in that order,
    /// each present only when its mode is on, separated by a blank line.
    /// `history` is the conversation *before* `input` was appended.
    pub fn format(
        &self,
        input: &str,
        modes: ModeFlags,
        rule: &HeuristicRule,
        history: &Conversation,
    ) -> String {
        let mut segments: Vec<String> = Vec::with_capacity(3);

        if modes.analysis {
            let signals = history.recent_user_messages(self.options.recent_signals);
            segments.push(analysis_segment(&rule.narrative, &signals));
        }

        if modes.planning {
            segments.push(plan_segment(&rule.steps));
        }

        if modes.summary {
            let task = self.primary_task(input, &rule.steps);
            segments.push(format!("Next move: I'll start by focusing on: {task}"));
        }

        segments.join(SEGMENT_SEPARATOR)
    }

    pub fn primary_task(&self, input: &str, steps: &[String]) -> String {
        let collapsed = collapse_whitespace(input);
        if !collapsed.is_empty() && collapsed.chars().count() < self.options.primary_task_max_chars
        {
            return collapsed;
        }
        steps
            .first()
            .cloned()
            .unwrap_or_else(|| PRIMARY_TASK_FALLBACK.to_string())
    }
}

fn analysis_segment(narrative: &str, signals: &[&Message]) -> String {
    let mut out = format!("Analysis: {narrative}");
    if !signals.is_empty() {
        out.push_str("\nRecent signals:");
        for message in signals {
            let _ = write!(out, "\n- {}", message.content().trim());
        }
    }
    out
}

fn plan_segment(steps: &[String]) -> String {
    let mut out = String::from("Plan:");
    for (index, step) in steps.iter().enumerate() {
        let _ = write!(out, "\n{}. {step}", index + 1);
    }
    out
}

/// [`Formatter::format`] with default options.
pub fn format_agent_message(
    input: &str,
    modes: ModeFlags,
    rule: &HeuristicRule,
    history: &Conversation,
) -> String {
    Formatter::default().format(input, modes, rule, history)
}

/// [`Formatter::primary_task`] with default options.
pub fn summarize_primary_task(input: &str, steps: &[String]) -> String {
    Formatter::default().primary_task(input, steps)
}
