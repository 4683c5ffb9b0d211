use super::conversation::{Conversation, Message};
use super::formatter::Formatter;
use super::heuristics::HeuristicTable;
use super::modes::{ModeFlags, ModeKind};
use crate::config::Config;
use rand::Rng;
use std::time::Duration;
use strum::Display;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_DELAY_MIN_MS: u64 = 550;
pub const DEFAULT_DELAY_MAX_MS: u64 = 950;

const SUPPRESSED_REPLY_NOTICE: &str = "All output modes are off, so there is nothing to reply with.";

/// Inclusive range the simulated "thinking" pause is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyDelay {
    min: Duration,
    max: Duration,
}

impl Default for ReplyDelay {
    fn default() -> Self {
        Self::from_millis(DEFAULT_DELAY_MIN_MS, DEFAULT_DELAY_MAX_MS)
    }
}

impl ReplyDelay {
    /// Bounds are reordered if given backwards.
    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        let (lo, hi) = if min_ms <= max_ms {
            (min_ms, max_ms)
        } else {
            (max_ms, min_ms)
        };
        Self {
            min: Duration::from_millis(lo),
            max: Duration::from_millis(hi),
        }
    }

    pub fn fixed(delay: Duration) -> Self {
        Self {
            min: delay,
            max: delay,
        }
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let lo = u64::try_from(self.min.as_millis()).unwrap_or(u64::MAX);
        let hi = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(rand::rng().random_range(lo..=hi))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum IgnoreReason {
    EmptyInput,
    ReplyPending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The user message was appended and a reply is on its way.
    Accepted { message_id: String, delay: Duration },
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ControllerState {
    Idle,
    Pending,
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub delay: ReplyDelay,
    pub formatter: Formatter,
    /// Append an agent message even when every mode is off and the reply
    /// text is empty. When false a system notice is appended instead.
    pub append_empty: bool,
    /// System message placed at the top of a fresh conversation.
    pub greeting: Option<String>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            delay: ReplyDelay::default(),
            formatter: Formatter::default(),
            append_empty: true,
            greeting: None,
        }
    }
}

impl ControllerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            delay: ReplyDelay::from_millis(config.reply.delay_min_ms, config.reply.delay_max_ms),
            formatter: Formatter::new(config.formatter),
            append_empty: config.reply.append_empty,
            greeting: config.reply.greeting.clone(),
        }
    }
}

struct DraftReply {
    content: String,
    hint: String,
}

struct PendingReply {
    trigger_id: String,
    cancel: CancellationToken,
    reply_rx: oneshot::Receiver<DraftReply>,
    handle: JoinHandle<()>,
}

/// Owns the conversation and sequences user and agent turns.
///
/// Idle → Pending on an accepted [`submit`], Pending → Idle when
/// [`next_reply`] delivers or [`shutdown`] cancels. Only one reply can be in
/// flight; submissions while pending are dropped, not queued.
///
/// The delay runs in a spawned task that only ever sends the finished reply
/// back over a oneshot channel, so dropping the controller mid-delay cannot
/// touch conversation state.
///
/// [`submit`]: ConversationController::submit
/// [`next_reply`]: ConversationController::next_reply
/// [`shutdown`]: ConversationController::shutdown
pub struct ConversationController {
    conversation: Conversation,
    table: HeuristicTable,
    modes: ModeFlags,
    options: ControllerOptions,
    pending: Option<PendingReply>,
}

impl ConversationController {
    pub fn new(table: HeuristicTable, modes: ModeFlags, options: ControllerOptions) -> Self {
        let mut conversation = Conversation::new();
        if let Some(greeting) = options.greeting.as_deref().filter(|g| !g.trim().is_empty()) {
            conversation.push(Message::system(greeting));
        }
        Self {
            conversation,
            table,
            modes,
            options,
            pending: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            HeuristicTable::with_custom_rules(
                &config.heuristics.rules,
                config.heuristics.include_builtin,
            ),
            config.modes,
            ControllerOptions::from_config(config),
        )
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn table(&self) -> &HeuristicTable {
        &self.table
    }

    pub fn modes(&self) -> ModeFlags {
        self.modes
    }

    pub fn set_modes(&mut self, modes: ModeFlags) {
        self.modes = modes;
    }

    pub fn set_mode(&mut self, kind: ModeKind, enabled: bool) {
        self.modes.set(kind, enabled);
    }

    pub fn toggle_mode(&mut self, kind: ModeKind) -> bool {
        self.modes.toggle(kind)
    }

    pub fn state(&self) -> ControllerState {
        if self.pending.is_some() {
            ControllerState::Pending
        } else {
            ControllerState::Idle
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Id of the user message whose reply is in flight.
    pub fn pending_for(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.trigger_id.as_str())
    }

    /// Accept a user message and schedule the agent reply.
    ///
    /// Must be called from within a Tokio runtime: the reply delay runs on a
    /// spawned task.
    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            tracing::debug!(reason = %IgnoreReason::EmptyInput, "submission ignored");
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }
        if self.pending.is_some() {
            tracing::debug!(reason = %IgnoreReason::ReplyPending, "submission ignored");
            return SubmitOutcome::Ignored(IgnoreReason::ReplyPending);
        }

        // Reply is drafted against the history as it was before this turn.
        let rule = self.table.match_rule(trimmed);
        let draft = DraftReply {
            content: self
                .options
                .formatter
                .format(trimmed, self.modes, rule, &self.conversation),
            hint: format!("heuristic: {}", rule.id),
        };

        let message_id = self.conversation.push(Message::user(trimmed)).id().to_string();
        let delay = self.options.delay.sample();
        self.pending = Some(spawn_reply(message_id.clone(), draft, delay));

        tracing::debug!(
            message_id = %message_id,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "reply scheduled"
        );
        SubmitOutcome::Accepted { message_id, delay }
    }

    /// Wait for the pending reply, append it and return to idle.
    ///
    /// Returns `None` when nothing is pending. Cancel-safe: dropping the
    /// future leaves the reply pending.
    pub async fn next_reply(&mut self) -> Option<Message> {
        let pending = self.pending.as_mut()?;
        let received = (&mut pending.reply_rx).await;
        let pending = self.pending.take()?;

        let Ok(draft) = received else {
            tracing::warn!(message_id = %pending.trigger_id, "reply task ended without a reply");
            return None;
        };

        let message = if draft.content.is_empty() && !self.options.append_empty {
            Message::system(SUPPRESSED_REPLY_NOTICE)
        } else {
            Message::agent(draft.content, Some(draft.hint))
        };
        tracing::info!(
            message_id = %pending.trigger_id,
            author = %message.author(),
            "reply delivered"
        );
        Some(self.conversation.push(message).clone())
    }

    /// Cancel any in-flight reply. Returns true if one was cancelled.
    pub fn shutdown(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        tracing::warn!(message_id = %pending.trigger_id, "pending reply cancelled");
        pending.cancel.cancel();
        pending.handle.abort();
        true
    }
}

impl Drop for ConversationController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
        }
    }
}

fn spawn_reply(trigger_id: String, draft: DraftReply, delay: Duration) -> PendingReply {
    let cancel = CancellationToken::new();
    let (reply_tx, reply_rx) = oneshot::channel();
    let token = cancel.clone();

    let handle = tokio::spawn(async move {
        tokio::select! {
            () = token.cancelled() => {}
            () = tokio::time::sleep(delay) => {
                let _ = reply_tx.send(draft);
            }
        }
    });

    PendingReply {
        trigger_id,
        cancel,
        reply_rx,
        handle,
    }
}
