use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `agentsim`.
///
/// Submission guards (blank input, a reply already pending) are reported as
/// [`SubmitOutcome`](crate::core::controller::SubmitOutcome) values, not as
/// errors. Only the fallible edges end up here: configuration, transcript
/// export and terminal IO.
#[derive(Debug, Error)]
pub enum AgentSimError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Conversation ─────────────────────────────────────────────────────
    #[error("conversation: {0}")]
    Conversation(#[from] ConversationError),

    // ── Terminal IO ──────────────────────────────────────────────────────
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Conversation errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("unknown mode '{0}' (expected analysis, planning or summary)")]
    UnknownMode(String),

    #[error("transcript export failed: {0}")]
    Export(#[from] serde_json::Error),
}

pub type Result<T, E = AgentSimError> = std::result::Result<T, E>;
