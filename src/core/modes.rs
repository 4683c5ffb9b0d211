use crate::error::ConversationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One reply segment the user can switch on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ModeKind {
    Analysis,
    Planning,
    Summary,
}

impl ModeKind {
    pub fn parse(name: &str) -> Result<Self, ConversationError> {
        Self::from_str(name.trim()).map_err(|_| ConversationError::UnknownMode(name.trim().to_string()))
    }
}

/// Output mode switches. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeFlags {
    pub analysis: bool,
    pub planning: bool,
    pub summary: bool,
}

impl Default for ModeFlags {
    fn default() -> Self {
        Self {
            analysis: true,
            planning: true,
            summary: true,
        }
    }
}

impl ModeFlags {
    pub fn none() -> Self {
        Self {
            analysis: false,
            planning: false,
            summary: false,
        }
    }

    /// Only the listed modes enabled.
    pub fn only(kinds: &[ModeKind]) -> Self {
        let mut flags = Self::none();
        for kind in kinds {
            flags.set(*kind, true);
        }
        flags
    }

    pub fn get(self, kind: ModeKind) -> bool {
        match kind {
            ModeKind::Analysis => self.analysis,
            ModeKind::Planning => self.planning,
            ModeKind::Summary => self.summary,
        }
    }

    pub fn set(&mut self, kind: ModeKind, enabled: bool) {
        match kind {
            ModeKind::Analysis => self.analysis = enabled,
            ModeKind::Planning => self.planning = enabled,
            ModeKind::Summary => self.summary = enabled,
        }
    }

    /// Flip one mode and return its new value.
    pub fn toggle(&mut self, kind: ModeKind) -> bool {
        let next = !self.get(kind);
        self.set(kind, next);
        next
    }

    pub fn enabled(self) -> Vec<ModeKind> {
        ModeKind::iter().filter(|kind| self.get(*kind)).collect()
    }

    /// True when no segment would be produced.
    pub fn is_silent(self) -> bool {
        !(self.analysis || self.planning || self.summary)
    }
}

impl fmt::Display for ModeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = ModeKind::iter()
            .map(|kind| format!("{kind}={}", if self.get(kind) { "on" } else { "off" }))
            .collect();
        f.write_str(&parts.join(" "))
    }
}
