use super::Config;
use crate::core::modes::{ModeFlags, ModeKind};

pub(super) const DELAY_MIN_MS_VAR: &str = "AGENTSIM_DELAY_MIN_MS";
pub(super) const DELAY_MAX_MS_VAR: &str = "AGENTSIM_DELAY_MAX_MS";
pub(super) const LOG_LEVEL_VAR: &str = "AGENTSIM_LOG_LEVEL";
pub(super) const MODES_VAR: &str = "AGENTSIM_MODES";

/// Every variable [`Config::apply_env_overrides`] reads.
#[cfg_attr(not(test), allow(dead_code))]
pub(super) const OVERRIDE_VARS: [&str; 4] =
    [DELAY_MIN_MS_VAR, DELAY_MAX_MS_VAR, LOG_LEVEL_VAR, MODES_VAR];

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(min) = std::env::var(DELAY_MIN_MS_VAR)
            && let Ok(min) = min.trim().parse::<u64>()
        {
            self.reply.delay_min_ms = min;
        }

        if let Ok(max) = std::env::var(DELAY_MAX_MS_VAR)
            && let Ok(max) = max.trim().parse::<u64>()
        {
            self.reply.delay_max_ms = max;
        }

        if let Ok(level) = std::env::var(LOG_LEVEL_VAR)
            && !level.trim().is_empty()
        {
            self.log_level = level.trim().to_string();
        }

        // Comma list of modes to enable; everything else is switched off.
        if let Ok(modes) = std::env::var(MODES_VAR) {
            let mut kinds = Vec::new();
            for name in modes.split(',').filter(|n| !n.trim().is_empty()) {
                match ModeKind::parse(name) {
                    Ok(kind) => kinds.push(kind),
                    Err(e) => {
                        tracing::warn!("ignoring AGENTSIM_MODES entry: {e}");
                    }
                }
            }
            self.modes = ModeFlags::only(&kinds);
        }
    }
}
