use super::env_overrides::OVERRIDE_VARS;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// The `AGENTSIM_*` override variables, pinned for the length of a test.
///
/// Construction takes the process-wide env lock, records the current value
/// of every override variable and clears them all, so a test only sees the
/// variables it sets itself. Drop puts the recorded values back before the
/// lock is released.
pub(super) struct OverrideEnv {
    saved: Vec<(&'static str, Option<String>)>,
    _lock: MutexGuard<'static, ()>,
}

impl OverrideEnv {
    pub(super) fn cleared() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = OVERRIDE_VARS
            .iter()
            .map(|key| (*key, std::env::var(key).ok()))
            .collect();
        for key in OVERRIDE_VARS {
            // SAFETY: ENV_LOCK is held, so no other test touches the env.
            unsafe {
                std::env::remove_var(key);
            }
        }
        Self { saved, _lock: lock }
    }

    pub(super) fn with(vars: &[(&'static str, &str)]) -> Self {
        let env = Self::cleared();
        for (key, value) in vars {
            debug_assert!(OVERRIDE_VARS.contains(key), "{key} is not an override variable");
            // SAFETY: ENV_LOCK is held for the life of `env`.
            unsafe {
                std::env::set_var(key, value);
            }
        }
        env
    }
}

impl Drop for OverrideEnv {
    fn drop(&mut self) {
        for (key, previous) in &self.saved {
            // SAFETY: `_lock` is dropped after this body runs.
            unsafe {
                match previous {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::env_overrides::{LOG_LEVEL_VAR, MODES_VAR};
    use super::*;

    #[test]
    fn cleared_hides_every_override_var() {
        let env = OverrideEnv::with(&[(MODES_VAR, "planning"), (LOG_LEVEL_VAR, "info")]);
        drop(env);

        let _env = OverrideEnv::cleared();
        for key in OVERRIDE_VARS {
            assert!(std::env::var(key).is_err(), "{key} should be unset");
        }
    }

    #[test]
    fn drop_restores_recorded_values() {
        let env = OverrideEnv::with(&[(MODES_VAR, "summary")]);
        assert_eq!(std::env::var(MODES_VAR).as_deref(), Ok("summary"));
        let recorded = env.saved.clone();
        drop(env);

        let next = OverrideEnv::cleared();
        assert_eq!(next.saved, recorded);
    }
}
