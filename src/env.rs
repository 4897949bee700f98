use crate::group_word::GroupWordAlgorithm;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::env as stdenv;

/// Variable that switches every command to lenient input checking.
pub const LENIENT_VAR: &str = "PUZZLES_LENIENT";

/// Variable that selects the default group-word algorithm.
pub const GROUP_ALGORITHM_VAR: &str = "PUZZLES_GROUP_ALGORITHM";

/// Mutable, user-level view of the process environment used by the interpreter.
///
/// The environment contains:
/// - `vars`: a snapshot of environment variables, consulted for defaults that
///   command-line flags did not set.
/// - `should_exit`: a flag that the REPL loop checks to know when to terminate.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Key-value store of environment variables (e.g., `PUZZLES_LENIENT`).
    pub vars: HashMap<String, String>,
    /// When set to true, indicates that an interactive loop should exit.
    pub should_exit: bool,
}

impl Environment {
    /// Capture the current process variables into a new `Environment` instance.
    pub fn new() -> Self {
        Self {
            vars: stdenv::vars().collect(),
            should_exit: false,
        }
    }

    /// Get the value of a variable from the snapshot.
    pub fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    /// Set or override a variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Whether `PUZZLES_LENIENT` asks for lenient input checking.
    ///
    /// Unrecognized values count as "off".
    pub fn lenient(&self) -> bool {
        self.get_var(LENIENT_VAR)
            .map(|v| {
                matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(false)
    }

    /// Default group-word algorithm, from `PUZZLES_GROUP_ALGORITHM` when set.
    pub fn group_algorithm(&self) -> Result<GroupWordAlgorithm> {
        match self.get_var(GROUP_ALGORITHM_VAR) {
            Some(v) => v
                .parse::<GroupWordAlgorithm>()
                .map_err(|e| anyhow!("invalid {}: {}", GROUP_ALGORITHM_VAR, e)),
            None => Ok(GroupWordAlgorithm::default()),
        }
    }
}
