use serde::{Deserialize, Serialize};

use crate::event::Intent;

/// Raw `--flag` arguments forwarded to the native engine shell at startup.
///
/// The embedding layer itself consumes only
/// [`ShellArgs::ENABLE_SOFTWARE_RENDERING`]; the remaining flags ride along
/// untouched for the native shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellArgs {
    args: Vec<String>,
}

impl ShellArgs {
    pub const ENABLE_SOFTWARE_RENDERING: &'static str = "--enable-software-rendering";
    pub const DETERMINISTIC_RENDERING: &'static str = "--deterministic-rendering";
    pub const TRACE_STARTUP: &'static str = "--trace-startup";
    pub const VERBOSE_LOGGING: &'static str = "--verbose-logging";

    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    /// Extracts shell flags from the boolean extras of a launch intent, e.g.
    /// an extra named `enable-software-rendering` set to `true`.
    pub fn from_intent(intent: &Intent) -> Self {
        let mut args = ShellArgs::default();
        for flag in [
            Self::ENABLE_SOFTWARE_RENDERING,
            Self::DETERMINISTIC_RENDERING,
            Self::TRACE_STARTUP,
            Self::VERBOSE_LOGGING,
        ] {
            let extra = flag.trim_start_matches("--");
            if intent.bool_extra(extra) {
                args.push(flag);
            }
        }
        args
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }

    pub fn push(&mut self, flag: &str) {
        self.args.push(flag.into());
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }
}
