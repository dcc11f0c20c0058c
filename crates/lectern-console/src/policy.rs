//! Console visibility policy.
//!
//! The verdict is a pure function of the parent executable name at the time
//! of the startup call. An interactive shell parent means the user can see
//! our output, so the console stays; anything else, including a parent we
//! failed to identify, means the window is noise and gets hidden.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parent executables that keep the console visible.
///
/// Windows Terminal, ConEmu and friends still launch the shell itself as the
/// direct parent, so matching the shell binaries covers them too.
pub const INTERACTIVE_SHELLS: [&str; 2] = ["cmd.exe", "powershell.exe"];

/// Verdict of one policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleAction {
    /// Leave the console window as-is.
    Keep,
    /// Hide the console window.
    Hide,
}

impl fmt::Display for ConsoleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleAction::Keep => write!(f, "keep"),
            ConsoleAction::Hide => write!(f, "hide"),
        }
    }
}

/// Decide the console verdict for a resolved parent executable name.
///
/// Comparison against [`INTERACTIVE_SHELLS`] is case-insensitive, matching
/// the case-preserving-but-insensitive NTFS convention. The empty string is
/// the collapsed form of every inspection failure and lands on `Hide`, the
/// fail-safe default.
pub fn decide(parent_exe: &str) -> ConsoleAction {
    let interactive = INTERACTIVE_SHELLS
        .iter()
        .any(|shell| shell.eq_ignore_ascii_case(parent_exe));
    if interactive {
        ConsoleAction::Keep
    } else {
        ConsoleAction::Hide
    }
}
