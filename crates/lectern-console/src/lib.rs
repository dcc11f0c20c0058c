//! Console visibility for the Lectern presenter.
//!
//! Lectern ships as a console-subsystem binary on Windows so that running it
//! from an interactive shell keeps stdout/stderr attached. Launched any other
//! way (double-click, Start menu, another program), the inherited console
//! window is just clutter, so the startup hook hides it.
//!
//! The decision is driven by the parent process: a point-in-time snapshot of
//! the process table resolves the parent's executable name, which is compared
//! against a short allow-list of interactive shells. Any failure along that
//! path collapses to the fail-safe verdict of hiding the console.
//!
//! Everything OS-facing lives behind `#[cfg(windows)]`; on other platforms
//! only the platform-neutral decision core (and its tests) is compiled.

pub mod policy;
pub mod table;

#[cfg(windows)]
mod win;

pub use policy::{decide, ConsoleAction, INTERACTIVE_SHELLS};
pub use table::{find_parent, InspectError, ProcessId, ProcessRecord};

#[cfg(windows)]
pub use win::{
    hide_console_if_unneeded, launch_context, parent_pid, parent_process_name, process_name,
    LaunchContext,
};
