//! Display backend classification for the Lectern presenter.
//!
//! Window-management code needs to branch on the windowing system behind the
//! current display connection (transparency workarounds differ between X11
//! and Wayland compositors, Quartz has its own path). The backend is a
//! closed, mutually exclusive set: a connection is bound to exactly one
//! protocol at a time, and anything outside the set classifies as
//! [`DisplayBackend::Unknown`] rather than an error.
//!
//! Two entry points: [`DisplayBackend::classify`] inspects the type tag of a
//! caller-owned raw display handle, [`DisplayBackend::detect`] answers for
//! the ambient default session when no handle is at hand.

mod session;

pub use session::SessionEnv;

use raw_window_handle::RawDisplayHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Windowing system behind a display connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayBackend {
    /// X11, including XWayland connections.
    X11,
    /// Native Wayland.
    Wayland,
    /// macOS Quartz / AppKit.
    Quartz,
    /// Backend not in the supported set, or support not compiled in.
    Unknown,
}

impl DisplayBackend {
    /// Classify a display connection by its handle's runtime type tag.
    ///
    /// The handle stays owned by the caller and is never dereferenced; only
    /// the enum discriminant is inspected.
    pub fn classify(raw: RawDisplayHandle) -> Self {
        match raw {
            RawDisplayHandle::Xlib(_) | RawDisplayHandle::Xcb(_) => DisplayBackend::X11,
            RawDisplayHandle::Wayland(_) => DisplayBackend::Wayland,
            RawDisplayHandle::AppKit(_) => DisplayBackend::Quartz,
            _ => DisplayBackend::Unknown,
        }
    }

    /// Classify the ambient default display session.
    ///
    /// On macOS the answer is always Quartz. Elsewhere the session
    /// environment variables decide; no recognizable indicators degrade to
    /// `Unknown`, never an error.
    pub fn detect() -> Self {
        #[cfg(target_os = "macos")]
        {
            DisplayBackend::Quartz
        }
        #[cfg(not(target_os = "macos"))]
        {
            let backend = SessionEnv::capture().classify();
            if backend == DisplayBackend::Unknown {
                tracing::debug!("no display session indicators; backend unknown");
            }
            backend
        }
    }

    /// Whether the connection is backed by X11.
    pub fn is_x11(&self) -> bool {
        matches!(self, DisplayBackend::X11)
    }

    /// Whether the connection is backed by native Wayland.
    pub fn is_wayland(&self) -> bool {
        matches!(self, DisplayBackend::Wayland)
    }

    /// Whether the connection is backed by Quartz.
    pub fn is_quartz(&self) -> bool {
        matches!(self, DisplayBackend::Quartz)
    }
}

impl fmt::Display for DisplayBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DisplayBackend::X11 => "x11",
            DisplayBackend::Wayland => "wayland",
            DisplayBackend::Quartz => "quartz",
            DisplayBackend::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
