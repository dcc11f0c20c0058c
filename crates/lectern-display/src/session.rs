//! Session environment sniffing for ambient backend detection.
//!
//! Display servers advertise themselves through environment variables:
//! `WAYLAND_DISPLAY` for a Wayland compositor socket, `DISPLAY` for an X
//! server, and `XDG_SESSION_TYPE` as the login manager's record of the
//! session kind. Capturing them into a plain struct keeps the decision a
//! pure function that tests can drive without touching the real environment.

use crate::DisplayBackend;
use std::env;

/// Captured display-related environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionEnv {
    /// `WAYLAND_DISPLAY`, if set and non-empty.
    pub wayland_display: Option<String>,

    /// `DISPLAY`, if set and non-empty.
    pub x11_display: Option<String>,

    /// `XDG_SESSION_TYPE`, if set and non-empty.
    pub session_type: Option<String>,
}

impl SessionEnv {
    /// Capture the current process environment.
    pub fn capture() -> Self {
        SessionEnv {
            wayland_display: non_empty_var("WAYLAND_DISPLAY"),
            x11_display: non_empty_var("DISPLAY"),
            session_type: non_empty_var("XDG_SESSION_TYPE"),
        }
    }

    /// Classify the session these variables describe.
    ///
    /// A live Wayland socket wins over `DISPLAY` because XWayland sessions
    /// export both; toolkits connect to the native compositor there. The
    /// session-type record is a fallback for sessions where the display
    /// variables were scrubbed.
    pub fn classify(&self) -> DisplayBackend {
        let session = self.session_type.as_deref();
        if self.wayland_display.is_some() || session == Some("wayland") {
            DisplayBackend::Wayland
        } else if self.x11_display.is_some() || session == Some("x11") {
            DisplayBackend::X11
        } else {
            DisplayBackend::Unknown
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(
        wayland: Option<&str>,
        x11: Option<&str>,
        session: Option<&str>,
    ) -> SessionEnv {
        SessionEnv {
            wayland_display: wayland.map(String::from),
            x11_display: x11.map(String::from),
            session_type: session.map(String::from),
        }
    }

    #[test]
    fn wayland_socket_classifies_wayland() {
        assert_eq!(
            env(Some("wayland-0"), None, None).classify(),
            DisplayBackend::Wayland
        );
    }

    #[test]
    fn x11_display_classifies_x11() {
        assert_eq!(env(None, Some(":0"), None).classify(), DisplayBackend::X11);
    }

    #[test]
    fn xwayland_session_prefers_wayland() {
        // Both variables exported; the native compositor wins.
        assert_eq!(
            env(Some("wayland-0"), Some(":0"), Some("wayland")).classify(),
            DisplayBackend::Wayland
        );
    }

    #[test]
    fn session_type_fallback_when_display_vars_absent() {
        assert_eq!(
            env(None, None, Some("wayland")).classify(),
            DisplayBackend::Wayland
        );
        assert_eq!(env(None, None, Some("x11")).classify(), DisplayBackend::X11);
    }

    #[test]
    fn bare_environment_is_unknown() {
        assert_eq!(env(None, None, None).classify(), DisplayBackend::Unknown);
        assert_eq!(
            env(None, None, Some("tty")).classify(),
            DisplayBackend::Unknown
        );
    }
}
