//! Public API tests for backend classification and its serialized form.

use lectern_display::{DisplayBackend, SessionEnv};
use raw_window_handle::{RawDisplayHandle, WaylandDisplayHandle, XlibDisplayHandle};
use std::ffi::c_void;
use std::ptr::NonNull;

#[test]
fn handle_and_session_paths_agree_on_wayland() {
    let handle = RawDisplayHandle::Wayland(WaylandDisplayHandle::new(
        NonNull::<c_void>::dangling(),
    ));
    let session = SessionEnv {
        wayland_display: Some("wayland-0".into()),
        x11_display: None,
        session_type: Some("wayland".into()),
    };
    assert_eq!(DisplayBackend::classify(handle), session.classify());
}

#[test]
fn handle_and_session_paths_agree_on_x11() {
    let handle = RawDisplayHandle::Xlib(XlibDisplayHandle::new(None, 0));
    let session = SessionEnv {
        wayland_display: None,
        x11_display: Some(":0".into()),
        session_type: None,
    };
    assert_eq!(DisplayBackend::classify(handle), session.classify());
}

#[test]
fn serializes_to_lowercase_tags() {
    assert_eq!(
        serde_json::to_string(&DisplayBackend::Wayland).unwrap(),
        "\"wayland\""
    );
    assert_eq!(
        serde_json::to_string(&DisplayBackend::Quartz).unwrap(),
        "\"quartz\""
    );
    let parsed: DisplayBackend = serde_json::from_str("\"x11\"").unwrap();
    assert_eq!(parsed, DisplayBackend::X11);
}

#[test]
fn default_session_env_is_unknown() {
    assert_eq!(SessionEnv::default().classify(), DisplayBackend::Unknown);
}
