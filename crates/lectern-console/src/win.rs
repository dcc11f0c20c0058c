//! Windows process inspection and console hiding.
//!
//! Snapshot and process handles are RAII guards, so release happens on every
//! exit path including not-found and access-denied. All failures collapse to
//! the fail-safe hide at the policy boundary in [`hide_console_if_unneeded`];
//! the distinguishable errors only feed `tracing::debug!` records.

use std::io;
use std::mem;
use std::ptr;

use serde::Serialize;
use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, INVALID_HANDLE_VALUE, MAX_PATH};
use windows_sys::Win32::System::Console::GetConsoleWindow;
use windows_sys::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};
use windows_sys::Win32::System::ProcessStatus::K32GetModuleBaseNameW;
use windows_sys::Win32::System::Threading::{
    GetCurrentProcessId, OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{ShowWindow, SW_HIDE};

use crate::policy::{decide, ConsoleAction};
use crate::table::{find_parent, InspectError, ProcessId, ProcessRecord};

/// Owned Toolhelp snapshot of the process table.
///
/// Point-in-time: it can be stale relative to process churn by the time it
/// is scanned, which is accepted.
struct Snapshot {
    handle: HANDLE,
}

impl Snapshot {
    fn capture() -> Result<Self, InspectError> {
        let handle = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) };
        if handle == INVALID_HANDLE_VALUE {
            return Err(InspectError::Snapshot(io::Error::last_os_error()));
        }
        Ok(Snapshot { handle })
    }

    /// Lazy walk of the snapshot in OS enumeration order.
    fn records(&mut self) -> Records<'_> {
        Records {
            snapshot: self,
            started: false,
        }
    }
}

impl Drop for Snapshot {
    fn drop(&mut self) {
        unsafe {
            CloseHandle(self.handle);
        }
    }
}

struct Records<'a> {
    snapshot: &'a mut Snapshot,
    started: bool,
}

impl Iterator for Records<'_> {
    type Item = ProcessRecord;

    fn next(&mut self) -> Option<ProcessRecord> {
        let mut entry: PROCESSENTRY32W = unsafe { mem::zeroed() };
        entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;
        let ok = unsafe {
            if self.started {
                Process32NextW(self.snapshot.handle, &mut entry)
            } else {
                self.started = true;
                Process32FirstW(self.snapshot.handle, &mut entry)
            }
        };
        if ok == 0 {
            return None;
        }
        Some(ProcessRecord {
            pid: ProcessId(entry.th32ProcessID),
            ppid: ProcessId(entry.th32ParentProcessID),
        })
    }
}

/// Restricted-access handle to another process (query-information +
/// memory-read only).
struct ProcessHandle {
    handle: HANDLE,
}

impl ProcessHandle {
    fn open_query(pid: ProcessId) -> Result<Self, InspectError> {
        let handle =
            unsafe { OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, 0, pid.0) };
        if handle.is_null() {
            return Err(InspectError::AccessDenied {
                pid: pid.0,
                source: io::Error::last_os_error(),
            });
        }
        Ok(ProcessHandle { handle })
    }

    /// Base name of the process's main module, e.g. `powershell.exe`.
    ///
    /// Names longer than `MAX_PATH` are silently truncated by the OS; the
    /// returned string is always fully initialized, empty on query failure.
    fn base_module_name(&self) -> String {
        let mut buf = [0u16; MAX_PATH as usize];
        let len = unsafe {
            K32GetModuleBaseNameW(self.handle, ptr::null_mut(), buf.as_mut_ptr(), buf.len() as u32)
        };
        String::from_utf16_lossy(&buf[..len as usize])
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        unsafe {
            CloseHandle(self.handle);
        }
    }
}

/// Resolve the parent pid of `pid` from a fresh process table snapshot.
pub fn parent_pid(pid: ProcessId) -> Result<ProcessId, InspectError> {
    let mut snapshot = Snapshot::capture()?;
    find_parent(pid, snapshot.records())
}

/// Resolve the executable base name of `pid`.
pub fn process_name(pid: ProcessId) -> Result<String, InspectError> {
    let process = ProcessHandle::open_query(pid)?;
    Ok(process.base_module_name())
}

/// Resolve the executable base name of the current process's parent.
pub fn parent_process_name() -> Result<String, InspectError> {
    let own = ProcessId(unsafe { GetCurrentProcessId() });
    let parent = parent_pid(own)?;
    process_name(parent)
}

/// Snapshot of one console policy evaluation, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchContext {
    /// Parent pid, if the process table lookup succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_pid: Option<ProcessId>,

    /// Parent executable base name, if resolvable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_executable: Option<String>,

    /// Verdict the startup hook would apply.
    pub action: ConsoleAction,
}

/// Evaluate the console policy without applying the side effect.
pub fn launch_context() -> LaunchContext {
    let own = ProcessId(unsafe { GetCurrentProcessId() });
    let parent_pid = match parent_pid(own) {
        Ok(pid) => Some(pid),
        Err(err) => {
            tracing::debug!(%err, "parent pid lookup failed");
            None
        }
    };
    let parent_executable = parent_pid.and_then(|pid| match process_name(pid) {
        Ok(name) => Some(name),
        Err(err) => {
            tracing::debug!(%err, "parent name lookup failed");
            None
        }
    });
    let action = decide(parent_executable.as_deref().unwrap_or(""));
    LaunchContext {
        parent_pid,
        parent_executable,
        action,
    }
}

/// Startup hook: hide the console window unless launched from an interactive
/// shell.
///
/// One-shot by usage and idempotent in effect: hiding an already-hidden
/// window is an OS-level no-op, and a process without a console window has a
/// null `GetConsoleWindow`, also a no-op.
pub fn hide_console_if_unneeded() {
    let name = parent_process_name().unwrap_or_else(|err| {
        tracing::debug!(%err, "parent inspection failed; defaulting to hide");
        String::new()
    });
    match decide(&name) {
        ConsoleAction::Hide => {
            tracing::debug!(parent = %name, "hiding console window");
            hide_console_window();
        }
        ConsoleAction::Keep => {
            tracing::debug!(parent = %name, "interactive shell parent; keeping console");
        }
    }
}

fn hide_console_window() {
    unsafe {
        let window = GetConsoleWindow();
        if !window.is_null() {
            ShowWindow(window, SW_HIDE);
        }
    }
}
