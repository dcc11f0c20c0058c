//! Process table records and parent resolution.
//!
//! A snapshot of the process table is a transient, enumerable sequence of
//! `(pid, ppid)` records acquired fresh on each inspection and discarded
//! immediately after. The scan itself is platform-neutral; the Windows
//! module feeds it records straight out of a Toolhelp snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Process ID wrapper with display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub u32);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProcessId {
    fn from(pid: u32) -> Self {
        ProcessId(pid)
    }
}

/// One row of a process table snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Process ID.
    pub pid: ProcessId,

    /// Parent process ID.
    pub ppid: ProcessId,
}

/// Errors from process table inspection.
///
/// None of these reach the policy boundary: `hide_console_if_unneeded`
/// collapses them all to "no recognizable parent". They stay distinguishable
/// here for logging and tests.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The process table snapshot could not be acquired.
    #[error("process table snapshot failed: {0}")]
    Snapshot(#[source] std::io::Error),

    /// The pid was not present in the snapshot.
    #[error("process {pid} not found")]
    ProcessNotFound { pid: u32 },

    /// A restricted-access handle to the process could not be opened
    /// (exited, access denied, or invalid id).
    #[error("cannot open process {pid}: {source}")]
    AccessDenied {
        pid: u32,
        #[source]
        source: std::io::Error,
    },
}

/// Scan `records` in enumeration order for the first record whose own id
/// matches `pid` and return that record's parent id.
///
/// Snapshot ordering is OS-defined; pids are unique within one snapshot, so
/// first-match is the only match. A pid that never appears (already reaped,
/// raced with process churn) reports `ProcessNotFound` rather than a
/// sentinel value.
pub fn find_parent<I>(pid: ProcessId, records: I) -> Result<ProcessId, InspectError>
where
    I: IntoIterator<Item = ProcessRecord>,
{
    records
        .into_iter()
        .find(|record| record.pid == pid)
        .map(|record| record.ppid)
        .ok_or(InspectError::ProcessNotFound { pid: pid.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: u32, ppid: u32) -> ProcessRecord {
        ProcessRecord {
            pid: ProcessId(pid),
            ppid: ProcessId(ppid),
        }
    }

    #[test]
    fn finds_parent_of_known_pid() {
        let table = vec![record(4, 0), record(812, 4), record(4120, 812)];
        let ppid = find_parent(ProcessId(4120), table).unwrap();
        assert_eq!(ppid, ProcessId(812));
    }

    #[test]
    fn first_match_wins_in_enumeration_order() {
        // Snapshots never contain duplicate pids, but the scan contract is
        // first-match regardless.
        let table = vec![record(7, 1), record(7, 2)];
        assert_eq!(find_parent(ProcessId(7), table).unwrap(), ProcessId(1));
    }

    #[test]
    fn missing_pid_reports_not_found() {
        let table = vec![record(4, 0), record(812, 4)];
        let err = find_parent(ProcessId(9999), table).unwrap_err();
        assert!(matches!(err, InspectError::ProcessNotFound { pid: 9999 }));
    }

    #[test]
    fn empty_table_reports_not_found() {
        let err = find_parent(ProcessId(1), Vec::new()).unwrap_err();
        assert!(matches!(err, InspectError::ProcessNotFound { pid: 1 }));
    }

    #[test]
    fn scan_stops_at_first_match() {
        // Lazy sequence: records past the match must not be consumed.
        let mut pulled = 0;
        let records = (1..=100).map(|pid| {
            pulled += 1;
            record(pid, pid - 1)
        });
        let ppid = find_parent(ProcessId(3), records).unwrap();
        assert_eq!(ppid, ProcessId(2));
        assert_eq!(pulled, 3);
    }

    #[test]
    fn process_id_display_and_from() {
        assert_eq!(ProcessId::from(42).to_string(), "42");
    }
}
