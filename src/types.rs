//! Resource types returned by the Cuckoo REST API
//!
//! Field names follow the server's JSON. Fields the server leaves
//! loosely typed (often `null`) are kept as raw JSON values.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Decode `null` as the field's default, the way a missing key is.
///
/// The server emits `null` for unset columns (`owner`, `tags`, ...).
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Identifier of a task on the server
pub type TaskId = i64;

// ============================================================================
// Tasks
// ============================================================================

/// Lifecycle status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Queued, not yet picked up by a machine
    #[default]
    Pending,
    /// Analysis in progress
    Running,
    /// Analysis finished, report not generated yet
    Completed,
    /// Report generated
    Reported,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// String form used by the server
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Reported => "reported",
            TaskStatus::Unknown => "unknown",
        }
    }

    /// Whether the task has finished analysis
    pub fn is_finished(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Reported)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task in cuckoo
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    #[serde(deserialize_with = "null_as_default")]
    pub id: TaskId,
    #[serde(deserialize_with = "null_as_default")]
    pub status: TaskStatus,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub target: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub timeout: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub enforce_timeout: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub memory: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<JsonValue>,
    pub machine: JsonValue,
    pub package: JsonValue,
    pub platform: JsonValue,
    pub options: JsonValue,
    pub sample_id: JsonValue,
    pub guest: JsonValue,
    pub custom: JsonValue,
    #[serde(deserialize_with = "null_as_default")]
    pub added_on: String,
    pub completed_on: JsonValue,
}

/// Result of creating a reboot task from an existing analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebootedTask {
    /// The analysis the reboot was created from
    pub task_id: TaskId,
    /// The newly created reboot task
    pub reboot_id: TaskId,
}

// ============================================================================
// Machines
// ============================================================================

/// An analysis machine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Machine {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub platform: String,
    #[serde(deserialize_with = "null_as_default")]
    pub locked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub resultserver_ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub resultserver_port: String,
    pub status: JsonValue,
    pub snapshot: JsonValue,
    pub interface: JsonValue,
    pub locked_changed_on: JsonValue,
    pub status_changed_on: JsonValue,
}

// ============================================================================
// Files
// ============================================================================

/// A file sample known to cuckoo
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sample {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub file_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub file_size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub md5: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sha1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sha256: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sha512: String,
    #[serde(deserialize_with = "null_as_default")]
    pub crc32: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ssdeep: String,
}

/// Lookup key for a sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileId {
    /// Database id
    Id(i64),
    /// MD5 hex digest
    Md5(String),
    /// SHA256 hex digest
    Sha256(String),
}

impl FileId {
    /// Path segments `{format}/{value}` for `files/view`
    pub fn path_segments(&self) -> String {
        match self {
            FileId::Id(id) => format!("id/{id}"),
            FileId::Md5(md5) => format!("md5/{md5}"),
            FileId::Sha256(sha256) => format!("sha256/{sha256}"),
        }
    }
}

// ============================================================================
// Server Status
// ============================================================================

/// Status of the cuckoo server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CuckooStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub protocol_version: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tasks: TaskCounts,
    #[serde(deserialize_with = "null_as_default")]
    pub machines: MachineCounts,
    #[serde(deserialize_with = "null_as_default")]
    pub diskspace: DiskSpace,
}

/// Task counts per status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskCounts {
    pub total: i64,
    pub pending: i64,
    pub running: i64,
    pub completed: i64,
    pub reported: i64,
}

/// Machine counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineCounts {
    pub total: i64,
    pub available: i64,
}

/// Disk usage of the storage directories (Unix servers only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskSpace {
    pub analyses: DiskUsage,
    pub binaries: DiskUsage,
    pub temporary: DiskUsage,
}

/// Byte counts for one directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskUsage {
    pub total: i64,
    pub free: i64,
    pub used: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_task_status_serde() {
        let status: TaskStatus = serde_json::from_value(json!("reported")).unwrap();
        assert_eq!(status, TaskStatus::Reported);

        let status: TaskStatus = serde_json::from_value(json!("failed_analysis")).unwrap();
        assert_eq!(status, TaskStatus::Unknown);

        assert_eq!(serde_json::to_value(TaskStatus::Running).unwrap(), json!("running"));
        assert!(TaskStatus::Completed.is_finished());
        assert!(!TaskStatus::Pending.is_finished());
    }

    #[test]
    fn test_task_decodes_with_missing_and_null_fields() {
        let task: Task = serde_json::from_value(json!({
            "id": 42,
            "status": "running",
            "target": "/tmp/sample.exe",
            "machine": null,
            "tags": ["x64"],
        }))
        .unwrap();

        assert_eq!(task.id, 42);
        assert_eq!(task.status, TaskStatus::Running);
        assert_eq!(task.target, "/tmp/sample.exe");
        assert!(task.machine.is_null());
        assert_eq!(task.tags, vec!["x64".to_string()]);
        assert_eq!(task.priority, 0);
    }

    #[test]
    fn test_null_fields_decode_as_defaults() {
        let task: Task = serde_json::from_value(json!({
            "id": 3,
            "status": null,
            "owner": null,
            "tags": null,
            "priority": null,
            "errors": null,
            "added_on": null,
            "machine": null,
        }))
        .unwrap();

        assert_eq!(task.id, 3);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.owner, "");
        assert!(task.tags.is_empty());
        assert_eq!(task.priority, 0);
        assert!(task.errors.is_empty());
        assert!(task.machine.is_null());

        let machine: Machine =
            serde_json::from_value(json!({"name": "win7", "ip": null, "tags": null})).unwrap();
        assert_eq!(machine.name, "win7");
        assert_eq!(machine.ip, "");

        let sample: Sample =
            serde_json::from_value(json!({"id": 1, "ssdeep": null, "file_size": null})).unwrap();
        assert_eq!(sample.ssdeep, "");
        assert_eq!(sample.file_size, 0);

        let status: CuckooStatus =
            serde_json::from_value(json!({"hostname": null, "diskspace": null})).unwrap();
        assert_eq!(status.diskspace, DiskSpace::default());
    }

    #[test]
    fn test_file_id_path_segments() {
        assert_eq!(FileId::Id(7).path_segments(), "id/7");
        assert_eq!(FileId::Md5("abc".into()).path_segments(), "md5/abc");
        assert_eq!(FileId::Sha256("def".into()).path_segments(), "sha256/def");
    }

    #[test]
    fn test_cuckoo_status_decodes() {
        let status: CuckooStatus = serde_json::from_value(json!({
            "version": "2.0.7",
            "hostname": "sandbox",
            "tasks": {"total": 5, "pending": 1, "running": 1, "completed": 1, "reported": 2},
            "machines": {"total": 3, "available": 2},
            "diskspace": {"analyses": {"total": 100, "free": 60, "used": 40}}
        }))
        .unwrap();

        assert_eq!(status.tasks.total, 5);
        assert_eq!(status.machines.available, 2);
        assert_eq!(status.diskspace.analyses.used, 40);
        assert_eq!(status.diskspace.binaries, DiskUsage::default());
    }
}
