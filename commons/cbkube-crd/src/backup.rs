use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::Condition;

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "couchbase.com",
    version = "v2",
    kind = "CouchbaseBackup",
    plural = "couchbasebackups",
    namespaced,
    status = "CouchbaseBackupStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseBackupSpec {
    /// Backup strategy; "full_incremental" schedules both cycles,
    /// "full_only" disables incrementals.
    #[serde(default = "default_strategy")]
    pub strategy: BackupStrategy,
    /// Cron schedule for full backups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full: Option<BackupScheduleSpec>,
    /// Cron schedule for incremental backups (ignored under "full_only").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incremental: Option<BackupScheduleSpec>,
    /// Size of the backup volume (Kubernetes quantity, e.g. "20Gi").
    #[serde(default = "default_size")]
    pub size: String,
    /// Storage class for the backup volume; cluster default when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,
    /// Duration to retain backups, e.g. "720h".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_retention: Option<String>,
    /// Duration to retain job logs, e.g. "168h".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_retention: Option<String>,
    /// Job retries before the backup is marked failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backoff_limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successful_backups_history_limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_backups_history_limit: Option<i32>,
    /// Worker threads for the backup job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<i32>,
    /// Use an ephemeral volume instead of a PVC-backed repository.
    #[serde(default)]
    pub ephemeral_volume: bool,
    /// Automatic volume expansion policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling: Option<AutoScalingSpec>,
    /// Cloud object store destination; PVC-backed when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_store: Option<ObjectStoreSpec>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BackupStrategy {
    FullIncremental,
    FullOnly,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
pub struct BackupScheduleSpec {
    /// Cron expression, e.g. "0 3 * * 0".
    pub schedule: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct AutoScalingSpec {
    /// Hard cap on volume size ("0" disables the cap).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    /// Percentage to grow the volume by on each expansion (default 20).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub increment_percent: Option<i32>,
    /// Used-space percentage that triggers an expansion (default 70).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_percent: Option<i32>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ObjectStoreSpec {
    /// Destination URI, e.g. "s3://backup-bucket".
    pub uri: String,
    /// Secret holding access credentials; IAM roles apply when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default)]
    pub use_iam_role: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseBackupStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    /// Repository directory the jobs write into.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_failure: Option<String>,
    /// Used capacity of the backup volume, e.g. "4.5Gi".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

fn default_strategy() -> BackupStrategy {
    BackupStrategy::FullIncremental
}

fn default_size() -> String {
    "20Gi".to_string()
}
