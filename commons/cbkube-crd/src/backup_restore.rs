use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::backup::ObjectStoreSpec;
use crate::condition::Condition;

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "couchbase.com",
    version = "v2",
    kind = "CouchbaseBackupRestore",
    plural = "couchbasebackuprestores",
    namespaced,
    status = "CouchbaseBackupRestoreStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseBackupRestoreSpec {
    /// Name of the CouchbaseBackup whose repository is restored from.
    pub backup: String,
    /// Repository directory override; latest repo of `backup` when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Start of the restore window (backup name or index).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<RestorePoint>,
    /// End of the restore window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<RestorePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backoff_limit: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_retention: Option<String>,
    /// Worker threads for the restore job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<i32>,
    /// Overwrite documents even when the cluster copy is newer.
    #[serde(default)]
    pub force_updates: bool,
    /// Per-service restore toggles; everything restores when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<RestoreServicesSpec>,
    /// Bucket filtering and renaming.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RestoreDataSpec>,
    /// Cloud object store source; PVC repository of `backup` when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_store: Option<ObjectStoreSpec>,
    /// Scratch space for object-store restores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_volume: Option<StagingVolumeSpec>,
}

/// A point in the backup history, addressed by backup name ("2024-01-07T03_00_00")
/// or 1-based index from the oldest backup.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[serde(untagged)]
pub enum RestorePoint {
    Index(i64),
    Name(String),
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestoreServicesSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gsi_indexes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fts_indexes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fts_aliases: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eventing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_config: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_query: Option<bool>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct RestoreDataSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_buckets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_buckets: Vec<String>,
    /// Bucket rename map, entries of the form "source=target".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub map: Vec<BucketMapEntry>,
    /// Regular expression limiting restored document keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_keys: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_values: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
pub struct BucketMapEntry {
    pub source: String,
    pub target: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct StagingVolumeSpec {
    #[serde(default = "default_staging_size")]
    pub size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseBackupRestoreStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub running: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

fn default_staging_size() -> String {
    "20Gi".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_point_accepts_index_or_name() {
        let spec: CouchbaseBackupRestoreSpec = serde_json::from_str(
            r#"{"backup":"nightly","start":1,"end":"2024-01-07T03_00_00"}"#,
        )
        .unwrap();
        assert!(matches!(spec.start, Some(RestorePoint::Index(1))));
        assert!(matches!(spec.end, Some(RestorePoint::Name(_))));
    }

    #[test]
    fn minimal_spec_needs_only_backup() {
        let spec: CouchbaseBackupRestoreSpec =
            serde_json::from_str(r#"{"backup":"nightly"}"#).unwrap();
        assert_eq!(spec.backup, "nightly");
        assert!(!spec.force_updates);
        assert!(spec.services.is_none());
    }
}
