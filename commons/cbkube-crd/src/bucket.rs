use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::condition::Condition;

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "couchbase.com",
    version = "v2",
    kind = "CouchbaseBucket",
    plural = "couchbasebuckets",
    namespaced,
    status = "CouchbaseBucketStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseBucketSpec {
    /// Bucket name inside Couchbase; the object name when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Memory quota per node (Kubernetes quantity, e.g. "128Mi").
    #[serde(default = "default_memory_quota")]
    pub memory_quota: String,
    /// Number of data replicas, 0 to 3.
    #[serde(default = "default_replicas")]
    pub replicas: i32,
    #[serde(default)]
    pub io_priority: IoPriority,
    #[serde(default)]
    pub eviction_policy: EvictionPolicy,
    #[serde(default)]
    pub conflict_resolution: ConflictResolution,
    #[serde(default)]
    pub compression_mode: CompressionMode,
    #[serde(default)]
    pub storage_backend: StorageBackend,
    #[serde(default)]
    pub enable_flush: bool,
    #[serde(default)]
    pub enable_index_replica: bool,
    /// Document expiry ceiling, e.g. "600s"; unbounded when omitted.
    #[serde(rename = "maxTTL", skip_serializing_if = "Option::is_none")]
    pub max_ttl: Option<String>,
    /// Minimum durability level enforced on writes
    /// (none | majority | majorityAndPersistActive | persistToMajority).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_durability: Option<String>,
    /// Which CouchbaseScope objects this bucket picks up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<ResourceSelectionSpec>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IoPriority {
    #[default]
    Low,
    High,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EvictionPolicy {
    #[default]
    ValueOnly,
    FullEviction,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConflictResolution {
    #[default]
    Seqno,
    Lww,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    Off,
    #[default]
    Passive,
    Active,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Couchstore,
    Magma,
}

/// Selects named child objects (scopes under a bucket, collections under a
/// scope). When `managed` is false the operator leaves the children alone.
#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSelectionSpec {
    #[serde(default)]
    pub managed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceRef>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
pub struct ResourceRef {
    pub kind: String,
    pub name: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseBucketStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

fn default_memory_quota() -> String {
    "100Mi".to_string()
}

fn default_replicas() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_operator_documentation() {
        let spec: CouchbaseBucketSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(spec.memory_quota, "100Mi");
        assert_eq!(spec.replicas, 1);
        assert_eq!(spec.io_priority, IoPriority::Low);
        assert_eq!(spec.eviction_policy, EvictionPolicy::ValueOnly);
        assert_eq!(spec.conflict_resolution, ConflictResolution::Seqno);
        assert_eq!(spec.compression_mode, CompressionMode::Passive);
        assert_eq!(spec.storage_backend, StorageBackend::Couchstore);
        assert!(!spec.enable_flush);
    }

    #[test]
    fn eviction_policy_wire_format_is_camel_case() {
        let out = serde_json::to_value(EvictionPolicy::FullEviction).unwrap();
        assert_eq!(out, "fullEviction");
    }
}
