use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// XDCR replication of one bucket to a bucket on a remote cluster. The
/// remote cluster connection itself is owned by the CouchbaseCluster
/// resource; this object only describes the stream.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "couchbase.com",
    version = "v2",
    kind = "CouchbaseReplication",
    plural = "couchbasereplications",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseReplicationSpec {
    /// Source bucket on the local cluster.
    pub bucket: String,
    /// Target bucket on the remote cluster.
    pub remote_bucket: String,
    /// Pause the stream without deleting it.
    #[serde(default)]
    pub paused: bool,
    /// XDCR filter expression applied to document keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,
    /// Compression on the wire (none | auto).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_type: Option<String>,
    /// Scope/collection level routing; bucket-to-bucket when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_mapping: Option<ExplicitMappingSpec>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExplicitMappingSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_rules: Vec<MappingRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny_rules: Vec<MappingRule>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct MappingRule {
    pub source_keyspace: Keyspace,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_keyspace: Option<Keyspace>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
pub struct Keyspace {
    pub scope: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}
