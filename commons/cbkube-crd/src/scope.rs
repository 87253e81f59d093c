use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::bucket::ResourceSelectionSpec;

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[kube(
    group = "couchbase.com",
    version = "v2",
    kind = "CouchbaseScope",
    plural = "couchbasescopes",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseScopeSpec {
    /// Scope name inside the bucket; the object name when omitted. Kubernetes
    /// object names cannot express every legal Couchbase scope name (e.g.
    /// leading "%"), so this override exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Which CouchbaseCollection objects belong to this scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<ResourceSelectionSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_spec_is_valid() {
        let spec: CouchbaseScopeSpec = serde_json::from_str("{}").unwrap();
        assert!(spec.name.is_none());
        assert!(spec.collections.is_none());
    }
}
