use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[kube(
    group = "couchbase.com",
    version = "v2",
    kind = "CouchbaseCollection",
    plural = "couchbasecollections",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseCollectionSpec {
    /// Collection name inside the scope; the object name when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Document expiry ceiling for this collection, e.g. "300s".
    #[serde(rename = "maxTTL", skip_serializing_if = "Option::is_none")]
    pub max_ttl: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_ttl_round_trips() {
        let spec: CouchbaseCollectionSpec =
            serde_json::from_str(r#"{"maxTTL":"300s"}"#).unwrap();
        assert_eq!(spec.max_ttl.as_deref(), Some("300s"));
        let out = serde_json::to_value(&spec).unwrap();
        assert_eq!(out["maxTTL"], "300s");
    }
}
