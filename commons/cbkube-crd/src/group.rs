use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
#[kube(
    group = "couchbase.com",
    version = "v2",
    kind = "CouchbaseGroup",
    plural = "couchbasegroups",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseGroupSpec {
    /// Roles granted to members of this group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<RoleSpec>,
    /// LDAP group DN to map onto this group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldap_group_ref: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default)]
pub struct RoleSpec {
    /// Couchbase role name, e.g. "bucket_admin" or "data_reader".
    pub name: String,
    /// Bucket the role applies to; "*" or omitted for all buckets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,
    /// Scope within the bucket, for collection-aware roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Collection within the scope, for collection-aware roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_role_round_trips() {
        let spec: CouchbaseGroupSpec = serde_json::from_str(
            r#"{"roles":[{"name":"data_reader","bucket":"travel","scope":"inventory","collections":"airport"}]}"#,
        )
        .unwrap();
        assert_eq!(spec.roles.len(), 1);
        assert_eq!(spec.roles[0].scope.as_deref(), Some("inventory"));
    }
}
