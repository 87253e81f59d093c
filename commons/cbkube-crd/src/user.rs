use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, JsonSchema)]
#[kube(
    group = "couchbase.com",
    version = "v2",
    kind = "CouchbaseUser",
    plural = "couchbaseusers",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct CouchbaseUserSpec {
    /// Human-readable display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub auth_domain: AuthDomain,
    /// Secret holding the password; required for local users, forbidden for
    /// ldap users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_secret: Option<String>,
    /// CouchbaseGroup names this user belongs to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthDomain {
    #[default]
    Local,
    Ldap,
}
