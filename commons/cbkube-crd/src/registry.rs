//! Declarative per-kind descriptors. Anything that needs to go from a kind
//! string to the typed model (CLI dispatch, crdgen) goes through here instead
//! of growing its own per-kind handler copies.

use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::core::CustomResourceExt;

use crate::{
    CouchbaseBackup, CouchbaseBackupRestore, CouchbaseBucket,
    CouchbaseCollection, CouchbaseGroup, CouchbaseReplication, CouchbaseScope,
    CouchbaseUser,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindRef {
    pub kind: &'static str,
    pub plural: &'static str,
}

pub const KINDS: &[KindRef] = &[
    KindRef { kind: "CouchbaseBackup", plural: "couchbasebackups" },
    KindRef {
        kind: "CouchbaseBackupRestore",
        plural: "couchbasebackuprestores",
    },
    KindRef { kind: "CouchbaseBucket", plural: "couchbasebuckets" },
    KindRef { kind: "CouchbaseScope", plural: "couchbasescopes" },
    KindRef { kind: "CouchbaseCollection", plural: "couchbasecollections" },
    KindRef { kind: "CouchbaseGroup", plural: "couchbasegroups" },
    KindRef { kind: "CouchbaseUser", plural: "couchbaseusers" },
    KindRef { kind: "CouchbaseReplication", plural: "couchbasereplications" },
];

/// Resolve a kind or plural name, case-insensitively.
pub fn resolve(name: &str) -> Option<KindRef> {
    KINDS.iter().copied().find(|k| {
        k.kind.eq_ignore_ascii_case(name) || k.plural.eq_ignore_ascii_case(name)
    })
}

/// CRD manifests for every kind, in `KINDS` order.
pub fn all_crds() -> Vec<CustomResourceDefinition> {
    vec![
        CouchbaseBackup::crd(),
        CouchbaseBackupRestore::crd(),
        CouchbaseBucket::crd(),
        CouchbaseScope::crd(),
        CouchbaseCollection::crd(),
        CouchbaseGroup::crd(),
        CouchbaseUser::crd(),
        CouchbaseReplication::crd(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_kind_and_plural() {
        assert_eq!(
            resolve("CouchbaseBucket").map(|k| k.plural),
            Some("couchbasebuckets")
        );
        assert_eq!(
            resolve("couchbasebuckets").map(|k| k.kind),
            Some("CouchbaseBucket")
        );
        assert_eq!(
            resolve("couchbasebackup").map(|k| k.kind),
            Some("CouchbaseBackup")
        );
        assert!(resolve("CouchbaseCluster").is_none());
    }

    #[test]
    fn crds_cover_every_registered_kind() {
        let crds = all_crds();
        assert_eq!(crds.len(), KINDS.len());
        for (crd, kref) in crds.iter().zip(KINDS) {
            assert_eq!(crd.spec.group, crate::GROUP);
            assert_eq!(crd.spec.names.kind, kref.kind);
            assert_eq!(crd.spec.names.plural, kref.plural);
            assert_eq!(
                crd.metadata.name.as_deref(),
                Some(format!("{}.{}", kref.plural, crate::GROUP).as_str())
            );
        }
    }

    #[test]
    fn every_kind_is_namespaced_v2() {
        for crd in all_crds() {
            assert_eq!(crd.spec.scope, "Namespaced");
            assert!(crd.spec.versions.iter().any(|v| v.name == crate::VERSION));
        }
    }
}
