//! Typed models for the Couchbase Autonomous Operator custom resources
//! (`couchbase.com/v2`). Each kind is a `kube::CustomResource` derive so the
//! schema the API server validates against is generated from these structs.

pub mod backup;
pub mod backup_restore;
pub mod bucket;
pub mod collection;
pub mod condition;
pub mod group;
pub mod registry;
pub mod replication;
pub mod scope;
pub mod user;

pub use backup::CouchbaseBackup;
pub use backup_restore::CouchbaseBackupRestore;
pub use bucket::CouchbaseBucket;
pub use collection::CouchbaseCollection;
pub use group::CouchbaseGroup;
pub use replication::CouchbaseReplication;
pub use scope::CouchbaseScope;
pub use user::CouchbaseUser;

/// API group shared by every kind in this crate.
pub const GROUP: &str = "couchbase.com";
/// API version shared by every kind in this crate.
pub const VERSION: &str = "v2";
