//! One CRUD engine for every Couchbase kind. Per-kind behavior lives entirely
//! in the typed models; this module only varies by the type parameter.

use std::fmt::Debug;
use std::time::Duration;

use k8s_openapi::NamespaceResourceScope;
use kube::api::{Api, DeleteParams, ListParams, Patch, PatchParams};
use kube::{Client, Resource};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace};

use crate::config::{ProviderConfig, WaitConfig};
use crate::error::Error;
use crate::wait::{
    Probe, WaitBudget, WaitError, wait_for_condition, wait_for_delete,
};

/// Bounds every namespaced Couchbase custom resource satisfies via its
/// `CustomResource` derive.
pub trait CouchbaseKind:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Clone
    + Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
}

impl<K> CouchbaseKind for K where
    K: Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static
{
}

/// Typed handle for one kind in one namespace. Holds its configuration by
/// value; construct freely, nothing is shared or mutated behind the scenes.
pub struct ResourceEngine<K: CouchbaseKind> {
    api: Api<K>,
    kind: String,
    namespace: String,
    field_manager: String,
    force_conflicts: bool,
    offline: bool,
    wait: WaitConfig,
}

impl<K: CouchbaseKind> ResourceEngine<K> {
    pub fn new(client: &Client, cfg: &ProviderConfig, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client.clone(), namespace),
            kind: K::kind(&()).into_owned(),
            namespace: namespace.to_string(),
            field_manager: cfg.field_manager.clone(),
            force_conflicts: cfg.force_conflicts,
            offline: cfg.offline,
            wait: cfg.wait.clone(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    fn ensure_online(&self, op: &str) -> Result<(), Error> {
        if self.offline {
            return Err(Error::Offline(format!("{} {}", op, self.kind)));
        }
        Ok(())
    }

    fn not_found(&self, name: &str) -> Error {
        Error::NotFound {
            kind: self.kind.clone(),
            namespace: self.namespace.clone(),
            name: name.to_string(),
        }
    }

    /// Server-side apply: create or update under the configured field
    /// manager, forcing conflicting ownership when so configured.
    #[instrument(skip_all, fields(kind = %self.kind, ns = %self.namespace))]
    pub async fn apply(&self, obj: &K) -> Result<K, Error> {
        self.ensure_online("apply")?;
        let name = obj.meta().name.clone().ok_or_else(|| {
            Error::InvalidObject("metadata.name is required for apply".into())
        })?;
        let mut pp = PatchParams::apply(&self.field_manager);
        if self.force_conflicts {
            pp = pp.force();
        }
        let value = serde_json::to_value(obj)?;
        let applied = self.api.patch(&name, &pp, &Patch::Apply(&value)).await?;
        info!(%name, "applied");
        Ok(applied)
    }

    #[instrument(skip_all, fields(kind = %self.kind, ns = %self.namespace, %name))]
    pub async fn get(&self, name: &str) -> Result<K, Error> {
        self.ensure_online("get")?;
        match self.api.get(name).await {
            Ok(obj) => Ok(obj),
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                Err(self.not_found(name))
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip_all, fields(kind = %self.kind, ns = %self.namespace, %name))]
    pub async fn get_opt(&self, name: &str) -> Result<Option<K>, Error> {
        self.ensure_online("get")?;
        Ok(self.api.get_opt(name).await?)
    }

    #[instrument(skip_all, fields(kind = %self.kind, ns = %self.namespace))]
    pub async fn list(&self) -> Result<Vec<K>, Error> {
        self.ensure_online("list")?;
        let list = self.api.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    /// Issue the delete request. A 404 means the object is already gone and
    /// is treated as success; every other error is surfaced immediately.
    #[instrument(skip_all, fields(kind = %self.kind, ns = %self.namespace, %name))]
    pub async fn delete(&self, name: &str) -> Result<(), Error> {
        self.ensure_online("delete")?;
        match self.api.delete(name, &DeleteParams::default()).await {
            Ok(_) => {
                debug!(%name, "delete requested");
                Ok(())
            }
            Err(kube::Error::Api(ae)) if ae.code == 404 => {
                trace!(%name, "already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete, then poll until the object is confirmed absent or the
    /// configured budget runs out. Deletion can lag the request arbitrarily
    /// (finalizers), so confirmation requires observing a not-found.
    #[instrument(skip_all, fields(kind = %self.kind, ns = %self.namespace, %name))]
    pub async fn delete_and_wait(&self, name: &str) -> Result<(), Error> {
        self.delete(name).await?;

        let budget = WaitBudget::from_secs(self.wait.delete_timeout_secs);
        let interval =
            Duration::from_secs(self.wait.poll_interval_secs.max(1));
        let probe = || {
            let api = self.api.clone();
            let name = name.to_string();
            async move {
                match api.get_opt(&name).await {
                    Ok(Some(_)) => Probe::Present,
                    Ok(None) => Probe::Absent,
                    Err(e) => {
                        debug!(error = %e, "existence check failed; retrying");
                        Probe::Unreachable
                    }
                }
            }
        };
        match wait_for_delete(probe, budget, interval).await {
            Ok(()) => {
                info!(%name, "deletion confirmed");
                Ok(())
            }
            Err(WaitError::TimedOut { waited }) => {
                Err(Error::DeleteWaitTimeout {
                    kind: self.kind.clone(),
                    namespace: self.namespace.clone(),
                    name: name.to_string(),
                    waited,
                })
            }
        }
    }

    /// Poll until `pred` holds for the fetched object (a Ready condition,
    /// a populated status field, ...). An absent object never satisfies the
    /// predicate; fetch errors are retried like any other transient failure.
    #[instrument(skip_all, fields(kind = %self.kind, ns = %self.namespace, %name))]
    pub async fn wait_until<F>(
        &self,
        name: &str,
        timeout_secs: i64,
        pred: F,
    ) -> Result<(), Error>
    where
        F: Fn(&K) -> bool,
    {
        self.ensure_online("wait")?;
        let budget = WaitBudget::from_secs(timeout_secs);
        let interval =
            Duration::from_secs(self.wait.poll_interval_secs.max(1));
        let pred = &pred;
        let check = || {
            let api = self.api.clone();
            let name = name.to_string();
            async move {
                match api.get_opt(&name).await {
                    Ok(Some(obj)) => pred(&obj),
                    Ok(None) => false,
                    Err(e) => {
                        debug!(error = %e, "state check failed; retrying");
                        false
                    }
                }
            }
        };
        match wait_for_condition(check, budget, interval).await {
            Ok(()) => Ok(()),
            Err(WaitError::TimedOut { waited }) => {
                Err(Error::ConditionWaitTimeout {
                    kind: self.kind.clone(),
                    namespace: self.namespace.clone(),
                    name: name.to_string(),
                    waited,
                })
            }
        }
    }
}
