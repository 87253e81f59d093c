use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use cbkube_client::{ProviderConfig, ResourceEngine, manifest};
use cbkube_crd::registry::{self, KindRef};
use envconfig::Envconfig;
use kube::{Client, ResourceExt};
use serde::Deserialize;
use tracing::debug;

use crate::{CbkubeCli, Commands, ManifestArgs};

/// Expand a registry entry into a block typed with the matching model. Every
/// per-kind difference stays declarative; the handlers below are written once.
macro_rules! with_kind {
    ($kref:expr, $K:ident => $body:block) => {
        match $kref.kind {
            "CouchbaseBackup" => {
                type $K = cbkube_crd::CouchbaseBackup;
                $body
            }
            "CouchbaseBackupRestore" => {
                type $K = cbkube_crd::CouchbaseBackupRestore;
                $body
            }
            "CouchbaseBucket" => {
                type $K = cbkube_crd::CouchbaseBucket;
                $body
            }
            "CouchbaseScope" => {
                type $K = cbkube_crd::CouchbaseScope;
                $body
            }
            "CouchbaseCollection" => {
                type $K = cbkube_crd::CouchbaseCollection;
                $body
            }
            "CouchbaseGroup" => {
                type $K = cbkube_crd::CouchbaseGroup;
                $body
            }
            "CouchbaseUser" => {
                type $K = cbkube_crd::CouchbaseUser;
                $body
            }
            "CouchbaseReplication" => {
                type $K = cbkube_crd::CouchbaseReplication;
                $body
            }
            other => unreachable!("kind {other} missing from dispatch"),
        }
    };
}

pub async fn run(cli: CbkubeCli) -> anyhow::Result<()> {
    let cfg = ProviderConfig::init_from_env()?;
    debug!(?cfg, "provider configuration loaded");

    match cli.command {
        Commands::Crd { kind } => {
            print!("{}", render_crds(kind.as_deref())?);
            Ok(())
        }
        Commands::Manifest(args) => {
            print!("{}", build_manifest(&args)?);
            Ok(())
        }
        Commands::Apply { file } => apply_file(&cfg, &file).await,
        Commands::Get { kind, name, namespace } => {
            get_object(&cfg, &kind, &name, namespace.as_deref()).await
        }
        Commands::List { kind, namespace } => {
            list_objects(&cfg, &kind, namespace.as_deref()).await
        }
        Commands::Delete {
            kind,
            name,
            namespace,
            timeout_secs,
            poll_interval_secs,
        } => {
            let mut cfg = cfg;
            if let Some(t) = timeout_secs {
                cfg.wait.delete_timeout_secs = t;
            }
            if let Some(p) = poll_interval_secs {
                cfg.wait.poll_interval_secs = p;
            }
            delete_object(&cfg, &kind, &name, namespace.as_deref()).await
        }
    }
}

fn resolve_kind(name: &str) -> anyhow::Result<KindRef> {
    registry::resolve(name).with_context(|| {
        let known = registry::KINDS
            .iter()
            .map(|k| k.kind)
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown kind {name:?}; known kinds: {known}")
    })
}

async fn cluster_client(cfg: &ProviderConfig) -> anyhow::Result<Client> {
    if cfg.offline {
        bail!(
            "offline mode is enabled; only `crd` and `manifest` are available"
        );
    }
    Ok(Client::try_default().await?)
}

fn render_crds(kind: Option<&str>) -> anyhow::Result<String> {
    let crds = registry::all_crds();
    let selected: Vec<_> = match kind {
        None => crds,
        Some(k) => {
            let kref = resolve_kind(k)?;
            crds.into_iter()
                .filter(|c| c.spec.names.kind == kref.kind)
                .collect()
        }
    };
    let docs = selected
        .iter()
        .map(|crd| serde_yaml::to_string(crd))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(manifest::render_all(docs))
}

fn build_manifest(args: &ManifestArgs) -> anyhow::Result<String> {
    let kref = resolve_kind(&args.kind)?;
    let spec: serde_json::Value = serde_json::from_str(&args.spec)
        .context("--spec must be valid JSON")?;
    let doc = serde_json::json!({
        "apiVersion": format!("{}/{}", cbkube_crd::GROUP, cbkube_crd::VERSION),
        "kind": kref.kind,
        "metadata": { "name": args.name, "namespace": args.namespace },
        "spec": spec,
    });
    let labels = parse_kv(&args.label)?;
    let annotations = parse_kv(&args.annotation)?;
    with_kind!(kref, K => {
        let mut obj: K = serde_json::from_value(doc).with_context(|| {
            format!("spec is not a valid {}", kref.kind)
        })?;
        manifest::decorate(&mut obj, &labels, &annotations);
        Ok(manifest::render(&obj)?)
    })
}

async fn apply_file(cfg: &ProviderConfig, file: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let client = cluster_client(cfg).await?;

    for doc in serde_yaml::Deserializer::from_str(&text) {
        let value = serde_json::Value::deserialize(doc)?;
        if value.is_null() {
            continue;
        }
        let kind_str = value
            .get("kind")
            .and_then(|k| k.as_str())
            .context("document is missing `kind`")?;
        let kref = resolve_kind(kind_str)?;
        let ns = value
            .pointer("/metadata/namespace")
            .and_then(|v| v.as_str())
            .unwrap_or(&cfg.namespace)
            .to_string();
        with_kind!(kref, K => {
            let obj: K = serde_json::from_value(value.clone())?;
            let engine: ResourceEngine<K> =
                ResourceEngine::new(&client, cfg, &ns);
            let applied = engine.apply(&obj).await?;
            println!("{} {}/{} applied", kref.kind, ns, applied.name_any());
        })
    }
    Ok(())
}

async fn get_object(
    cfg: &ProviderConfig,
    kind: &str,
    name: &str,
    namespace: Option<&str>,
) -> anyhow::Result<()> {
    let kref = resolve_kind(kind)?;
    let client = cluster_client(cfg).await?;
    let ns = namespace.unwrap_or(&cfg.namespace);
    with_kind!(kref, K => {
        let engine: ResourceEngine<K> = ResourceEngine::new(&client, cfg, ns);
        let obj = engine.get(name).await?;
        print!("{}", manifest::render(&obj)?);
    });
    Ok(())
}

async fn list_objects(
    cfg: &ProviderConfig,
    kind: &str,
    namespace: Option<&str>,
) -> anyhow::Result<()> {
    let kref = resolve_kind(kind)?;
    let client = cluster_client(cfg).await?;
    let ns = namespace.unwrap_or(&cfg.namespace);
    with_kind!(kref, K => {
        let engine: ResourceEngine<K> = ResourceEngine::new(&client, cfg, ns);
        for obj in engine.list().await? {
            println!("{}", obj.name_any());
        }
    });
    Ok(())
}

async fn delete_object(
    cfg: &ProviderConfig,
    kind: &str,
    name: &str,
    namespace: Option<&str>,
) -> anyhow::Result<()> {
    let kref = resolve_kind(kind)?;
    let client = cluster_client(cfg).await?;
    let ns = namespace.unwrap_or(&cfg.namespace);
    with_kind!(kref, K => {
        let engine: ResourceEngine<K> = ResourceEngine::new(&client, cfg, ns);
        match engine.delete_and_wait(name).await {
            Ok(()) => {}
            // A failed wait does not imply a failed delete; the object may
            // still disappear in the background.
            Err(e) if e.is_timeout() => {
                eprintln!("{e}");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    });
    if cfg.wait.delete_timeout_secs == 0 {
        println!("{} {}/{} delete requested (not waiting)", kref.kind, ns, name);
    } else {
        println!("{} {}/{} deleted", kref.kind, ns, name);
    }
    Ok(())
}

fn parse_kv(items: &[String]) -> anyhow::Result<BTreeMap<String, String>> {
    items
        .iter()
        .map(|s| {
            s.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .with_context(|| format!("expected key=value, got {s:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManifestArgs;

    #[test]
    fn unknown_kind_lists_the_registry() {
        let err = resolve_kind("CouchbaseCluster").unwrap_err();
        assert!(err.to_string().contains("CouchbaseBucket"));
    }

    #[test]
    fn manifest_for_bucket_renders_defaults() {
        let args = ManifestArgs {
            kind: "couchbasebuckets".into(),
            name: "travel".into(),
            namespace: "couchbase".into(),
            spec: r#"{"replicas":2}"#.into(),
            label: vec!["env=prod".into()],
            annotation: vec![],
        };
        let yaml = build_manifest(&args).unwrap();
        assert!(yaml.contains("kind: CouchbaseBucket"));
        assert!(yaml.contains("namespace: couchbase"));
        assert!(yaml.contains("replicas: 2"));
        assert!(yaml.contains("env: prod"));
    }

    #[test]
    fn manifest_rejects_bad_spec_json() {
        let args = ManifestArgs {
            kind: "CouchbaseUser".into(),
            name: "alice".into(),
            namespace: "default".into(),
            spec: "not-json".into(),
            label: vec![],
            annotation: vec![],
        };
        assert!(build_manifest(&args).is_err());
    }

    #[test]
    fn crd_output_covers_all_kinds_by_default() {
        let out = render_crds(None).unwrap();
        for kref in registry::KINDS {
            assert!(out.contains(&format!("kind: {}", kref.kind)));
        }
        let single = render_crds(Some("couchbaseusers")).unwrap();
        assert!(single.contains("couchbaseusers.couchbase.com"));
        assert!(!single.contains("couchbasebuckets.couchbase.com"));
    }

    #[test]
    fn kv_parsing_requires_equals() {
        assert!(parse_kv(&["a=b".into()]).is_ok());
        assert!(parse_kv(&["broken".into()]).is_err());
    }
}
