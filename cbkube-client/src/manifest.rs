//! YAML manifest rendering. This surface never touches the cluster, so it
//! works in offline mode; output is what `kubectl apply -f` accepts.

use std::collections::BTreeMap;

use kube::Resource;
use serde::Serialize;

use crate::error::Error;

/// Render one object as a YAML document.
pub fn render<K: Serialize>(obj: &K) -> Result<String, Error> {
    Ok(serde_yaml::to_string(obj)?)
}

/// Join rendered documents into one multi-document YAML stream.
pub fn render_all<I>(docs: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::new();
    for doc in docs {
        out.push_str("---\n");
        out.push_str(&doc);
        if !doc.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Merge labels and annotations into an object's metadata, keeping existing
/// entries that are not overridden.
pub fn decorate<K>(
    obj: &mut K,
    labels: &BTreeMap<String, String>,
    annotations: &BTreeMap<String, String>,
) where
    K: Resource,
{
    if !labels.is_empty() {
        let target = obj.meta_mut().labels.get_or_insert_with(Default::default);
        for (k, v) in labels {
            target.insert(k.clone(), v.clone());
        }
    }
    if !annotations.is_empty() {
        let target =
            obj.meta_mut().annotations.get_or_insert_with(Default::default);
        for (k, v) in annotations {
            target.insert(k.clone(), v.clone());
        }
    }
}

/// Place an object into a namespace (manifests should carry it explicitly).
pub fn in_namespace<K: Resource>(obj: &mut K, namespace: &str) {
    obj.meta_mut().namespace = Some(namespace.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbkube_crd::CouchbaseBucket;
    use cbkube_crd::bucket::CouchbaseBucketSpec;

    fn bucket(name: &str) -> CouchbaseBucket {
        let spec: CouchbaseBucketSpec = serde_json::from_str("{}").unwrap();
        CouchbaseBucket::new(name, spec)
    }

    #[test]
    fn rendered_manifest_carries_group_version_and_kind() {
        let mut b = bucket("travel");
        in_namespace(&mut b, "couchbase");
        let yaml = render(&b).unwrap();
        assert!(yaml.contains("apiVersion: couchbase.com/v2"));
        assert!(yaml.contains("kind: CouchbaseBucket"));
        assert!(yaml.contains("name: travel"));
        assert!(yaml.contains("namespace: couchbase"));
        // defaults materialize in the document
        assert!(yaml.contains("memoryQuota: 100Mi"));
    }

    #[test]
    fn multi_document_stream_separates_with_dashes() {
        let docs = vec![
            render(&bucket("a")).unwrap(),
            render(&bucket("b")).unwrap(),
        ];
        let stream = render_all(docs);
        assert_eq!(stream.matches("---\n").count(), 2);
        assert!(stream.contains("name: a"));
        assert!(stream.contains("name: b"));
    }

    #[test]
    fn decorate_merges_without_dropping_existing_labels() {
        let mut b = bucket("travel");
        b.metadata
            .labels
            .get_or_insert_with(Default::default)
            .insert("team".into(), "storage".into());
        let labels =
            BTreeMap::from([("env".to_string(), "prod".to_string())]);
        decorate(&mut b, &labels, &BTreeMap::new());
        let out = b.metadata.labels.unwrap();
        assert_eq!(out.get("team").map(String::as_str), Some("storage"));
        assert_eq!(out.get("env").map(String::as_str), Some("prod"));
    }
}
