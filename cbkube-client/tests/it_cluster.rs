// Integration tests that expect a running cluster with the Couchbase
// Autonomous Operator CRDs installed.
// Enable via: cargo test -p cbkube-client --test it_cluster -- --ignored

use cbkube_client::{ProviderConfig, ResourceEngine};
use cbkube_crd::CouchbaseBucket;
use cbkube_crd::bucket::CouchbaseBucketSpec;
use cbkube_crd::condition::{self, ConditionType};
use kube::Client;

// DNS-1123 safe numeric suffix for unique names
const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
fn uniq(prefix: &str) -> String {
    format!("{prefix}-{}", nanoid::nanoid!(6, &DIGITS))
}

fn minimal_bucket(name: &str) -> CouchbaseBucket {
    let spec: CouchbaseBucketSpec = serde_json::from_str("{}").unwrap();
    CouchbaseBucket::new(name, spec)
}

async fn engine() -> ResourceEngine<CouchbaseBucket> {
    let _ = rustls::crypto::CryptoProvider::install_default(
        rustls::crypto::aws_lc_rs::default_provider(),
    );
    let client = Client::try_default().await.expect("kube client");
    let cfg = ProviderConfig::default();
    ResourceEngine::new(&client, &cfg, "default")
}

#[test_log::test(tokio::test)]
#[ignore]
async fn apply_get_delete_round_trip() {
    let engine = engine().await;
    let name = uniq("cbk-it-bucket");

    let applied = engine.apply(&minimal_bucket(&name)).await.expect("apply");
    assert_eq!(applied.metadata.name.as_deref(), Some(name.as_str()));

    let fetched = engine.get(&name).await.expect("get");
    assert_eq!(fetched.spec.memory_quota, "100Mi");

    engine.delete_and_wait(&name).await.expect("delete and wait");
    assert!(engine.get_opt(&name).await.expect("get_opt").is_none());
}

#[test_log::test(tokio::test)]
#[ignore]
async fn apply_is_idempotent_under_one_field_manager() {
    let engine = engine().await;
    let name = uniq("cbk-it-bucket");

    let first = engine.apply(&minimal_bucket(&name)).await.expect("apply #1");
    let second = engine.apply(&minimal_bucket(&name)).await.expect("apply #2");
    assert_eq!(first.metadata.name, second.metadata.name);

    engine.delete_and_wait(&name).await.expect("cleanup");
}

#[test_log::test(tokio::test)]
#[ignore]
async fn get_missing_object_is_a_not_found_error() {
    let engine = engine().await;
    let err = engine.get(&uniq("cbk-it-missing")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[test_log::test(tokio::test)]
#[ignore]
async fn bucket_reaches_ready_after_apply() {
    let engine = engine().await;
    let name = uniq("cbk-it-bucket");

    engine.apply(&minimal_bucket(&name)).await.expect("apply");
    engine
        .wait_until(&name, 120, |b| {
            b.status
                .as_ref()
                .and_then(|s| s.conditions.as_ref())
                .map(|c| condition::is_true(c, &ConditionType::Ready))
                .unwrap_or(false)
        })
        .await
        .expect("bucket never became Ready");

    engine.delete_and_wait(&name).await.expect("cleanup");
}

#[test_log::test(tokio::test)]
#[ignore]
async fn delete_of_missing_object_succeeds() {
    let engine = engine().await;
    engine
        .delete(&uniq("cbk-it-missing"))
        .await
        .expect("delete of absent object");
}
