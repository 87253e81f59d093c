mod commands;

pub use commands::run;

use std::path::PathBuf;

#[derive(clap::Parser, Clone, Debug)]
#[clap(author, version, about = "Manage Couchbase Autonomous Operator resources", long_about = None)]
pub struct CbkubeCli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum Commands {
    /// Print CRD manifests for all kinds, or one kind
    Crd {
        /// Kind or plural name, e.g. "CouchbaseBucket" or "couchbasebuckets"
        kind: Option<String>,
    },
    /// Render a single object manifest without contacting the cluster
    #[clap(aliases = &["m"])]
    Manifest(ManifestArgs),
    /// Server-side apply every document in a YAML file
    #[clap(aliases = &["a"])]
    Apply {
        /// Path to a YAML file; may contain multiple documents
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Fetch one object and print it as YAML
    #[clap(aliases = &["g"])]
    Get {
        kind: String,
        name: String,
        #[arg(short, long)]
        namespace: Option<String>,
    },
    /// List objects of a kind in the namespace
    #[clap(aliases = &["l"])]
    List {
        kind: String,
        #[arg(short, long)]
        namespace: Option<String>,
    },
    /// Delete an object and wait for the deletion to be confirmed
    #[clap(aliases = &["d", "del"])]
    Delete {
        kind: String,
        name: String,
        #[arg(short, long)]
        namespace: Option<String>,
        /// Seconds to wait for confirmation; 0 fires and forgets, negative
        /// waits up to one week
        #[arg(long)]
        timeout_secs: Option<i64>,
        /// Seconds between existence checks
        #[arg(long)]
        poll_interval_secs: Option<u64>,
    },
}

#[derive(clap::Args, Clone, Debug)]
pub struct ManifestArgs {
    /// Kind or plural name
    pub kind: String,
    /// Object name
    pub name: String,
    #[arg(short, long, default_value = "default")]
    pub namespace: String,
    /// Spec as inline JSON, e.g. '{"memoryQuota":"256Mi"}'
    #[arg(short, long, default_value = "{}")]
    pub spec: String,
    /// Labels to set, as key=value (repeatable)
    #[arg(short, long)]
    pub label: Vec<String>,
    /// Annotations to set, as key=value (repeatable)
    #[arg(long)]
    pub annotation: Vec<String>,
}
