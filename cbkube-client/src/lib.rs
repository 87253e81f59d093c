pub mod config;
pub mod engine;
pub mod error;
pub mod manifest;
pub mod wait;

pub use config::{ProviderConfig, WaitConfig};
pub use engine::{CouchbaseKind, ResourceEngine};
pub use error::Error;
pub use wait::{Probe, WaitBudget, WaitError};

use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

pub fn init_tracing(default_env: &str) {
    let filter = EnvFilter::builder()
        .with_env_var("RUST_LOG")
        .from_env_lossy()
        .add_directive(
            default_env
                .parse()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        );

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init();
}
