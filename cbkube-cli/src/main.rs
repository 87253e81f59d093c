use cbkube_cli::CbkubeCli;
use clap::Parser;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    cbkube_client::init_tracing("warn");

    // Ensure rustls uses the aws-lc-rs provider explicitly.
    // This avoids runtime errors when no default provider is set.
    if let Err(e) = rustls::crypto::CryptoProvider::install_default(
        rustls::crypto::aws_lc_rs::default_provider(),
    ) {
        tracing::debug!(
            ?e,
            "CryptoProvider already installed or incompatible; proceeding"
        );
    }

    let cli = CbkubeCli::parse();
    cbkube_cli::run(cli).await
}
