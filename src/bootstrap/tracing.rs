use tracing_subscriber::EnvFilter;

pub async fn init_tracing() {
    // RUST_LOG wins; otherwise info, with sqlx statement logs kept quiet
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
