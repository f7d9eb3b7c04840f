/// Install the process-wide tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (from
/// `CART_LOG_FILTER`) applies. Output is compact with uptime timestamps.
///
/// ```bash
/// RUST_LOG=debug cargo run                                      # everything
/// RUST_LOG=cart_aggregator::cart_actor=debug,info cargo run     # cart handlers only
/// ```
pub fn setup_tracing(default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .compact()
        .init();
}
