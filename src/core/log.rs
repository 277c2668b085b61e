use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Installs the global subscriber. `verbose` enables debug output for this
/// crate; `RUST_LOG` takes precedence when set.
pub fn init_logging(verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .with(build_filter(env.as_deref(), verbose))
        .init();
}

/// The only filter installed: `env` directives when valid, otherwise the
/// `verbose` default.
fn build_filter(env: Option<&str>, verbose: bool) -> EnvFilter {
    env.filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| {
            EnvFilter::new(if verbose {
                "warn,stocks=debug"
            } else {
                "warn"
            })
        })
}
