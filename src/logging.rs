use std::future::Future;

use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;

use crate::config::Config;

const DEFAULT_LOG_FILTER: &str = "tower_http=debug,hooklog=debug,info";

pub struct TracingSetup;

impl TracingSetup {
    /// Install the subscriber, then run `func` to completion.
    ///
    /// Spans are exported to Jaeger when a telemetry URL is configured.
    pub async fn with_setup<Func, Fut>(config: Config, func: Func) -> color_eyre::Result<()>
    where
        Fut: Future<Output = color_eyre::Result<()>> + Send + 'static,
        Func: FnOnce(Config) -> Fut + Send,
    {
        configure_log_var();

        let telemetry = match config.telemetry_url() {
            Some(telemetry_url) => {
                let tracer = opentelemetry_jaeger::new_pipeline()
                    .with_agent_endpoint(telemetry_url)
                    .install_batch(opentelemetry::runtime::Tokio)?;
                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            }
            None => None,
        };
        let telemetry_enabled = telemetry.is_some();

        Registry::default()
            .with(EnvFilter::from_default_env())
            .with(
                HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .with(ErrorLayer::default())
            .with(telemetry)
            .init();

        let result = tokio::spawn(func(config)).await;

        if telemetry_enabled {
            opentelemetry::global::shutdown_tracer_provider();
        }

        result?
    }
}

fn configure_log_var() {
    if std::env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.is_empty())
        .is_none()
    {
        std::env::set_var("RUST_LOG", DEFAULT_LOG_FILTER);
    }
}
