use tracing_subscriber::{
    EnvFilter, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

const SERVICE_FILTER: &str = "moodx=info,moodx_service=info,tower_http=info";
const CLI_FILTER: &str = "moodx=warn,moodx_cli=info";

/// Initialize tracing for the HTTP service. `LOG_FORMAT=pretty` gives
/// human-readable output, anything else structured JSON.
pub fn init_tracing() {
    init(SERVICE_FILTER, std::io::stdout);
}

/// Same as [`init_tracing`] but quieter and on stderr, so stdout stays free
/// for the rendered recommendations.
pub fn init_cli_tracing() {
    init(CLI_FILTER, std::io::stderr);
}

fn init<W>(default_filter: &str, writer: W)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "pretty" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(writer))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(writer),
                )
                .init();
        }
    }
}
