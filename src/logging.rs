use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr log subscriber for the CLI
///
/// `RUST_LOG` takes precedence over the verbosity flag. Without either only
/// warnings and errors are shown.
pub fn init_logging(verbose_level: u8) {
    let default_filter = match verbose_level {
        0 => "warn",
        // -v: debug level but suppress noisy hyper logs
        1 => "debug,hyper_util=warn,hyper=warn",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
