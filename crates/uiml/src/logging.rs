use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

use crate::args::GlobalArgs;

/// Log to stderr. `RUST_LOG` wins over the verbosity flags, and `debug`
/// from settings raises the default to at least `debug`.
pub fn init(global: &GlobalArgs, debug: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(global, debug)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(env_filter);

    // a subscriber may already be installed when running under a test harness
    let _ = Registry::default().with(stderr_layer).try_init();
}

fn default_directive(global: &GlobalArgs, debug: bool) -> &'static str {
    if global.quiet {
        return "off";
    }
    match global.verbose {
        0 | 1 if debug => "debug",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
