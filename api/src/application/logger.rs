use tracing_subscriber::{EnvFilter, fmt};

use crate::args::LogArgs;

/// `RUST_LOG` wins over the configured filter when set.
pub fn init_logger(args: &LogArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.filter));

    let subscriber = fmt().with_env_filter(filter).with_target(true);
    if args.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
