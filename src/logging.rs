use std::env;
use tracing_subscriber::{filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "vpsload=info,warn";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter when it parses.
pub fn init() {
    let default_filter = DEFAULT_FILTER
        .parse::<Targets>()
        .unwrap_or_else(|_| Targets::new());
    let filter = match env::var("RUST_LOG") {
        Ok(filter) => filter.parse::<Targets>().unwrap_or(default_filter),
        Err(_) => default_filter,
    };

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_line_number(true))
        .try_init()
    {
        eprintln!("initializing tracing failed: {err:?}");
    }
}
